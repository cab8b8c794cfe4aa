//! Jelly Journal outbound adapter.
//!
//! A thin HTTP implementation of the `ItemResolver` port that reads item names
//! from Jelly Journal product pages.

mod http_resolver;
mod page;

pub use http_resolver::{JellyJournalResolver, JellyJournalSetupError};
