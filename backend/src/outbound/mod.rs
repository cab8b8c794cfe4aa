//! Driven adapters implementing the domain ports.
//!
//! - `persistence`: PostgreSQL wishlist store via Diesel.
//! - `memory`: in-process wishlist store for database-less runs.
//! - `jelly_journal`: HTTP item resolver.

pub mod jelly_journal;
pub mod memory;
pub mod persistence;
