//! Wishlist queue handler library.
//!
//! Chat users queue themselves for limited-availability items; the domain
//! interprets their commands against a durable queue store and an item
//! catalogue lookup.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;
