//! In-process wishlist store.
//!
//! Used when no database is configured and by end-to-end tests of the
//! interpreter.

mod in_memory_wishlist_repository;

pub use in_memory_wishlist_repository::InMemoryWishlistRepository;
