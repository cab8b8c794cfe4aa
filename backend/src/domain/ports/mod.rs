//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (the store and the catalogue lookup) expose typed errors so
//! adapters map their failures into predictable variants. The driving port is
//! what a transport adapter calls for each inbound message.

mod macros;
pub(crate) use macros::define_port_error;

mod item_resolver;
mod wishlist_command;
mod wishlist_repository;

#[cfg(test)]
pub use item_resolver::MockItemResolver;
pub use item_resolver::{ItemResolver, ItemResolverError, ResolvedItem};
pub use wishlist_command::WishlistCommand;
#[cfg(test)]
pub use wishlist_repository::MockWishlistRepository;
pub use wishlist_repository::{StoreStats, WishlistRepository, WishlistRepositoryError};
