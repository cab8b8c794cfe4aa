//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the durable `WishlistRepository` implementation backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling, plus the
//! embedded schema migrations.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types; queue rules live in SQL and in the domain, not here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures map to
//!   `WishlistRepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use wishlist_backend::outbound::persistence::{DbPool, DieselWishlistRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/wishlist")).await?;
//! let repo = DieselWishlistRepository::new(pool);
//! ```

mod diesel_wishlist_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_wishlist_repository::DieselWishlistRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
