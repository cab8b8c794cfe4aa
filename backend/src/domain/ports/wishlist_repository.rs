//! Port abstraction for the wishlist store.
//!
//! The store owns every ordering guarantee: uniqueness per (requester, code),
//! arrival order within a code, and live position computation. Adapters must
//! serialise concurrent mutations on the same code so two inserts never
//! observe the same position.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    InsertOutcome, ItemCode, NewWishlistEntry, QueuedItem, RequesterId, WishlistEntry,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by wishlist store adapters.
    pub enum WishlistRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "wishlist store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "wishlist store query failed: {message}",
    }
}

/// Liveness snapshot reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Clock reading taken from the store itself.
    pub server_time: DateTime<Utc>,
    /// Number of live entries across all codes.
    pub entry_count: u64,
}

/// Durable store of wishlist entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Insert an entry unless the (requester, code) pair already exists.
    ///
    /// Returns the requester's live position either way. An existing entry
    /// keeps its original arrival marker, cached name and display name.
    async fn insert(
        &self,
        entry: &NewWishlistEntry,
    ) -> Result<InsertOutcome, WishlistRepositoryError>;

    /// Remove the requester's entry for `code`, returning its cached item name.
    async fn remove_by_identity(
        &self,
        requester: &RequesterId,
        code: &ItemCode,
    ) -> Result<Option<String>, WishlistRepositoryError>;

    /// Remove the earliest entry for `code` whose display name matches exactly.
    async fn remove_earliest_by_name(
        &self,
        code: &ItemCode,
        display_name: &str,
    ) -> Result<Option<String>, WishlistRepositoryError>;

    /// Every entry owned by `requester` with live position and queue length,
    /// in the requester's own arrival order.
    async fn list_for_identity(
        &self,
        requester: &RequesterId,
    ) -> Result<Vec<QueuedItem>, WishlistRepositoryError>;

    /// Live number of entries for `code`.
    async fn count_for_code(&self, code: &ItemCode) -> Result<u64, WishlistRepositoryError>;

    /// Entries for `code` in arrival order.
    async fn list_for_code(
        &self,
        code: &ItemCode,
    ) -> Result<Vec<WishlistEntry>, WishlistRepositoryError>;

    /// Probe the store and report basic statistics.
    async fn stats(&self) -> Result<StoreStats, WishlistRepositoryError>;
}
