//! Mutex-guarded `WishlistRepository` implementation.
//!
//! Every operation holds a single global lock for its whole duration, so
//! mutations are serialised across all codes and reads never observe a
//! half-applied change. The lock is never held across an `.await`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{StoreStats, WishlistRepository, WishlistRepositoryError};
use crate::domain::{
    InsertOutcome, ItemCode, NewWishlistEntry, QueuedItem, RequesterId, WishlistEntry,
};

#[derive(Debug, Default)]
struct Entries {
    /// Live entries in arrival order.
    rows: Vec<WishlistEntry>,
    next_arrival: i64,
}

impl Entries {
    fn position_of(&self, code: &ItemCode, arrival: i64) -> u64 {
        self.for_code(code)
            .filter(|row| row.arrival <= arrival)
            .count() as u64
    }

    fn for_code<'a>(&'a self, code: &'a ItemCode) -> impl Iterator<Item = &'a WishlistEntry> + 'a {
        self.rows.iter().filter(move |row| &row.code == code)
    }

    fn total_for(&self, code: &ItemCode) -> u64 {
        self.for_code(code).count() as u64
    }
}

/// In-memory wishlist store.
#[derive(Debug, Default)]
pub struct InMemoryWishlistRepository {
    entries: Mutex<Entries>,
}

impl InMemoryWishlistRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl WishlistRepository for InMemoryWishlistRepository {
    async fn insert(
        &self,
        entry: &NewWishlistEntry,
    ) -> Result<InsertOutcome, WishlistRepositoryError> {
        let mut entries = self.lock();
        let existing = entries
            .rows
            .iter()
            .find(|row| row.code == entry.code && row.requester == entry.requester)
            .map(|row| row.arrival);

        let (arrival, inserted) = match existing {
            Some(arrival) => (arrival, false),
            None => {
                entries.next_arrival += 1;
                let arrival = entries.next_arrival;
                entries.rows.push(WishlistEntry {
                    requester: entry.requester.clone(),
                    code: entry.code.clone(),
                    item_name: entry.item_name.clone(),
                    display_name: Some(entry.display_name.clone()),
                    arrival,
                    created_at: Utc::now(),
                });
                (arrival, true)
            }
        };

        Ok(InsertOutcome {
            position: entries.position_of(&entry.code, arrival),
            inserted,
        })
    }

    async fn remove_by_identity(
        &self,
        requester: &RequesterId,
        code: &ItemCode,
    ) -> Result<Option<String>, WishlistRepositoryError> {
        let mut entries = self.lock();
        let index = entries
            .rows
            .iter()
            .position(|row| &row.code == code && &row.requester == requester);
        Ok(index.map(|index| entries.rows.remove(index).item_name))
    }

    async fn remove_earliest_by_name(
        &self,
        code: &ItemCode,
        display_name: &str,
    ) -> Result<Option<String>, WishlistRepositoryError> {
        let mut entries = self.lock();
        // Rows are kept in arrival order, so the first match is the earliest.
        let index = entries
            .rows
            .iter()
            .position(|row| &row.code == code && row.display_name.as_deref() == Some(display_name));
        Ok(index.map(|index| entries.rows.remove(index).item_name))
    }

    async fn list_for_identity(
        &self,
        requester: &RequesterId,
    ) -> Result<Vec<QueuedItem>, WishlistRepositoryError> {
        let entries = self.lock();
        Ok(entries
            .rows
            .iter()
            .filter(|row| &row.requester == requester)
            .map(|row| QueuedItem {
                code: row.code.clone(),
                item_name: row.item_name.clone(),
                position: entries.position_of(&row.code, row.arrival),
                total: entries.total_for(&row.code),
            })
            .collect())
    }

    async fn count_for_code(&self, code: &ItemCode) -> Result<u64, WishlistRepositoryError> {
        Ok(self.lock().total_for(code))
    }

    async fn list_for_code(
        &self,
        code: &ItemCode,
    ) -> Result<Vec<WishlistEntry>, WishlistRepositoryError> {
        Ok(self.lock().for_code(code).cloned().collect())
    }

    async fn stats(&self) -> Result<StoreStats, WishlistRepositoryError> {
        Ok(StoreStats {
            server_time: Utc::now(),
            entry_count: self.lock().rows.len() as u64,
        })
    }
}
