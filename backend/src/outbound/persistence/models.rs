//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text, Timestamptz};

use super::schema::wishlist_entries;

/// Row struct for reading from the wishlist_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wishlist_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WishlistEntryRow {
    pub id: i64,
    pub sku: String,
    pub item_name: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new wishlist entries; `id` and `created_at` come
/// from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wishlist_entries)]
pub(crate) struct NewWishlistEntryRow<'a> {
    pub sku: &'a str,
    pub item_name: &'a str,
    pub user_id: &'a str,
    pub display_name: &'a str,
}

/// One of a requester's entries with its live rank.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct QueuedItemRow {
    #[diesel(sql_type = Text)]
    pub sku: String,
    #[diesel(sql_type = Text)]
    pub item_name: String,
    #[diesel(sql_type = BigInt)]
    pub position: i64,
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}

/// Connectivity probe result.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct StoreStatsRow {
    #[diesel(sql_type = Timestamptz)]
    pub server_time: DateTime<Utc>,
    #[diesel(sql_type = BigInt)]
    pub entry_count: i64,
}
