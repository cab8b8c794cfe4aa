//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Live wishlist queue entries.
    ///
    /// `id` doubles as the arrival marker; position within a `sku` is the
    /// number of rows for that `sku` with an `id` at or below the entry's own.
    wishlist_entries (id) {
        /// Primary key and arrival marker.
        id -> Int8,
        /// Normalised product code.
        sku -> Text,
        /// Item name cached at insertion time.
        item_name -> Text,
        /// Requester identity, platform-assigned or `manual:<name>`.
        user_id -> Text,
        /// Requester name shown in admin listings.
        display_name -> Nullable<Text>,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}
