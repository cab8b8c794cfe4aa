//! PostgreSQL-backed `WishlistRepository` implementation using Diesel ORM.
//!
//! # Ordering
//!
//! The `id` column is the arrival marker. Every mutation runs in its own
//! transaction and first takes `pg_advisory_xact_lock` keyed on the sku, so
//! concurrent inserts for one sku allocate and commit ids in the same order
//! and never report the same position. Reads compute position and total in a
//! single statement and therefore see either the pre- or post-mutation state.

use async_trait::async_trait;
use diesel::OptionalExtension;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{StoreStats, WishlistRepository, WishlistRepositoryError};
use crate::domain::{
    InsertOutcome, ItemCode, NewWishlistEntry, QueuedItem, RequesterId, WishlistEntry,
};

use super::models::{NewWishlistEntryRow, QueuedItemRow, StoreStatsRow, WishlistEntryRow};
use super::pool::{DbPool, PoolError};
use super::schema::wishlist_entries;

const LOCK_SKU_SQL: &str = "SELECT pg_advisory_xact_lock(hashtext($1))";

const LIST_FOR_IDENTITY_SQL: &str = r"
SELECT e.sku,
       e.item_name,
       (SELECT COUNT(*) FROM wishlist_entries p WHERE p.sku = e.sku AND p.id <= e.id) AS position,
       (SELECT COUNT(*) FROM wishlist_entries t WHERE t.sku = e.sku) AS total
FROM wishlist_entries e
WHERE e.user_id = $1
ORDER BY e.id
";

const STATS_SQL: &str =
    "SELECT now() AS server_time, (SELECT COUNT(*) FROM wishlist_entries) AS entry_count";

/// Diesel-backed implementation of the `WishlistRepository` port.
#[derive(Clone)]
pub struct DieselWishlistRepository {
    pool: DbPool,
}

impl DieselWishlistRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to wishlist repository errors.
fn map_pool_error(error: PoolError) -> WishlistRepositoryError {
    WishlistRepositoryError::connection(error.into_message())
}

/// Map Diesel errors to wishlist repository errors.
fn map_diesel_error(error: diesel::result::Error) -> WishlistRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => WishlistRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => WishlistRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            WishlistRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            WishlistRepositoryError::query("transaction serialization failure")
        }
        _ => WishlistRepositoryError::query("database error"),
    }
}

fn to_count(value: i64, field: &str) -> Result<u64, WishlistRepositoryError> {
    u64::try_from(value)
        .map_err(|_| WishlistRepositoryError::query(format!("negative {field} from database: {value}")))
}

fn to_code(raw: String) -> Result<ItemCode, WishlistRepositoryError> {
    ItemCode::new(&raw)
        .map_err(|err| WishlistRepositoryError::query(format!("invalid sku `{raw}` in database: {err}")))
}

fn row_to_entry(row: WishlistEntryRow) -> Result<WishlistEntry, WishlistRepositoryError> {
    let requester = RequesterId::new(row.user_id)
        .map_err(|err| WishlistRepositoryError::query(format!("invalid user id in database: {err}")))?;
    Ok(WishlistEntry {
        requester,
        code: to_code(row.sku)?,
        item_name: row.item_name,
        display_name: row.display_name,
        arrival: row.id,
        created_at: row.created_at,
    })
}

fn row_to_queued_item(row: QueuedItemRow) -> Result<QueuedItem, WishlistRepositoryError> {
    Ok(QueuedItem {
        code: to_code(row.sku)?,
        item_name: row.item_name,
        position: to_count(row.position, "position")?,
        total: to_count(row.total, "total")?,
    })
}

/// Serialise mutations on `sku` until the surrounding transaction ends.
async fn lock_sku(conn: &mut AsyncPgConnection, sku: &str) -> QueryResult<()> {
    sql_query(LOCK_SKU_SQL)
        .bind::<Text, _>(sku)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl WishlistRepository for DieselWishlistRepository {
    async fn insert(
        &self,
        entry: &NewWishlistEntry,
    ) -> Result<InsertOutcome, WishlistRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let row = NewWishlistEntryRow {
            sku: entry.code.as_str(),
            item_name: entry.item_name.as_str(),
            user_id: entry.requester.as_str(),
            display_name: entry.display_name.as_str(),
        };
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        let (position, inserted) = conn
            .transaction(|conn| {
                async move {
                    lock_sku(conn, row.sku).await?;

                    let inserted = diesel::insert_into(wishlist_entries::table)
                        .values(&row)
                        .on_conflict((wishlist_entries::sku, wishlist_entries::user_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    let arrival: i64 = wishlist_entries::table
                        .filter(wishlist_entries::sku.eq(row.sku))
                        .filter(wishlist_entries::user_id.eq(row.user_id))
                        .select(wishlist_entries::id)
                        .first(conn)
                        .await?;

                    let position: i64 = wishlist_entries::table
                        .filter(wishlist_entries::sku.eq(row.sku))
                        .filter(wishlist_entries::id.le(arrival))
                        .count()
                        .get_result(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>((position, inserted > 0))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(InsertOutcome {
            position: to_count(position, "position")?,
            inserted,
        })
    }

    async fn remove_by_identity(
        &self,
        requester: &RequesterId,
        code: &ItemCode,
    ) -> Result<Option<String>, WishlistRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let sku = code.as_str();
        let user_id = requester.as_str();
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        conn.transaction(|conn| {
            async move {
                lock_sku(conn, sku).await?;
                diesel::delete(
                    wishlist_entries::table
                        .filter(wishlist_entries::sku.eq(sku))
                        .filter(wishlist_entries::user_id.eq(user_id)),
                )
                .returning(wishlist_entries::item_name)
                .get_result::<String>(conn)
                .await
                .optional()
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn remove_earliest_by_name(
        &self,
        code: &ItemCode,
        display_name: &str,
    ) -> Result<Option<String>, WishlistRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let sku = code.as_str();
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        conn.transaction(|conn| {
            async move {
                lock_sku(conn, sku).await?;

                let earliest: Option<(i64, String)> = wishlist_entries::table
                    .filter(wishlist_entries::sku.eq(sku))
                    .filter(wishlist_entries::display_name.eq(display_name))
                    .order(wishlist_entries::id.asc())
                    .select((wishlist_entries::id, wishlist_entries::item_name))
                    .first(conn)
                    .await
                    .optional()?;
                let Some((id, item_name)) = earliest else {
                    return Ok(None);
                };

                diesel::delete(wishlist_entries::table.find(id))
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(Some(item_name))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_for_identity(
        &self,
        requester: &RequesterId,
    ) -> Result<Vec<QueuedItem>, WishlistRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<QueuedItemRow> = sql_query(LIST_FOR_IDENTITY_SQL)
            .bind::<Text, _>(requester.as_str())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_queued_item).collect()
    }

    async fn count_for_code(&self, code: &ItemCode) -> Result<u64, WishlistRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = wishlist_entries::table
            .filter(wishlist_entries::sku.eq(code.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_count(total, "count")
    }

    async fn list_for_code(
        &self,
        code: &ItemCode,
    ) -> Result<Vec<WishlistEntry>, WishlistRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<WishlistEntryRow> = wishlist_entries::table
            .filter(wishlist_entries::sku.eq(code.as_str()))
            .order(wishlist_entries::id.asc())
            .select(WishlistEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_entry).collect()
    }

    async fn stats(&self) -> Result<StoreStats, WishlistRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: StoreStatsRow = sql_query(STATS_SQL)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(StoreStats {
            server_time: row.server_time,
            entry_count: to_count(row.entry_count, "entry count")?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for error and row mapping; store behaviour is exercised
    //! against embedded PostgreSQL in `tests/diesel_wishlist_repository.rs`.

    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("backend said no".to_owned()))
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, WishlistRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound, WishlistRepositoryError::query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        WishlistRepositoryError::connection("database connection error")
    )]
    #[case(
        database_error(DatabaseErrorKind::SerializationFailure),
        WishlistRepositoryError::query("transaction serialization failure")
    )]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation),
        WishlistRepositoryError::query("database error")
    )]
    #[case(DieselError::RollbackTransaction, WishlistRepositoryError::query("database error"))]
    fn diesel_errors_map_to_port_errors(
        #[case] error: DieselError,
        #[case] expected: WishlistRepositoryError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn negative_counts_are_rejected() {
        let err = to_count(-1, "total").expect_err("negative count");
        assert!(matches!(err, WishlistRepositoryError::Query { .. }));
    }

    #[rstest]
    fn entry_rows_map_arrival_and_missing_display_name() {
        let row = WishlistEntryRow {
            id: 42,
            sku: "BARL2BR".to_owned(),
            item_name: "Bartholomew Bear".to_owned(),
            user_id: "manual:Jane".to_owned(),
            display_name: None,
            created_at: Utc::now(),
        };

        let entry = row_to_entry(row).expect("valid row");
        assert_eq!(entry.arrival, 42);
        assert!(entry.requester.is_manual());
        assert_eq!(entry.code.as_str(), "BARL2BR");
        assert_eq!(entry.display_name, None);
    }

    #[rstest]
    fn queued_item_rows_convert_counts() {
        let row = QueuedItemRow {
            sku: "C3CW".to_owned(),
            item_name: "Bunny".to_owned(),
            position: 2,
            total: 3,
        };

        let item = row_to_queued_item(row).expect("valid row");
        assert_eq!((item.position, item.total), (2, 3));
    }
}
