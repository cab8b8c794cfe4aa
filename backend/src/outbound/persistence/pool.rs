//! Async connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8`. Checkout is async and bounded by the
//! configured timeout, and failures surface as [`PoolError`] so repositories
//! can map them into their port's connection error.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::config::WishlistSettings;

const MIN_IDLE_CONNECTIONS: u32 = 1;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Message carried by either variant.
    pub fn into_message(self) -> String {
        match self {
            Self::Checkout { message } | Self::Build { message } => message,
        }
    }
}

/// Connection limits for the wishlist store.
///
/// Built from [`WishlistSettings`] at startup. One idle connection is kept
/// warm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Limits for `database_url` taken from `settings`.
    ///
    /// The URL is passed separately because the CLI may override the
    /// configured one.
    pub fn from_settings(database_url: impl Into<String>, settings: &WishlistSettings) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: settings.pool_max_size(),
            checkout_timeout: settings.pool_checkout_timeout(),
        }
    }

    /// Limits for `database_url` using the settings defaults.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self::from_settings(database_url, &WishlistSettings::default())
    }

    /// Cap the pool at `max_size` connections, never fewer than one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Connection string the pool dials.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum pool size.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    fn min_idle(&self) -> u32 {
        MIN_IDLE_CONNECTIONS.min(self.max_size)
    }
}

/// Async connection pool for PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the pool cannot be constructed, for
    /// example when the minimum idle connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(config.min_idle()))
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection becomes available
    /// within the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(max_size: Option<u32>, timeout_secs: Option<u64>) -> WishlistSettings {
        WishlistSettings {
            pool_max_size: max_size,
            pool_checkout_timeout_secs: timeout_secs,
            ..WishlistSettings::default()
        }
    }

    #[rstest]
    fn unset_settings_give_default_limits() {
        let config = PoolConfig::new("postgres://localhost/wishlist");

        assert_eq!(config.database_url(), "postgres://localhost/wishlist");
        assert_eq!(config.max_size(), 10);
        assert_eq!(config.min_idle(), 1);
        assert_eq!(config.checkout_timeout, Duration::from_secs(10));
    }

    #[rstest]
    fn configured_limits_flow_into_the_pool() {
        let config =
            PoolConfig::from_settings("postgres://db/wishlist", &settings(Some(3), Some(2)));

        assert_eq!(config.max_size(), 3);
        assert_eq!(config.checkout_timeout, Duration::from_secs(2));
    }

    #[rstest]
    #[case(Some(0), 1, 1)]
    #[case(Some(1), 1, 1)]
    #[case(Some(4), 4, 1)]
    fn idle_connections_never_exceed_the_cap(
        #[case] configured: Option<u32>,
        #[case] max_size: u32,
        #[case] min_idle: u32,
    ) {
        let config = PoolConfig::from_settings("postgres://db/wishlist", &settings(configured, None));

        assert_eq!(config.max_size(), max_size);
        assert_eq!(config.min_idle(), min_idle);
    }

    #[rstest]
    fn explicit_cap_is_floored_at_one() {
        let config = PoolConfig::new("postgres://db/wishlist").with_max_size(0);
        assert_eq!(config.max_size(), 1);
    }

    #[rstest]
    #[case(PoolError::checkout("connection refused"), "connection refused")]
    #[case(PoolError::build("invalid URL"), "invalid URL")]
    fn pool_error_keeps_message(#[case] error: PoolError, #[case] message: &str) {
        assert!(error.to_string().contains(message));
        assert_eq!(error.into_message(), message);
    }
}
