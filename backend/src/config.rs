//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer defaults, an optional configuration file and `WISHLIST_*`
//! environment variables. Settings are read once at startup and passed into
//! constructors; nothing mutates them afterwards.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::RequesterId;

const DEFAULT_RESOLVER_BASE_URL: &str = "https://jellyjournal.com";
const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CHECKOUT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the wishlist handler and its adapters.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WISHLIST")]
pub struct WishlistSettings {
    /// PostgreSQL connection string. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Identity allowed to run admin commands.
    pub admin_user_id: Option<String>,
    /// Root URL of the item catalogue site.
    pub resolver_base_url: Option<String>,
    /// Per-lookup timeout in seconds.
    pub resolver_timeout_secs: Option<u64>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection before giving up.
    pub pool_checkout_timeout_secs: Option<u64>,
}

impl WishlistSettings {
    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the admin identity, if any.
    pub fn admin(&self) -> Option<RequesterId> {
        self.admin_user_id
            .as_deref()
            .map(str::trim)
            .and_then(|raw| RequesterId::new(raw).ok())
    }

    /// Return the catalogue base URL, falling back to the public site.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not an absolute URL.
    pub fn resolver_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.resolver_base_url
                .as_deref()
                .unwrap_or(DEFAULT_RESOLVER_BASE_URL),
        )
    }

    /// Return the per-lookup timeout, never shorter than one second.
    pub fn resolver_timeout(&self) -> Duration {
        let secs = self
            .resolver_timeout_secs
            .unwrap_or(DEFAULT_RESOLVER_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Return the pool size, never smaller than one connection.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE).max(1)
    }

    /// Return the pool checkout timeout, never shorter than one second.
    pub fn pool_checkout_timeout(&self) -> Duration {
        let secs = self
            .pool_checkout_timeout_secs
            .unwrap_or(DEFAULT_POOL_CHECKOUT_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }
}
