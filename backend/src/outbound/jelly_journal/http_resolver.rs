//! Reqwest-backed Jelly Journal item resolver.
//!
//! This adapter owns transport details only: building the lookup URL,
//! bounding each request with a timeout, mapping transport failures, and
//! handing the page body to [`super::page`] for name extraction.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::page::item_title;
use crate::domain::ItemCode;
use crate::domain::ports::{ItemResolver, ItemResolverError, ResolvedItem};

const LOOKUP_PATH: &str = "jellycat.php";
const DEFAULT_USER_AGENT: &str = "wishlist-backend/0.1";

/// Errors raised while constructing the resolver.
#[derive(Debug, thiserror::Error)]
pub enum JellyJournalSetupError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The lookup endpoint could not be derived from the base URL.
    #[error("invalid resolver base URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Item resolver that performs one HTTP GET per lookup.
///
/// There is no retry: a failed attempt is reported to the caller at once.
pub struct JellyJournalResolver {
    client: Client,
    endpoint: Url,
}

impl JellyJournalResolver {
    /// Build a resolver for the site rooted at `base`, bounding each lookup
    /// by `timeout`.
    /// ```rust,ignore
    /// let resolver = JellyJournalResolver::new(base, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// lookup endpoint cannot be joined onto `base`.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, JellyJournalSetupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: lookup_endpoint(base)?,
        })
    }

    fn lookup_url(&self, code: &ItemCode) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("sku", code.as_str());
        url
    }
}

/// Resolve `jellycat.php` relative to `base`, treating `base` as a directory.
fn lookup_endpoint(mut base: Url) -> Result<Url, url::ParseError> {
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }
    base.join(LOOKUP_PATH)
}

#[async_trait]
impl ItemResolver for JellyJournalResolver {
    async fn resolve(&self, code: &ItemCode) -> Result<Option<ResolvedItem>, ItemResolverError> {
        let response = self
            .client
            .get(self.lookup_url(code))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(code = %code, status = status.as_u16(), "item lookup returned no page");
            return Ok(None);
        }

        let url = response.url().to_string();
        let body = response.bytes().await.map_err(map_transport_error)?;
        let Some(name) = item_title(&String::from_utf8_lossy(&body)) else {
            debug!(code = %code, "item page has no usable title");
            return Ok(None);
        };

        Ok(Some(ResolvedItem {
            code: code.clone(),
            name,
            url,
        }))
    }
}

fn map_transport_error(error: reqwest::Error) -> ItemResolverError {
    if error.is_timeout() {
        ItemResolverError::timeout(error.to_string())
    } else if error.is_decode() {
        ItemResolverError::decode(error.to_string())
    } else {
        ItemResolverError::transport(error.to_string())
    }
}
