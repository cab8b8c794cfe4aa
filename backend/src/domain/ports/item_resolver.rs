//! Driven port for resolving product codes to human-readable names.

use async_trait::async_trait;

use crate::domain::ItemCode;

use super::define_port_error;

/// Catalogue entry returned for a known code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    /// Canonical code as reported by the catalogue.
    pub code: ItemCode,
    /// Display name of the product.
    pub name: String,
    /// Page the name was read from.
    pub url: String,
}

define_port_error! {
    /// Errors surfaced while calling the catalogue source.
    pub enum ItemResolverError {
        /// Network transport failed before a usable response arrived.
        Transport { message: String } => "item lookup transport failed: {message}",
        /// Lookup exceeded its deadline.
        Timeout { message: String } => "item lookup timed out: {message}",
        /// Response body could not be read.
        Decode { message: String } => "item lookup response decode failed: {message}",
    }
}

/// Port mapping a product code to its catalogue entry.
///
/// `Ok(None)` means the catalogue answered and does not know the code.
/// `Err` means the catalogue could not be asked; callers treat every variant
/// as transient and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemResolver: Send + Sync {
    /// Look up `code`.
    async fn resolve(&self, code: &ItemCode) -> Result<Option<ResolvedItem>, ItemResolverError>;
}
