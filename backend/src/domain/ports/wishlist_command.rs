//! Driving port for interpreting inbound chat messages.

use async_trait::async_trait;

use crate::domain::{Error, InboundMessage};

/// Domain use-case port for turning one inbound message into at most one
/// reply.
#[async_trait]
pub trait WishlistCommand: Send + Sync {
    /// Interpret `message`.
    ///
    /// `Ok(None)` means the text was not a command and nothing should be sent.
    async fn handle(&self, message: &InboundMessage) -> Result<Option<String>, Error>;
}
