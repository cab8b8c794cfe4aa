//! Inbound chat message delivered by a transport adapter.

use crate::domain::RequesterId;

/// One authenticated message addressed to the interpreter.
///
/// The transport adapter is the sole authority on `sender`; the interpreter
/// trusts it as "self" for self-service commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    sender: RequesterId,
    display_name: String,
    text: String,
}

impl InboundMessage {
    /// Build a message, falling back to an identity preview when the
    /// transport could not resolve a display name.
    ///
    /// # Examples
    /// ```
    /// use wishlist_backend::domain::{InboundMessage, RequesterId};
    ///
    /// let sender = RequesterId::new("U0123456789abcdef").expect("valid id");
    /// let message = InboundMessage::new(sender, None, "@view");
    /// assert_eq!(message.display_name(), "U0123456");
    /// ```
    pub fn new(
        sender: RequesterId,
        display_name: Option<String>,
        text: impl Into<String>,
    ) -> Self {
        let display_name = display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| sender.preview());
        Self {
            sender,
            display_name,
            text: text.into(),
        }
    }

    /// Identity the transport authenticated.
    pub fn sender(&self) -> &RequesterId {
        &self.sender
    }

    /// Human-readable sender name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Raw message text as received.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sender() -> RequesterId {
        RequesterId::new("Uffeeddccbbaa9988").expect("valid id")
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn missing_display_name_uses_identity_preview(#[case] display_name: Option<String>) {
        let message = InboundMessage::new(sender(), display_name, "@view");
        assert_eq!(message.display_name(), "Uffeeddc");
    }

    #[rstest]
    fn provided_display_name_is_kept() {
        let message = InboundMessage::new(sender(), Some("Mei".to_owned()), " @add C3CW ");
        assert_eq!(message.display_name(), "Mei");
        assert_eq!(message.text(), " @add C3CW ");
        assert_eq!(message.sender(), &sender());
    }
}
