//! Wishlist queue value types.
//!
//! A wishlist entry pairs one requester with one product code. Entries for the
//! same code form a queue ordered by their arrival marker; positions are never
//! stored and are always derived from the live entry set.

use std::fmt;

use chrono::{DateTime, Utc};

/// Prefix reserved for identities synthesised from admin-typed names.
pub const MANUAL_IDENTITY_PREFIX: &str = "manual:";

/// Number of identity characters shown when no display name is available.
pub const IDENTITY_PREVIEW_CHARS: usize = 8;

/// Validation errors raised when constructing wishlist value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WishlistValidationError {
    /// The product code was empty after trimming.
    #[error("item code must not be empty")]
    EmptyItemCode,
    /// The product code contained whitespace or separators.
    #[error("item code must be a single token")]
    ItemCodeNotSingleToken,
    /// The requester identity was empty.
    #[error("requester identity must not be empty")]
    EmptyRequesterId,
}

/// Normalised (uppercased) product code.
///
/// # Examples
/// ```
/// use wishlist_backend::domain::ItemCode;
///
/// let code = ItemCode::new(" barl2br ").expect("valid code");
/// assert_eq!(code.as_str(), "BARL2BR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemCode(String);

impl ItemCode {
    /// Trim and uppercase a raw code token.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, WishlistValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WishlistValidationError::EmptyItemCode);
        }
        if trimmed.chars().any(|c| c == ',' || c.is_whitespace()) {
            return Err(WishlistValidationError::ItemCodeNotSingleToken);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Borrow the normalised code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ItemCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identity of a requester.
///
/// Real users carry the platform-assigned id. Admin-created entries carry a
/// synthetic identity derived from the typed name, so repeating a name maps to
/// the same identity without ever colliding with a platform id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequesterId(String);

impl RequesterId {
    /// Wrap a platform-assigned identity.
    pub fn new(raw: impl Into<String>) -> Result<Self, WishlistValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(WishlistValidationError::EmptyRequesterId);
        }
        Ok(Self(raw))
    }

    /// Build the synthetic identity used for admin-added entries.
    ///
    /// # Examples
    /// ```
    /// use wishlist_backend::domain::RequesterId;
    ///
    /// let id = RequesterId::manual("Alice Chen");
    /// assert_eq!(id.as_str(), "manual:Alice Chen");
    /// assert!(id.is_manual());
    /// ```
    pub fn manual(display_name: &str) -> Self {
        Self(format!("{MANUAL_IDENTITY_PREFIX}{display_name}"))
    }

    /// Whether this identity was synthesised by an admin command.
    pub fn is_manual(&self) -> bool {
        self.0.starts_with(MANUAL_IDENTITY_PREFIX)
    }

    /// Borrow the raw identity.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// First few characters of the identity, used when no name is known.
    pub fn preview(&self) -> String {
        self.0.chars().take(IDENTITY_PREVIEW_CHARS).collect()
    }
}

impl AsRef<str> for RequesterId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One live queue entry.
///
/// ## Invariants
/// - At most one entry exists per (`requester`, `code`).
/// - `arrival` is strictly increasing in insertion order within a code.
/// - `item_name` is fixed at insertion time and never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistEntry {
    /// Requester the entry belongs to.
    pub requester: RequesterId,
    /// Queue the entry sits in.
    pub code: ItemCode,
    /// Item name cached when the entry was created.
    pub item_name: String,
    /// Requester name shown in listings, when known.
    pub display_name: Option<String>,
    /// Arrival marker ordering entries within a code.
    pub arrival: i64,
    /// Wall-clock insertion time.
    pub created_at: DateTime<Utc>,
}

impl WishlistEntry {
    /// Name to show in admin listings, falling back to an identity preview.
    pub fn listing_name(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("(user {})", self.requester.preview()),
        }
    }
}

/// Everything the store needs to create an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWishlistEntry {
    /// Requester joining the queue.
    pub requester: RequesterId,
    /// Display name recorded alongside the entry.
    pub display_name: String,
    /// Queue being joined.
    pub code: ItemCode,
    /// Resolved item name to cache.
    pub item_name: String,
}

/// Result of an insert request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Live 1-based position of the requester's entry.
    pub position: u64,
    /// `false` when the (requester, code) pair already existed.
    pub inserted: bool,
}

/// One of a requester's entries with its live rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedItem {
    /// Queue the entry sits in.
    pub code: ItemCode,
    /// Cached item name.
    pub item_name: String,
    /// Live 1-based position within the queue.
    pub position: u64,
    /// Live number of entries in the queue.
    pub total: u64,
}
