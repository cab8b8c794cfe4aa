//! Domain primitives, ports and the command interpreter.
//!
//! Purpose: keep queue semantics and reply rendering independent of any
//! transport or storage technology. Adapters in `outbound` implement the
//! driven ports; transports call the [`ports::WishlistCommand`] driving port.
//!
//! Public surface:
//! - Error (alias to `error::Error`) with a stable `ErrorCode`.
//! - Wishlist value types (`ItemCode`, `RequesterId`, `WishlistEntry`, ...).
//! - `WishlistCommandService`, the interpreter implementing the driving port.

pub mod command_parser;
pub mod error;
pub mod inbound_message;
pub mod ports;
pub mod replies;
pub mod wishlist;
pub mod wishlist_commands;

pub use self::command_parser::{
    CommandAction, NamedCodes, ParsedCommand, parse_codes, parse_command, split_name_and_codes,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::inbound_message::InboundMessage;
pub use self::wishlist::{
    IDENTITY_PREVIEW_CHARS, InsertOutcome, ItemCode, MANUAL_IDENTITY_PREFIX, NewWishlistEntry,
    QueuedItem, RequesterId, WishlistEntry, WishlistValidationError,
};
pub use self::wishlist_commands::WishlistCommandService;
