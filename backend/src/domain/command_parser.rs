//! Command-token dispatch and argument parsing.
//!
//! Messages are matched by a case-insensitive token prefix. Admin tokens are
//! checked first so `@adminadd` is never mistaken for `@add`.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::ItemCode;

/// Action selected by a message's leading token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// `@add`: join one or more queues.
    Add,
    /// `@remove`: leave a queue.
    Remove,
    /// `@view`: list the sender's queues.
    View,
    /// `@count`: report a queue's length.
    Count,
    /// `@adminadd`: join queues on behalf of a named person.
    AdminAdd,
    /// `@adminremove`: remove a named person from a queue.
    AdminRemove,
    /// `@list`: show a queue in arrival order.
    AdminList,
}

impl CommandAction {
    /// Literal token that selects this action.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Add => "@add",
            Self::Remove => "@remove",
            Self::View => "@view",
            Self::Count => "@count",
            Self::AdminAdd => "@adminadd",
            Self::AdminRemove => "@adminremove",
            Self::AdminList => "@list",
        }
    }

    /// Whether only the configured admin may run this action.
    pub const fn requires_admin(self) -> bool {
        matches!(self, Self::AdminAdd | Self::AdminRemove | Self::AdminList)
    }
}

const DISPATCH_ORDER: [CommandAction; 7] = [
    CommandAction::AdminAdd,
    CommandAction::AdminRemove,
    CommandAction::AdminList,
    CommandAction::Add,
    CommandAction::Remove,
    CommandAction::View,
    CommandAction::Count,
];

/// A recognised command and its trimmed argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Selected action.
    pub action: CommandAction,
    /// Text following the token, trimmed.
    pub args: &'a str,
}

/// Match the leading command token of `text`.
///
/// Returns `None` when no token matches; such messages get no reply.
///
/// # Examples
/// ```
/// use wishlist_backend::domain::{CommandAction, parse_command};
///
/// let parsed = parse_command("  @ADD barl2br ").expect("recognised");
/// assert_eq!(parsed.action, CommandAction::Add);
/// assert_eq!(parsed.args, "barl2br");
/// ```
pub fn parse_command(text: &str) -> Option<ParsedCommand<'_>> {
    let text = text.trim();
    DISPATCH_ORDER.into_iter().find_map(|action| {
        let token = action.token();
        let prefix = text.get(..token.len())?;
        if !prefix.eq_ignore_ascii_case(token) {
            return None;
        }
        let args = text.get(token.len()..).unwrap_or_default().trim();
        Some(ParsedCommand { action, args })
    })
}

/// Split a code list on commas and whitespace runs, uppercasing each token.
///
/// # Examples
/// ```
/// use wishlist_backend::domain::parse_codes;
///
/// let codes = parse_codes("barl2br, C3CW  ot6sdp");
/// let raw: Vec<&str> = codes.iter().map(|code| code.as_str()).collect();
/// assert_eq!(raw, ["BARL2BR", "C3CW", "OT6SDP"]);
/// ```
pub fn parse_codes(args: &str) -> Vec<ItemCode> {
    args.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|token| ItemCode::new(token).ok())
        .collect()
}

static CODE_SHAPED_RE: OnceLock<Regex> = OnceLock::new();

fn code_shaped_token() -> &'static Regex {
    CODE_SHAPED_RE.get_or_init(|| {
        // Uppercase only; lowercase words stay part of the name.
        Regex::new("[A-Z0-9]{3,10}")
            .unwrap_or_else(|error| panic!("code-shaped token regex failed to compile: {error}"))
    })
}

/// Name and codes parsed from an admin argument string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamedCodes {
    /// Free-text name before the first code-shaped token, trimmed.
    pub name: String,
    /// Codes from the first code-shaped token onward.
    pub codes: Vec<ItemCode>,
}

/// Split `args` at the first code-shaped token.
///
/// A code-shaped token is a run of 3 to 10 uppercase ASCII letters or digits.
/// Names containing such a run are split early; admins rely on that boundary
/// so it is kept as is. Without any code-shaped token both parts are empty.
///
/// # Examples
/// ```
/// use wishlist_backend::domain::split_name_and_codes;
///
/// let parsed = split_name_and_codes("Alice Chen OT6SDP, C3CW");
/// assert_eq!(parsed.name, "Alice Chen");
/// assert_eq!(parsed.codes.len(), 2);
/// ```
pub fn split_name_and_codes(args: &str) -> NamedCodes {
    let Some(found) = code_shaped_token().find(args) else {
        return NamedCodes::default();
    };
    let (name, codes) = args.split_at(found.start());
    NamedCodes {
        name: name.trim().to_owned(),
        codes: parse_codes(codes),
    }
}
