//! Item name extraction from Jelly Journal product pages.
//!
//! The product page carries the item name in its first `<h1>`. Unknown codes
//! render a generic library page whose heading mentions the catalogue itself.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Heading shown on the catalogue landing page instead of an item page.
const GENERIC_TITLE: &str = "Jellycat Library";

static HEADING_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn compile(slot: &'static OnceLock<Regex>, pattern: &str, label: &str) -> &'static Regex {
    slot.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("{label} regex failed to compile: {error}"))
    })
}

fn heading_regex() -> &'static Regex {
    compile(&HEADING_RE, r"(?is)<h1(?:\s[^>]*)?>(.*?)</h1\s*>", "heading")
}

fn tag_regex() -> &'static Regex {
    compile(&TAG_RE, r"(?s)<[^>]*>", "tag")
}

fn entity_regex() -> &'static Regex {
    compile(&ENTITY_RE, r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);", "entity")
}

/// Return the item name on `html`, or `None` for pages without a usable
/// heading.
pub(super) fn item_title(html: &str) -> Option<String> {
    let inner = heading_regex().captures(html)?.get(1)?.as_str();
    let text = tag_regex().replace_all(inner, " ");
    let decoded = decode_entities(&text);
    let title = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() || title.contains(GENERIC_TITLE) {
        return None;
    }
    Some(title)
}

fn decode_entities(text: &str) -> String {
    entity_regex()
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            decode_entity(name).map_or_else(|| caps[0].to_owned(), String::from)
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(decimal) = name.strip_prefix('#') {
        return decimal.parse::<u32>().ok().and_then(char::from_u32);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}
