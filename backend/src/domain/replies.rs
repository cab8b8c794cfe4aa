//! Reply templates.
//!
//! Users and admins recognise these strings verbatim, so every template is
//! reproduced byte for byte, including trailing spaces and newlines.

use crate::domain::{ItemCode, QueuedItem};

/// Shown to non-admins who try an admin command.
pub const PERMISSION_DENIED: &str = "⚠️ 這個指令只有管理員可以使用。";

/// `@add` without arguments.
pub const ADD_USAGE: &str = "把想要找的Jellycat加入排隊清單吧！:\n請找到商品代碼加入排隊清單喔\n舉例: @add BARL2BR, C3CW \n";
/// `@add` with arguments but no codes.
pub const ADD_INVALID: &str = "🤔請提供正確的Jellycat商品編號，例如：@add BARL2BR, C3CW";

/// `@remove` without arguments.
pub const REMOVE_USAGE: &str = "退出排隊清單:\n請找到商品代碼退出排隊清單喔\n舉例: @remove BARL2BR, C3CW \n";
/// `@remove` with arguments but no codes.
pub const REMOVE_INVALID: &str = "🤔請提供正確的Jellycat商品編號，例如：@remove BARL2BR, C3CW";

/// `@view` for a sender with no entries.
pub const VIEW_EMPTY: &str = "您目前沒有任何排隊中的商品。\n請用 @add <SKU> 來加入一個吧！";
const VIEW_HEADER: &str = "📋您的排隊清單：";

/// `@count` without arguments.
pub const COUNT_USAGE: &str = "查看特定商品的排隊清單:\n請找到商品代碼加入排隊清單喔\n舉例: @count BARL2BR \n";
/// `@count` with arguments but no codes.
pub const COUNT_INVALID: &str = "🤔 請提供正確的Jellycat商品代碼，例如：@count BARL2BR";

/// `@adminadd` without arguments.
pub const ADMIN_ADD_USAGE: &str = "🛠 管理員用法：@adminadd <名字> <SKU1>, <SKU2>...\n例如：@adminadd Alice Chen OT6SDP, C3CW";
/// `@adminadd` without a name before the codes.
pub const ADMIN_ADD_MISSING_NAME: &str = "🤔 請先輸入名字，再輸入 SKU。\n例如：@adminadd Alice Chen OT6SDP";
/// `@adminadd` with a name but no codes.
pub const ADMIN_ADD_NO_CODES: &str = "🤔 看不出來有任何 SKU，請試試：@adminadd Alice Chen OT6SDP, C3CW";

/// `@adminremove` without arguments.
pub const ADMIN_REMOVE_USAGE: &str = "🛠 管理員用法：@adminremove <名字> <SKU>\n例如：@adminremove Alice Chen OT6SDP";
/// `@adminremove` without a name before the code.
pub const ADMIN_REMOVE_MISSING_NAME: &str = "🤔 請先輸入名字，再輸入 SKU。\n例如：@adminremove Alice Chen OT6SDP";
/// `@adminremove` with a name but no code.
pub const ADMIN_REMOVE_NO_CODES: &str = "🤔 看不出來有任何 SKU，請試試：@adminremove Alice Chen OT6SDP";

/// `@list` without arguments.
pub const ADMIN_LIST_USAGE: &str = "🧾 Admin usage: @list <SKU>\nExample: @list OT6SDP";
/// `@list` with arguments but no codes.
pub const ADMIN_LIST_INVALID: &str = "🤔 Please provide a valid SKU, e.g. @list OT6SDP";

pub(crate) fn add_lookup_failed(code: &ItemCode) -> String {
    format!("{code}: 現在無法連線，請稍後再試一次")
}

pub(crate) fn add_not_found(code: &ItemCode) -> String {
    format!("{code}: ❌找不到此商品編號。\n請檢查是否輸入正確的編號 (如 BARL2BR) 並再試一次。")
}

pub(crate) fn add_queued(item_name: &str, code: &ItemCode, position: u64) -> String {
    format!("🤍已將您加入{item_name}（{code}）的排隊清單，目前排第 {position} 位。")
}

pub(crate) fn admin_add_lookup_failed(code: &ItemCode) -> String {
    format!("⚠️ {code}：目前無法連線到 Jelly Journal，請稍後再試。")
}

pub(crate) fn admin_add_not_found(code: &ItemCode) -> String {
    format!("❌ {code}：在 Jelly Journal 上找不到這個 SKU。")
}

pub(crate) fn admin_add_queued(name: &str, item_name: &str, code: &ItemCode, position: u64) -> String {
    format!("🧸 已將「{name}」加入「{item_name}」（{code}）的心願清單，目前排第 {position} 名。")
}

pub(crate) fn removed(item_name: &str) -> String {
    format!("已將您從{item_name}的排隊清單中移除。")
}

pub(crate) fn not_queued(code: &ItemCode) -> String {
    format!("您沒有加入{code}的排隊清單喔！")
}

pub(crate) fn admin_removed(name: &str, item_name: &str, code: &ItemCode) -> String {
    format!("🗑️ 已將「{name}」從「{item_name}」（{code}）的心願清單中移除。")
}

pub(crate) fn admin_not_queued(name: &str, code: &ItemCode) -> String {
    format!("❓ 在 {code} 的心願清單中找不到名字「{name}」。")
}

pub(crate) fn view(items: &[QueuedItem]) -> String {
    if items.is_empty() {
        return VIEW_EMPTY.to_owned();
    }
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(VIEW_HEADER.to_owned());
    lines.extend(items.iter().map(|item| {
        format!(
            "🤍{}（{}）：您是第 {} 位，此列表共有 {} 人。",
            item.item_name, item.code, item.position, item.total
        )
    }));
    lines.join("\n")
}

/// Label a code with its item name when one is known.
pub(crate) fn item_label(code: &ItemCode, item_name: Option<&str>) -> String {
    match item_name {
        Some(name) if !name.is_empty() => format!("{code} – {name}"),
        _ => code.to_string(),
    }
}

pub(crate) fn count(label: &str, total: u64) -> String {
    match total {
        0 => format!("{label}：目前沒有人在這個排隊清單上，您可以當第一個喔！"),
        1 => format!("{label}：目前只有 1 個人在排隊清單上。"),
        n => format!("{label}：目前有 {n} 個人在排隊清單上。"),
    }
}

pub(crate) fn admin_list_empty(code: &ItemCode) -> String {
    format!("📭 {code}: there is nobody on this wishlist yet.")
}

pub(crate) fn admin_list<'a>(label: &str, names: impl IntoIterator<Item = &'a str>) -> String {
    let mut lines = vec![format!("Waiting list for {label}:")];
    lines.extend(
        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| format!("{}. {name}", index + 1)),
    );
    lines.join("\n")
}
