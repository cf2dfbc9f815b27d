//! Classification of request paths into page names.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::PageName;

static VIEW_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^/([a-zA-Z0-9_-]*)$").expect("view path pattern compiles"));
static EDIT_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^/e/([a-zA-Z0-9_-]+)$").expect("edit path pattern compiles"));

/// Which flow a path is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    View,
    Edit,
}

/// Resolve a raw URL path to a page name, or `None` if it is not a page path.
///
/// In view mode `/` resolves to the home page. Edit paths must name a page.
pub fn parse_page_path(path: &str, mode: PathMode) -> Option<PageName> {
    let pattern = match mode {
        PathMode::View => &VIEW_PATH,
        PathMode::Edit => &EDIT_PATH,
    };
    let name = pattern.captures(path)?.get(1)?.as_str();
    if name.is_empty() {
        return Some(PageName::home());
    }
    PageName::new(name)
}
