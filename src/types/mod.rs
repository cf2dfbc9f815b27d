use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::config::WikiConfig;
use crate::controller::PageController;
use crate::services::{FileService, MarkdownRenderer, MarkdownService, PageStore};

static PAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9_-]+$").expect("page name pattern compiles"));

/// Name the empty view path resolves to.
pub const HOME_PAGE: &str = "home";

/// A validated page identifier, used both as URL segment and file stem.
///
/// Only ASCII letters, digits, `_` and `-` are allowed, so a `PageName` can
/// never contain a separator or a traversal sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageName(String);

impl PageName {
    /// Validate a non-empty identifier.
    pub fn new(name: &str) -> Option<Self> {
        PAGE_NAME.is_match(name).then(|| Self(name.to_string()))
    }

    /// The page served at `/`.
    pub fn home() -> Self {
        Self(HOME_PAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of the view flow for this page.
    pub fn view_url(&self) -> String {
        format!("/{}", self.0)
    }

    /// URL of the edit flow for this page.
    pub fn edit_url(&self) -> String {
        format!("/e/{}", self.0)
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request-scoped input of the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub wiki_name: String,
    pub wiki_editable: bool,
    pub page_name: String,
    /// Raw source when editing, rendered HTML when viewing.
    pub body: String,
    pub edit_page: bool,
}

/// Fields posted by the edit form. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditSubmission {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub pass: String,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub wiki: Arc<WikiConfig>,
    pub store: Arc<dyn PageStore>,
    pub renderer: Arc<dyn MarkdownRenderer>,
}

impl AppState {
    /// State backed by the page directory of `wiki` and the pulldown-cmark renderer.
    pub fn new(wiki: WikiConfig) -> Self {
        let store = FileService::new(wiki.dir.clone());
        Self {
            wiki: Arc::new(wiki),
            store: Arc::new(store),
            renderer: Arc::new(MarkdownService::new()),
        }
    }

    pub fn controller(&self) -> PageController<'_> {
        PageController::new(&self.wiki, self.store.as_ref(), self.renderer.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_identifier_characters() {
        for name in ["About", "foo_bar-2", "a", "Z9", "-", "_"] {
            assert!(PageName::new(name).is_some(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_separators_and_traversal() {
        for name in ["", "..", "../etc/passwd", "a/b", "a\\b", "a.md", "with space", "ümlaut", "a\n"] {
            assert!(PageName::new(name).is_none(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn urls() {
        let name = PageName::new("About").unwrap();
        assert_eq!(name.view_url(), "/About");
        assert_eq!(name.edit_url(), "/e/About");
        assert_eq!(PageName::home().as_str(), "home");
    }
}
