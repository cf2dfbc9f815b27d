//! Request flows for viewing and editing pages.
//!
//! The controller decides what a request results in and returns it as an
//! [`Outcome`]; turning that into HTTP happens in `handlers`. It only sees
//! the page store and renderer through their traits.

use log::{debug, info, warn};

use crate::config::WikiConfig;
use crate::errors::WikiError;
use crate::services::{MarkdownRenderer, PageStore};
use crate::types::{EditSubmission, PageName, PageView};
use crate::utils::{parse_page_path, PathMode};

/// Body shown for a missing page on a wiki that cannot create it.
pub const MISSING_PAGE_BODY: &str = "<p>This page does not exist.</p>";

/// Result of one request flow.
#[derive(Debug)]
pub enum Outcome {
    /// 200 with the rendered page.
    Render(PageView),
    /// 404 with the rendered page.
    Missing(PageView),
    /// 302 to the given location.
    Found(String),
    /// Permanent redirect to the given location.
    Moved(String),
    /// Generic 500.
    Failed(WikiError),
}

pub struct PageController<'a> {
    wiki: &'a WikiConfig,
    store: &'a dyn PageStore,
    renderer: &'a dyn MarkdownRenderer,
}

impl<'a> PageController<'a> {
    pub fn new(wiki: &'a WikiConfig, store: &'a dyn PageStore, renderer: &'a dyn MarkdownRenderer) -> Self {
        Self { wiki, store, renderer }
    }

    /// `GET /<name>`
    pub fn view(&self, path: &str) -> Outcome {
        let Some(name) = parse_page_path(path, PathMode::View) else {
            debug!("Rejected view path {:?}", path);
            return Outcome::Moved("/".to_string());
        };

        match self.store.read(&name) {
            Ok(Some(source)) => {
                let html = self.renderer.render(&source);
                Outcome::Render(self.page_view(&name, html, false))
            }
            Ok(None) if self.wiki.editable() => {
                debug!("Page {} does not exist, offering to create it", name);
                Outcome::Found(name.edit_url())
            }
            Ok(None) => Outcome::Missing(self.page_view(&name, MISSING_PAGE_BODY.to_string(), false)),
            Err(e) => Outcome::Failed(e),
        }
    }

    /// `GET /e/<name>`
    pub fn edit_form(&self, path: &str) -> Outcome {
        let name = match self.edit_target(path) {
            Ok(name) => name,
            Err(outcome) => return outcome,
        };

        // A missing page just means an empty form; the file appears on first save.
        match self.store.read(&name) {
            Ok(source) => Outcome::Render(self.page_view(&name, source.unwrap_or_default(), true)),
            Err(e) => Outcome::Failed(e),
        }
    }

    /// `POST /e/<name>`
    ///
    /// `submission` is the parsed form, or why it could not be parsed.
    pub fn submit(&self, path: &str, submission: Result<EditSubmission, WikiError>) -> Outcome {
        let name = match self.edit_target(path) {
            Ok(name) => name,
            Err(outcome) => return outcome,
        };
        let submission = match submission {
            Ok(submission) => submission,
            Err(e) => return Outcome::Failed(e),
        };

        if !self.wiki.auth.verify(&submission.pass) {
            warn!("Rejected edit of page {}: wrong password", name);
            return Outcome::Render(self.page_view(&name, submission.body, true));
        }

        if submission.body.is_empty() {
            return match self.store.delete(&name) {
                Ok(()) => {
                    info!("Page {} deleted by empty submission", name);
                    Outcome::Moved("/".to_string())
                }
                Err(e) => Outcome::Failed(e),
            };
        }

        match self.store.write(&name, &submission.body) {
            Ok(()) => Outcome::Found(name.view_url()),
            Err(e) => Outcome::Failed(e),
        }
    }

    /// Validate an edit path and check that editing is enabled at all.
    fn edit_target(&self, path: &str) -> Result<PageName, Outcome> {
        let Some(name) = parse_page_path(path, PathMode::Edit) else {
            debug!("Rejected edit path {:?}", path);
            return Err(Outcome::Moved("/".to_string()));
        };
        if !self.wiki.editable() {
            return Err(Outcome::Found(name.view_url()));
        }
        Ok(name)
    }

    fn page_view(&self, name: &PageName, body: String, edit_page: bool) -> PageView {
        PageView {
            wiki_name: self.wiki.name.clone(),
            wiki_editable: self.wiki.editable(),
            page_name: name.to_string(),
            body,
            edit_page,
        }
    }
}
