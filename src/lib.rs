//! miniwiki - a personal wiki serving a directory of Markdown files
//!
//! Pages are `<name>.md` files rendered to HTML on every request. When an
//! edit password is configured, pages can be created, changed and deleted
//! from the browser.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use app::create_router;
pub use auth::AuthGate;
pub use config::{Config, WikiConfig};
pub use controller::{Outcome, PageController};
pub use errors::WikiError;
pub use services::{FileService, MarkdownRenderer, MarkdownService, PageStore};
pub use types::{AppState, EditSubmission, PageName, PageView};
