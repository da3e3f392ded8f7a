//! Bookmarks API: CRUD over a single bookmarks relation behind a static bearer token.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod sanitize;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use app::build_app;
pub use config::{RunMode, ServerConfig};
pub use error::{AppError, ConfigError, StorageError};
pub use model::{Bookmark, BookmarkPatch, NewBookmark};
pub use routes::bookmark_routes;
pub use sanitize::sanitize_html;
pub use service::RequestValidator;
pub use state::AppState;
pub use store::{
    ensure_bookmarks_table, ensure_database_exists, BookmarkStore, MemoryBookmarkStore,
    PgBookmarkStore,
};
