//! Route tables.

mod bookmarks;

pub use bookmarks::bookmark_routes;
