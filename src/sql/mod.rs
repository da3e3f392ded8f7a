//! Statement builder for the bookmarks relation: fixed identifiers, values always bound as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
