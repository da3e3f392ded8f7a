//! Request rules applied before anything reaches the store.

mod validation;
pub use validation::{RequestValidator, BOOKMARK_FIELDS, EMPTY_UPDATE_MESSAGE};
