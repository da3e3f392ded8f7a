//! Request extractors that reject with [`crate::error::AppError`].

mod json_body;
pub use json_body::JsonBody;
