//! Request pipeline stages that run around the bookmark routes.
//!
//! - [`auth::require_bearer_token`] rejects requests without the shared secret.
//! - [`faults::render_storage_faults`] decides how much of a storage failure a 500 reveals.

pub mod auth;
pub mod faults;

pub use auth::require_bearer_token;
pub use faults::render_storage_faults;
