//! Top-level rendering of storage failures.

use crate::error::{ErrorBody, StorageFault};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Storage failures leave the handlers as a generic 500. In development mode the body is
/// replaced with the underlying error text.
pub async fn render_storage_faults(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(StorageFault(detail)) = response.extensions_mut().remove::<StorageFault>() else {
        return response;
    };
    if !state.config.mode.exposes_error_detail() {
        return response;
    }
    (response.status(), Json(ErrorBody::new(detail))).into_response()
}
