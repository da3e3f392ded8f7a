//! Bookmark CRUD routes. The `/:id` routes share the record lookup in [`load_bookmark`].

use crate::handlers::bookmark::{create, delete as delete_handler, list, load_bookmark, read, update};
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn bookmark_routes(state: AppState) -> Router {
    let by_id = Router::new()
        .route("/bookmarks/:id", get(read).patch(update).delete(delete_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), load_bookmark));

    Router::new()
        .route("/bookmarks", get(list).post(create))
        .merge(by_id)
        .with_state(state)
}
