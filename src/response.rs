//! Response shapes for bookmark routes. Every record leaving through here is sanitized.

use crate::model::Bookmark;
use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

pub fn success_one(bookmark: &Bookmark) -> (StatusCode, Json<Bookmark>) {
    (StatusCode::OK, Json(bookmark.sanitized()))
}

pub fn success_many(bookmarks: &[Bookmark]) -> (StatusCode, Json<Vec<Bookmark>>) {
    (
        StatusCode::OK,
        Json(bookmarks.iter().map(Bookmark::sanitized).collect()),
    )
}

/// 201 with `Location: <collection_path>/<id>`.
pub fn created(collection_path: &str, bookmark: &Bookmark) -> Response {
    let location = format!("{}/{}", collection_path.trim_end_matches('/'), bookmark.id);
    (
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(bookmark.sanitized()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark() -> Bookmark {
        Bookmark {
            id: 7,
            title: "<script>x</script>".into(),
            url: "https://example.com/?q=<b>".into(),
            description: "plain".into(),
            rating: 2.0,
        }
    }

    #[test]
    fn created_points_location_at_new_record() {
        let response = created("/api/bookmarks/", &bookmark());
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[LOCATION], "/api/bookmarks/7");
    }

    #[test]
    fn reads_sanitize_title_but_not_url() {
        let (status, Json(body)) = success_one(&bookmark());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.title, "&lt;script&gt;x&lt;/script&gt;");
        assert_eq!(body.url, "https://example.com/?q=<b>");
    }
}
