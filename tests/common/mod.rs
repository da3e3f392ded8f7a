#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use bookmarks_api::{
    build_app, AppState, Bookmark, BookmarkPatch, BookmarkStore, MemoryBookmarkStore, NewBookmark,
    ServerConfig, StorageError,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

pub fn test_config() -> ServerConfig {
    ServerConfig::new(TOKEN)
}

pub fn make_bookmarks() -> Vec<Bookmark> {
    vec![
        Bookmark {
            id: 1,
            title: "Google".into(),
            url: "https://www.google.com".into(),
            description: "Where we find everything else".into(),
            rating: 4.0,
        },
        Bookmark {
            id: 2,
            title: "Thinkful".into(),
            url: "https://www.thinkful.com".into(),
            description: "Think outside the classroom".into(),
            rating: 5.0,
        },
        Bookmark {
            id: 3,
            title: "Github".into(),
            url: "https://www.github.com".into(),
            description: "brings together the world's largest community of developers".into(),
            rating: 4.5,
        },
    ]
}

pub fn make_malicious_bookmark() -> Bookmark {
    Bookmark {
        id: 911,
        title: r#"Naughty naughty very naughty <script>alert("xss");</script>"#.into(),
        url: "http://www.malicious.com".into(),
        description: r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#.into(),
        rating: 1.0,
    }
}

pub fn build_test_app(bookmarks: Vec<Bookmark>) -> Router {
    build_app_with(
        Arc::new(MemoryBookmarkStore::with_bookmarks(bookmarks)),
        test_config(),
    )
}

pub fn build_app_with(store: Arc<dyn BookmarkStore>, config: ServerConfig) -> Router {
    build_app(AppState::new(store, config))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    send_with_auth(app, method, uri, body, Some(&format!("Bearer {}", TOKEN))).await
}

pub async fn send_with_auth(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    authorization: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Authorized request with a raw body and an optional `Content-Type`.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: &str,
    content_type: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", TOKEN));
    if let Some(value) = content_type {
        builder = builder.header(CONTENT_TYPE, value);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Store whose every operation fails the way a dropped connection pool would.
pub struct FailingStore;

fn pool_timeout() -> StorageError {
    StorageError::Db(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl BookmarkStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        Err(pool_timeout())
    }

    async fn get_by_id(&self, _id: i64) -> Result<Option<Bookmark>, StorageError> {
        Err(pool_timeout())
    }

    async fn insert(&self, _new: NewBookmark) -> Result<Bookmark, StorageError> {
        Err(pool_timeout())
    }

    async fn update(&self, _id: i64, _patch: BookmarkPatch) -> Result<u64, StorageError> {
        Err(pool_timeout())
    }

    async fn delete(&self, _id: i64) -> Result<u64, StorageError> {
        Err(pool_timeout())
    }
}
