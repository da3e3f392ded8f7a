//! JSON object body whose rejections use the standard error envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde_json::{Map, Value};

/// Request body parsed as a JSON object.
///
/// A body that is not declared as JSON, or an empty JSON body, reads as `{}` so the field
/// validation reports what is missing. Malformed JSON or a non-object body rejects with 400.
#[derive(Clone, Debug)]
pub struct JsonBody(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(JsonBody(Map::new()));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Map::new()));
        }
        let Json(value) = Json::<Value>::from_bytes(&bytes)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        match value {
            Value::Object(map) => Ok(JsonBody(map)),
            _ => Err(AppError::BadRequest("Request body must be a JSON object".into())),
        }
    }
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn recognizes_json_content_types() {
        assert!(is_json_content_type(&headers("application/json")));
        assert!(is_json_content_type(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json_content_type(&headers("application/merge-patch+json")));
    }

    #[test]
    fn other_or_missing_content_types_are_not_json() {
        assert!(!is_json_content_type(&HeaderMap::new()));
        assert!(!is_json_content_type(&headers("text/plain")));
        assert!(!is_json_content_type(&headers("application/x-www-form-urlencoded")));
    }
}
