//! Request validation for bookmark writes.

use crate::error::AppError;
use crate::model::{BookmarkPatch, NewBookmark};
use serde_json::{Map, Value};

/// Recognized body fields, in the order the create check reports them.
pub const BOOKMARK_FIELDS: [&str; 4] = ["title", "url", "description", "rating"];

pub const EMPTY_UPDATE_MESSAGE: &str = "Request body must contain something to update";

pub struct RequestValidator;

impl RequestValidator {
    /// All four fields must be present and non-null. Reports the first missing one.
    pub fn validate_create(body: &Map<String, Value>) -> Result<NewBookmark, AppError> {
        for field in BOOKMARK_FIELDS {
            if body.get(field).map_or(true, Value::is_null) {
                return Err(AppError::Validation(format!(
                    "Missing '{}' in request body",
                    field
                )));
            }
        }
        Ok(NewBookmark {
            title: required_text(body, "title")?,
            url: required_text(body, "url")?,
            description: required_text(body, "description")?,
            rating: required_number(body, "rating")?,
        })
    }

    /// At least one recognized field must be truthy. `0`, `""`, `false` and `null` count as absent.
    ///
    /// Once that holds, every present non-null field is applied, so `{"title": "x", "rating": 0}`
    /// does set the rating to zero.
    pub fn validate_update(body: &Map<String, Value>) -> Result<BookmarkPatch, AppError> {
        let truthy = BOOKMARK_FIELDS
            .iter()
            .filter(|field| body.get(**field).is_some_and(is_truthy))
            .count();
        if truthy == 0 {
            return Err(AppError::Validation(EMPTY_UPDATE_MESSAGE.to_string()));
        }
        Ok(BookmarkPatch {
            title: optional_text(body, "title")?,
            url: optional_text(body, "url")?,
            description: optional_text(body, "description")?,
            rating: optional_number(body, "rating")?,
        })
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn optional_text(body: &Map<String, Value>, field: &str) -> Result<Option<String>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::Validation(format!("'{}' must be a string", field))),
    }
}

fn optional_number(body: &Map<String, Value>, field: &str) -> Result<Option<f64>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("'{}' must be a number", field))),
        Some(_) => Err(AppError::Validation(format!("'{}' must be a number", field))),
    }
}

fn required_text(body: &Map<String, Value>, field: &'static str) -> Result<String, AppError> {
    optional_text(body, field)?
        .ok_or_else(|| AppError::Validation(format!("Missing '{}' in request body", field)))
}

fn required_number(body: &Map<String, Value>, field: &'static str) -> Result<f64, AppError> {
    optional_number(body, field)?
        .ok_or_else(|| AppError::Validation(format!("Missing '{}' in request body", field)))
}
