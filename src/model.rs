//! Bookmark record and the write payloads derived from request bodies.

use crate::sanitize::sanitize_html;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

impl Bookmark {
    /// Copy safe to hand to a client: `title` and `description` filtered, `url` and `rating` untouched.
    pub fn sanitized(&self) -> Bookmark {
        Bookmark {
            id: self.id,
            title: sanitize_html(&self.title),
            url: self.url.clone(),
            description: sanitize_html(&self.description),
            rating: self.rating,
        }
    }
}

/// Fields of a bookmark before the store assigns an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

impl NewBookmark {
    pub fn with_id(self, id: i64) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            description: self.description,
            rating: self.rating,
        }
    }
}

/// Partial update. `None` leaves the stored value as it is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

impl BookmarkPatch {
    pub fn apply_to(&self, bookmark: &mut Bookmark) {
        if let Some(title) = &self.title {
            bookmark.title = title.clone();
        }
        if let Some(url) = &self.url {
            bookmark.url = url.clone();
        }
        if let Some(description) = &self.description {
            bookmark.description = description.clone();
        }
        if let Some(rating) = self.rating {
            bookmark.rating = rating;
        }
    }
}
