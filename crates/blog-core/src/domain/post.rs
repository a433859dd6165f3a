use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a blog entry, optionally filed under a theme and an author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// `None` until the store assigns an id.
    pub id: Option<i64>,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub theme_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl Post {
    /// Create a new, unsaved post stamped with the current time.
    pub fn new(title: String, body: String) -> Self {
        Self {
            id: None,
            title,
            body,
            created_at: Utc::now(),
            theme_id: None,
            user_id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_theme(mut self, theme_id: Option<i64>) -> Self {
        self.theme_id = theme_id;
        self
    }

    pub fn with_user(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }
}
