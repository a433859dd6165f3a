use serde::{Deserialize, Serialize};

/// Theme entity - a category that posts are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: Option<i64>,
    pub description: String,
}

impl Theme {
    pub fn new(description: String) -> Self {
        Self {
            id: None,
            description,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
