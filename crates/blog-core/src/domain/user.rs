use serde::{Deserialize, Serialize};

/// User entity - the author a post may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    /// Login e-mail; unique across users.
    pub username: String,
}

impl User {
    /// Create a new, unsaved user.
    pub fn new(name: String, username: String) -> Self {
        Self {
            id: None,
            name,
            username,
        }
    }
}
