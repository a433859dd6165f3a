//! Data Transfer Objects - request/response types for the API.
//!
//! Field names on the wire follow the blog's public JSON format
//! (`titulo`, `texto`, `data`, `tema`, `usuario`, `descricao`, `nome`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reference to another entity by id, as sent in request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Body of `POST /posts` and `PUT /posts`.
///
/// Everything is optional at the JSON level so that a missing field is
/// reported by validation rather than by the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostRequest {
    pub id: Option<i64>,
    #[serde(rename = "titulo")]
    #[validate(
        required(message = "title is required"),
        length(min = 5, max = 100, message = "title must be between 5 and 100 characters")
    )]
    pub title: Option<String>,
    #[serde(rename = "texto")]
    #[validate(
        required(message = "body is required"),
        length(min = 10, max = 500, message = "body must be between 10 and 500 characters")
    )]
    pub body: Option<String>,
    #[serde(rename = "tema")]
    pub theme: Option<EntityRef>,
    #[serde(rename = "usuario")]
    pub user: Option<EntityRef>,
}

/// Post as returned by the API, with its theme and author embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "texto")]
    pub body: String,
    #[serde(rename = "data")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "tema")]
    pub theme: Option<ThemeResponse>,
    #[serde(rename = "usuario")]
    pub user: Option<UserResponse>,
}

/// Body of `POST /theme` and `PUT /theme`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ThemeRequest {
    pub id: Option<i64>,
    #[serde(rename = "descricao")]
    #[validate(required(message = "description is required"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserRequest {
    #[serde(rename = "nome")]
    #[validate(
        required(message = "name is required"),
        length(min = 1, max = 100, message = "name must be between 1 and 100 characters")
    )]
    pub name: Option<String>,
    #[serde(rename = "usuario")]
    #[validate(
        required(message = "username is required"),
        email(message = "username must be an e-mail address")
    )]
    pub username: Option<String>,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub username: String,
}
