//! User handlers - `/users`. Users exist to be referenced by posts.

use actix_web::{HttpResponse, web};

use blog_core::domain::User;
use blog_core::error::DomainError;
use blog_shared::dto::{UserRequest, UserResponse};

use super::validated;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(super) fn to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id.unwrap_or_default(),
        name: user.name,
        username: user.username,
    }
}

/// GET /users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .users
        .find_all()
        .await?
        .into_iter()
        .map(to_response)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "user",
            id,
        })?;

    Ok(HttpResponse::Ok().json(to_response(user)))
}

/// POST /users
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;
    let username = req.username.unwrap_or_default();

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(DomainError::Duplicate("Username already registered".to_string()).into());
    }

    let user = state
        .users
        .save(User::new(req.name.unwrap_or_default(), username))
        .await?;
    tracing::info!(user_id = ?user.id, "User created");

    Ok(HttpResponse::Created().json(to_response(user)))
}
