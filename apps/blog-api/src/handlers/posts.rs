//! Post handlers - `/posts`.
//!
//! Responses embed a snapshot of the referenced theme and author. The
//! snapshots are resolved here, through the theme and user gateways, with
//! each distinct reference looked up once per response.

use std::collections::{BTreeSet, HashMap};

use actix_web::{HttpResponse, web};

use blog_core::domain::Post;
use blog_core::error::DomainError;
use blog_shared::dto::{PostRequest, PostResponse, ThemeResponse, UserResponse};

use super::{themes, users, validated};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Build the entity to store. The timestamp is always stamped here.
fn to_post(req: PostRequest) -> Post {
    Post::new(req.title.unwrap_or_default(), req.body.unwrap_or_default())
        .with_theme(req.theme.map(|t| t.id))
        .with_user(req.user.map(|u| u.id))
}

async fn render(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let theme_ids: BTreeSet<i64> = posts.iter().filter_map(|p| p.theme_id).collect();
    let user_ids: BTreeSet<i64> = posts.iter().filter_map(|p| p.user_id).collect();

    let mut theme_snapshots: HashMap<i64, ThemeResponse> = HashMap::new();
    for id in theme_ids {
        if let Some(theme) = state.themes.find_by_id(id).await? {
            theme_snapshots.insert(id, themes::to_response(theme));
        }
    }

    let mut user_snapshots: HashMap<i64, UserResponse> = HashMap::new();
    for id in user_ids {
        if let Some(user) = state.users.find_by_id(id).await? {
            user_snapshots.insert(id, users::to_response(user));
        }
    }

    Ok(posts
        .into_iter()
        .map(|post| PostResponse {
            id: post.id.unwrap_or_default(),
            theme: post.theme_id.and_then(|id| theme_snapshots.get(&id).cloned()),
            user: post.user_id.and_then(|id| user_snapshots.get(&id).cloned()),
            title: post.title,
            body: post.body,
            created_at: post.created_at,
        })
        .collect())
}

async fn render_one(state: &AppState, post: Post) -> AppResult<PostResponse> {
    render(state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("post vanished while rendering".to_string()))
}

/// GET /posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    Ok(HttpResponse::Ok().json(render(&state, posts).await?))
}

/// GET /posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "post",
            id,
        })?;

    Ok(HttpResponse::Ok().json(render_one(&state, post).await?))
}

/// GET /posts/title/{term}
pub async fn search_by_title(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .find_all_by_title_containing_ignore_case(&path)
        .await?;
    Ok(HttpResponse::Ok().json(render(&state, posts).await?))
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;

    let post = state.posts.save(to_post(req)).await?;
    tracing::info!(post_id = ?post.id, "Post created");

    Ok(HttpResponse::Created().json(render_one(&state, post).await?))
}

/// PUT /posts
///
/// Full replace: references omitted from the body are cleared.
pub async fn update(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;
    let id = req.id.ok_or(AppError::UnknownId)?;

    if state.posts.find_by_id(id).await?.is_none() {
        return Err(AppError::UnknownId);
    }

    let post = state.posts.save(to_post(req).with_id(id)).await?;
    Ok(HttpResponse::Ok().json(render_one(&state, post).await?))
}

/// DELETE /posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "post",
            id,
        })?;

    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
