//! Theme handlers - `/theme`.

use actix_web::{HttpResponse, web};

use blog_core::domain::Theme;
use blog_core::error::DomainError;
use blog_shared::dto::{ThemeRequest, ThemeResponse};

use super::validated;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn to_response(theme: Theme) -> ThemeResponse {
    ThemeResponse {
        id: theme.id.unwrap_or_default(),
        description: theme.description,
    }
}

fn to_theme(req: ThemeRequest) -> Theme {
    Theme::new(req.description.unwrap_or_default())
}

fn to_responses(themes: Vec<Theme>) -> Vec<ThemeResponse> {
    themes.into_iter().map(to_response).collect()
}

/// GET /theme
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let themes = state.themes.find_all().await?;
    Ok(HttpResponse::Ok().json(to_responses(themes)))
}

/// GET /theme/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let theme = state
        .themes
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "theme",
            id,
        })?;

    Ok(HttpResponse::Ok().json(to_response(theme)))
}

/// GET /theme/nome/{term}
pub async fn search_by_description(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let themes = state
        .themes
        .find_by_description_containing_ignore_case(&path)
        .await?;
    Ok(HttpResponse::Ok().json(to_responses(themes)))
}

/// POST /theme
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<ThemeRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;

    let theme = state.themes.save(to_theme(req)).await?;
    tracing::info!(theme_id = ?theme.id, "Theme created");

    Ok(HttpResponse::Created().json(to_response(theme)))
}

/// PUT /theme
pub async fn update(
    state: web::Data<AppState>,
    body: web::Json<ThemeRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body)?;
    let id = req.id.ok_or(AppError::UnknownId)?;

    if state.themes.find_by_id(id).await?.is_none() {
        return Err(AppError::UnknownId);
    }

    let theme = state.themes.save(to_theme(req).with_id(id)).await?;
    Ok(HttpResponse::Ok().json(to_response(theme)))
}

/// DELETE /theme/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state
        .themes
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "theme",
            id,
        })?;

    state.themes.delete(id).await?;
    tracing::info!(theme_id = id, "Theme deleted");

    Ok(HttpResponse::NoContent().finish())
}
