//! HTTP handlers and route configuration.

mod health;
mod posts;
mod themes;
mod users;


use actix_web::web;
use validator::Validate;

use crate::middleware::error::{AppResult, json_error_handler, path_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list))
                .route("", web::post().to(posts::create))
                .route("", web::put().to(posts::update))
                .route("/title/{term}", web::get().to(posts::search_by_title))
                .route("/titulo/{term}", web::get().to(posts::search_by_title))
                .route("/{id}", web::get().to(posts::get))
                .route("/{id}", web::delete().to(posts::delete)),
        )
        .service(
            web::scope("/theme")
                .route("", web::get().to(themes::list))
                .route("", web::post().to(themes::create))
                .route("", web::put().to(themes::update))
                .route("/nome/{term}", web::get().to(themes::search_by_description))
                .route("/{id}", web::get().to(themes::get))
                .route("/{id}", web::delete().to(themes::delete)),
        )
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list))
                .route("", web::post().to(users::create))
                .route("/{id}", web::get().to(users::get)),
        );
}

/// Run the declarative validation rules before anything reaches the store.
fn validated<T: Validate>(body: web::Json<T>) -> AppResult<T> {
    let body = body.into_inner();
    body.validate()?;
    Ok(body)
}
