//! Cross-origin policy: the blog front-end may be served from anywhere.

use actix_cors::Cors;

/// Allow any origin, method and request header.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
