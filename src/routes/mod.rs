use actix_web::HttpResponse;
use serde_json::json;
use tera::{Context, Tera};

use crate::services::ServiceError;

pub mod api;
pub mod main;

/// Renders `template` or answers 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Maps a service failure onto a JSON error response.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Internal(_) => HttpResponse::InternalServerError().finish(),
    }
}
