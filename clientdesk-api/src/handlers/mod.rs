pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod projects;

use actix_web::{web, HttpResponse};
use shared_types::{ErrorResponse, ValidationErrorResponse, ValidationErrors};

/// Register every route. Protected handlers take an `AuthenticatedUser`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health))
        .route("/api/auth/sign-up", web::post().to(auth::sign_up))
        .route("/api/auth/sign-in", web::post().to(auth::sign_in))
        .route("/api/auth/sign-out", web::post().to(auth::sign_out))
        .route("/api/auth/me", web::get().to(auth::me))
        .route("/api/dashboard", web::get().to(dashboard::get_dashboard))
        .route("/api/clients", web::get().to(clients::list_clients))
        .route("/api/clients", web::post().to(clients::create_client))
        .route("/api/clients/options", web::get().to(clients::list_client_options))
        .route("/api/projects", web::get().to(projects::list_projects))
        .route("/api/projects", web::post().to(projects::create_project))
        .route("/api/projects/stream", web::get().to(projects::stream_projects));
}

pub(crate) fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ValidationErrorResponse::from(errors))
}

/// One-shot failure notice for a rejected write; the form keeps its input
pub(crate) fn write_failed(what: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: format!("Error adding {}. Please try again.", what),
    })
}
