//! HTTP surface: routing, request validation, and error classification.
//!
//! The router owns no business logic. Each handler authenticates the
//! caller through the [`extract::CurrentUser`] extractor, deserialises the
//! payload into a strict typed request, delegates to the injected service,
//! and maps typed service failures onto status codes by variant — never by
//! message text. Every failure response carries the stable JSON error body
//! defined in [`error`].

pub mod error;
pub mod extract;
pub mod state;

mod handlers;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the application router over dependency-injected services.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/feed", get(handlers::feed::feed))
        .route("/api/feed/new", get(handlers::feed::new_candidates))
        .route("/api/feed/upcoming", get(handlers::feed::upcoming))
        .route(
            "/api/candidates/{id}/confirm",
            post(handlers::candidates::confirm),
        )
        .route(
            "/api/candidates/{id}/edit",
            post(handlers::candidates::edit),
        )
        .route(
            "/api/candidates/{id}/ignore",
            post(handlers::candidates::ignore),
        )
        .route(
            "/api/candidates/{id}/source",
            get(handlers::candidates::source),
        )
        .route("/api/tasks", get(handlers::tasks::list))
        .route(
            "/api/tasks/{id}",
            get(handlers::tasks::get)
                .patch(handlers::tasks::update)
                .delete(handlers::tasks::remove),
        )
        .route("/api/tasks/{id}/complete", post(handlers::tasks::complete))
        .route(
            "/api/users/me",
            get(handlers::users::me).patch(handlers::users::update),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
