pub mod account;
pub mod booking;
pub mod catalog;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/services", get(catalog::list_services))
        .route("/api/services/:service", get(catalog::get_service))
        .route("/api/booking/options", get(booking::options))
        .route("/api/booking/sessions", post(booking::open_session))
        .route(
            "/api/booking/sessions/:id",
            get(booking::get_session).delete(booking::close_session),
        )
        .route(
            "/api/booking/sessions/:id/form",
            axum::routing::patch(booking::update_form),
        )
        .route(
            "/api/booking/sessions/:id/validate",
            post(booking::validate_form),
        )
        .route("/api/booking/sessions/:id/submit", post(booking::submit))
        .route(
            "/api/booking/sessions/:id/events",
            get(booking::events_stream),
        )
        .route("/api/account/login", post(account::login))
        .route("/api/account/register", post(account::register))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
