use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/language", post(handlers::set_language))
        .route("/api/form/open", post(handlers::open_form))
        .route("/api/form/close", post(handlers::close_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/analysis", get(handlers::get_analysis))
        .route("/api/analyze", post(handlers::analyze))
        .with_state(state)
}
