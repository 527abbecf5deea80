pub mod api;
pub mod health;
pub mod ui;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // HTML pages
        .route("/", get(ui::handle_index))
        .route("/review", post(ui::handle_review_page))
        .route("/review/answer", post(ui::handle_answer_page))
        .route("/coach", post(ui::handle_coach_page))
        .route("/ats", post(ui::handle_ats_page))
        // JSON API
        .route("/api/v1/capabilities", get(api::handle_capabilities))
        .route("/api/v1/review", post(api::handle_review))
        .route("/api/v1/ats/score", post(api::handle_ats_score))
        .route("/api/v1/interview/questions", post(api::handle_questions))
        .route("/api/v1/interview/answer", post(api::handle_answer))
        .route("/api/v1/coach/score", post(api::handle_coach))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
