pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(health::index_handler))
        // Batch matching
        .route(
            "/api/calculate-matches",
            post(handlers::handle_calculate_matches),
        )
        .route("/api/matches", get(handlers::handle_get_matches))
        .route("/api/candidates", get(handlers::handle_get_candidates))
        .route("/api/jobs", get(handlers::handle_get_jobs))
        .route("/api/weights", get(handlers::handle_get_weights))
        // Single-field matchers
        .route("/api/skills-match", post(handlers::handle_skills_match))
        .route(
            "/api/education-match",
            post(handlers::handle_education_match),
        )
        .route(
            "/api/experience-match",
            post(handlers::handle_experience_match),
        )
        .route(
            "/api/experience-deviation",
            post(handlers::handle_experience_deviation),
        )
        .route("/api/project-match", post(handlers::handle_project_match))
        .route(
            "/api/aggregate-score",
            post(handlers::handle_aggregate_score),
        )
        .with_state(state)
}
