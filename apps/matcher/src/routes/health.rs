use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and embedding backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let embedder = state.engine.embedder();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matcher",
        "embedder": embedder.name(),
        "max_input_tokens": embedder.max_input_tokens()
    }))
}

/// GET /
/// Lists the available endpoints.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "status": "API is running",
        "endpoints": {
            "calculate_matches": "/api/calculate-matches",
            "get_matches": "/api/matches",
            "get_candidates": "/api/candidates",
            "get_jobs": "/api/jobs",
            "get_weights": "/api/weights",
            "calculate_skills_match": "/api/skills-match",
            "calculate_education_match": "/api/education-match",
            "calculate_experience_match": "/api/experience-match",
            "calculate_experience_deviation": "/api/experience-deviation",
            "calculate_project_match": "/api/project-match",
            "aggregate_score": "/api/aggregate-score"
        }
    }))
}
