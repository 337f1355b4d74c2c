//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::aggregate::{combine, ScoreWeights, RANKING_WEIGHTS};
use crate::models::{
    decode_requirement, Candidate, EducationRequirementRecord, ExperienceRequirement,
    JobRequirement, MatchResult, Project,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    pub success: bool,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub success: bool,
    pub jobs: Vec<JobRequirement>,
}

#[derive(Debug, Serialize)]
pub struct WeightsResponse {
    pub success: bool,
    /// Configurable weights used by `/api/aggregate-score`.
    pub weights: ScoreWeights,
    /// Fixed weights used to rank `/api/matches`.
    pub ranking_weights: ScoreWeights,
}

#[derive(Debug, Deserialize)]
pub struct SkillsMatchRequest {
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub job_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillsMatchResponse {
    pub success: bool,
    pub skills_match_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct EducationMatchRequest {
    #[serde(default)]
    pub resume_education: Vec<String>,
    /// `{"minimum_degree", "preferred_fields"}` as an object or JSON text.
    #[serde(default)]
    pub job_education: Value,
}

#[derive(Debug, Serialize)]
pub struct EducationMatchResponse {
    pub success: bool,
    pub education_match_score: f64,
}

fn not_specified() -> Value {
    Value::String("Not specified".to_string())
}

#[derive(Debug, Deserialize)]
pub struct ExperienceMatchRequest {
    /// Number, "N+", "min-max" or "Not specified".
    #[serde(default = "not_specified")]
    pub job_min_years: Value,
    #[serde(default)]
    pub resume_experience: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ExperienceMatchResponse {
    pub success: bool,
    pub experience_match_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceDeviationRequest {
    /// `[min, max]`, "min-max", "(min, max)" or "N+".
    pub requirement: Value,
    pub years: i64,
}

#[derive(Debug, Serialize)]
pub struct ExperienceDeviationResponse {
    pub success: bool,
    pub requirement: ExperienceRequirement,
    pub deviation: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProjectMatchRequest {
    #[serde(default)]
    pub resume_projects: Vec<Project>,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectMatchResponse {
    pub success: bool,
    pub project_match_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct AggregateScoreRequest {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    /// Falls back to the configured weights.
    pub weights: Option<ScoreWeights>,
}

#[derive(Debug, Serialize)]
pub struct AggregateScoreResponse {
    pub success: bool,
    pub score: f64,
    pub weights: ScoreWeights,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/calculate-matches
///
/// Scores every candidate against every job and returns them best first.
pub async fn handle_calculate_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchesResponse>, AppError> {
    let matches = state.engine.calculate_matches().await?;

    Ok(Json(MatchesResponse {
        success: true,
        message: Some(format!("Generated {} match results", matches.len())),
        matches,
    }))
}

/// GET /api/matches
pub async fn handle_get_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchesResponse>, AppError> {
    let matches = state.engine.calculate_matches().await?;

    Ok(Json(MatchesResponse {
        success: true,
        message: None,
        matches,
    }))
}

/// GET /api/candidates
pub async fn handle_get_candidates(
    State(state): State<AppState>,
) -> Result<Json<CandidatesResponse>, AppError> {
    let candidates = state.engine.fetch_candidates().await?;

    Ok(Json(CandidatesResponse {
        success: true,
        candidates,
    }))
}

/// GET /api/jobs
pub async fn handle_get_jobs(
    State(state): State<AppState>,
) -> Result<Json<JobsResponse>, AppError> {
    let jobs = state.engine.fetch_jobs().await?;

    Ok(Json(JobsResponse {
        success: true,
        jobs,
    }))
}

/// GET /api/weights
pub async fn handle_get_weights(State(state): State<AppState>) -> Json<WeightsResponse> {
    Json(WeightsResponse {
        success: true,
        weights: state.config.score_weights,
        ranking_weights: RANKING_WEIGHTS,
    })
}

/// POST /api/skills-match
pub async fn handle_skills_match(
    State(state): State<AppState>,
    Json(request): Json<SkillsMatchRequest>,
) -> Result<Json<SkillsMatchResponse>, AppError> {
    let score = state
        .engine
        .calculate_skills_match(&request.resume_skills, &request.job_skills)
        .await?;

    Ok(Json(SkillsMatchResponse {
        success: true,
        skills_match_score: score,
    }))
}

/// POST /api/education-match
///
/// Unlike the batch run, malformed `job_education` text is rejected here with a 400.
pub async fn handle_education_match(
    State(state): State<AppState>,
    Json(request): Json<EducationMatchRequest>,
) -> Result<Json<EducationMatchResponse>, AppError> {
    let requirement = decode_requirement::<EducationRequirementRecord>(
        "job_education",
        Some(&request.job_education),
    )?;

    let score = state
        .engine
        .calculate_education_match(&request.resume_education, &requirement.into())
        .await?;

    Ok(Json(EducationMatchResponse {
        success: true,
        education_match_score: score,
    }))
}

/// POST /api/experience-match
pub async fn handle_experience_match(
    State(state): State<AppState>,
    Json(request): Json<ExperienceMatchRequest>,
) -> Json<ExperienceMatchResponse> {
    let requirement = ExperienceRequirement::from_value(&request.job_min_years);
    let score = state
        .engine
        .calculate_experience_match(&requirement, &request.resume_experience);

    Json(ExperienceMatchResponse {
        success: true,
        experience_match_score: score,
    })
}

/// POST /api/experience-deviation
///
/// Signed distance from a range or "N+" requirement. Other shapes are a 422.
pub async fn handle_experience_deviation(
    State(state): State<AppState>,
    Json(request): Json<ExperienceDeviationRequest>,
) -> Result<Json<ExperienceDeviationResponse>, AppError> {
    let requirement = ExperienceRequirement::from_value(&request.requirement);
    let deviation = state
        .engine
        .calculate_experience_deviation(&requirement, request.years)?;

    Ok(Json(ExperienceDeviationResponse {
        success: true,
        requirement,
        deviation,
    }))
}

/// POST /api/project-match
pub async fn handle_project_match(
    State(state): State<AppState>,
    Json(request): Json<ProjectMatchRequest>,
) -> Result<Json<ProjectMatchResponse>, AppError> {
    let score = state
        .engine
        .calculate_project_match(
            &request.resume_projects,
            &request.job_title,
            &request.required_skills,
        )
        .await?;

    Ok(Json(ProjectMatchResponse {
        success: true,
        project_match_score: score,
    }))
}

/// POST /api/aggregate-score
///
/// Weighted 0–100 score from three component scores, each in [0, 1].
pub async fn handle_aggregate_score(
    State(state): State<AppState>,
    Json(request): Json<AggregateScoreRequest>,
) -> Result<Json<AggregateScoreResponse>, AppError> {
    for (name, score) in [
        ("skills", request.skills),
        ("experience", request.experience),
        ("education", request.education),
    ] {
        if !(0.0..=1.0).contains(&score) {
            return Err(AppError::Validation(format!(
                "{name} score must be between 0 and 1, got {score}"
            )));
        }
    }

    let weights = request.weights.unwrap_or(state.config.score_weights);
    let score = combine(
        request.skills,
        request.experience,
        request.education,
        &weights,
    )?;

    Ok(Json(AggregateScoreResponse {
        success: true,
        score,
        weights,
    }))
}
