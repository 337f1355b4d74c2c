use serde::{Deserialize, Serialize};

/// One scored (candidate, job) pair. Built once per run, never mutated.
///
/// Field names follow the wire format clients of `/api/matches` already read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_name: String,
    pub job_title: String,
    pub skills_match: f64,
    pub experience_match: f64,
    pub education_match: f64,
    /// Ranking blend in [0, 1]; results are ordered by this, descending.
    pub total_score: f64,
    pub required_skills: Vec<String>,
    pub candidate_skills: Vec<String>,
}
