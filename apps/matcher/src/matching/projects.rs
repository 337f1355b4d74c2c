//! Project Matcher: the skills matcher run over what a candidate's projects
//! actually used and described.

use std::collections::HashSet;

use super::skills::skills_match;
use crate::embedding::{Embedder, EmbeddingError};
use crate::models::Project;

/// Resume side: every project's technologies and description, de-duplicated
/// case-insensitively. Job side: the required skills plus the job title.
pub async fn project_match(
    embedder: &dyn Embedder,
    resume_projects: &[Project],
    job_title: &str,
    required_skills: &[String],
) -> Result<f64, EmbeddingError> {
    let project_terms = project_terms(resume_projects);

    let mut job_terms: Vec<String> = required_skills.to_vec();
    if !job_title.trim().is_empty() {
        job_terms.push(job_title.trim().to_string());
    }

    skills_match(embedder, &project_terms, &job_terms).await
}

fn project_terms(projects: &[Project]) -> Vec<String> {
    let mut seen = HashSet::new();
    projects
        .iter()
        .flat_map(|p| {
            p.technologies
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(p.description.as_str()))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .map(str::to_string)
        .collect()
}
