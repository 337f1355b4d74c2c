//! Match Orchestrator: scores every candidate against every job and ranks the pairs.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use super::aggregate::blend_ranking;
use super::education::education_match;
use super::experience::{experience_deviation, experience_match};
use super::projects::project_match;
use super::skills::skills_match;
use super::MatchError;
use crate::data_source::DataSource;
use crate::embedding::Embedder;
use crate::models::{
    Candidate, EducationRequirement, ExperienceRequirement, JobRequirement, MatchResult, Project,
};

/// Owns the one embedding provider and the data source for the process.
#[derive(Clone)]
pub struct MatchEngine {
    embedder: Arc<dyn Embedder>,
    data_source: Arc<dyn DataSource>,
}

impl MatchEngine {
    pub fn new(embedder: Arc<dyn Embedder>, data_source: Arc<dyn DataSource>) -> Self {
        Self {
            embedder,
            data_source,
        }
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    pub async fn fetch_candidates(&self) -> Result<Vec<Candidate>, MatchError> {
        let records = self.data_source.fetch_candidates().await?;
        Ok(records.into_iter().map(Candidate::from).collect())
    }

    pub async fn fetch_jobs(&self) -> Result<Vec<JobRequirement>, MatchError> {
        let records = self.data_source.fetch_jobs().await?;
        Ok(records.into_iter().map(JobRequirement::from_record).collect())
    }

    /// Scores every candidate against every job, best first.
    pub async fn calculate_matches(&self) -> Result<Vec<MatchResult>, MatchError> {
        let candidates = self.fetch_candidates().await?;
        let jobs = self.fetch_jobs().await?;
        info!(
            candidates = candidates.len(),
            jobs = jobs.len(),
            "Calculating matches"
        );

        let matches = rank_matches(self.embedder(), &candidates, &jobs).await?;
        info!(matches = matches.len(), "Matches calculated");
        Ok(matches)
    }

    pub async fn calculate_skills_match(
        &self,
        resume_skills: &[String],
        job_skills: &[String],
    ) -> Result<f64, MatchError> {
        Ok(skills_match(self.embedder(), resume_skills, job_skills).await?)
    }

    pub async fn calculate_education_match(
        &self,
        resume_education: &[String],
        job_education: &EducationRequirement,
    ) -> Result<f64, MatchError> {
        Ok(education_match(self.embedder(), resume_education, job_education).await?)
    }

    pub fn calculate_experience_match(
        &self,
        job_min_years: &ExperienceRequirement,
        resume_experience: &[String],
    ) -> f64 {
        experience_match(job_min_years, resume_experience)
    }

    pub fn calculate_experience_deviation(
        &self,
        requirement: &ExperienceRequirement,
        years: i64,
    ) -> Result<i64, MatchError> {
        experience_deviation(requirement, years)
    }

    pub async fn calculate_project_match(
        &self,
        resume_projects: &[Project],
        job_title: &str,
        required_skills: &[String],
    ) -> Result<f64, MatchError> {
        Ok(project_match(self.embedder(), resume_projects, job_title, required_skills).await?)
    }
}

/// Full cross product of candidates × jobs, sorted by `total_score` descending.
/// Ties keep candidate-major input order.
pub async fn rank_matches(
    embedder: &dyn Embedder,
    candidates: &[Candidate],
    jobs: &[JobRequirement],
) -> Result<Vec<MatchResult>, MatchError> {
    let mut matches = Vec::with_capacity(candidates.len() * jobs.len());

    for candidate in candidates {
        for job in jobs {
            matches.push(score_pair(embedder, candidate, job).await?);
        }
    }

    matches.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    Ok(matches)
}

async fn score_pair(
    embedder: &dyn Embedder,
    candidate: &Candidate,
    job: &JobRequirement,
) -> Result<MatchResult, MatchError> {
    let skills = skills_match(embedder, &candidate.skills, &job.required_skills).await?;
    let education = education_match(embedder, &candidate.education, &job.education).await?;
    let experience = experience_match(&job.experience, &candidate.experience);
    let total_score = blend_ranking(skills, experience, education);

    debug!(
        candidate = %candidate.name,
        job = %job.title,
        skills,
        experience,
        education,
        total_score,
        "pair scored"
    );

    Ok(MatchResult {
        candidate_name: candidate.name.clone(),
        job_title: job.title.clone(),
        skills_match: skills,
        experience_match: experience,
        education_match: education,
        total_score,
        required_skills: job.required_skills.clone(),
        candidate_skills: candidate.skills.clone(),
    })
}
