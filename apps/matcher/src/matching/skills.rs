//! Skills Matcher: one-sided best-match average.
//!
//! Each resume skill is credited with its closest job skill; unrelated extra skills
//! on the resume lower the mean but are never matched against each other.

use tracing::debug;

use super::mean_of_row_maxima;
use crate::embedding::{Embedder, EmbeddingError};

/// Mean over resume skills of the best similarity against any job skill.
///
/// Either list empty → 0.0. Both lists are encoded in a single batch.
pub async fn skills_match(
    embedder: &dyn Embedder,
    resume_skills: &[String],
    job_skills: &[String],
) -> Result<f64, EmbeddingError> {
    if resume_skills.is_empty() || job_skills.is_empty() {
        return Ok(0.0);
    }

    let texts: Vec<String> = resume_skills.iter().chain(job_skills).cloned().collect();
    let mut resume_vectors = embedder.encode(&texts).await?;
    if resume_vectors.len() != texts.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: texts.len(),
            actual: resume_vectors.len(),
        });
    }
    let job_vectors = resume_vectors.split_off(resume_skills.len());

    let matrix = embedder.similarity(&resume_vectors, &job_vectors);
    let score = mean_of_row_maxima(&matrix);

    debug!(
        resume_skills = resume_skills.len(),
        job_skills = job_skills.len(),
        score,
        "skills matched"
    );
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{FixedEmbedder, UnavailableEmbedder};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn fixture() -> FixedEmbedder {
        FixedEmbedder::new(&[
            ("ML", &[1.0, 0.0, 0.0]),
            ("Machine Learning", &[0.9, 0.1, 0.0]),
            ("Python", &[0.0, 1.0, 0.0]),
            ("Cooking", &[0.0, 0.0, 1.0]),
        ])
    }

    #[tokio::test]
    async fn test_empty_resume_skills_is_zero() {
        let e = fixture();
        let score = skills_match(&e, &[], &strings(&["Python"])).await.unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(e.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_job_skills_is_zero() {
        let e = fixture();
        let score = skills_match(&e, &strings(&["Python"]), &[]).await.unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_identical_skills_score_one() {
        let e = fixture();
        let skills = strings(&["Python", "ML"]);
        let score = skills_match(&e, &skills, &skills).await.unwrap();
        assert!((score - 1.0).abs() < 1e-6, "score was {score}");
    }

    #[tokio::test]
    async fn test_synonyms_score_high_without_lexical_match() {
        let e = fixture();
        let score = skills_match(&e, &strings(&["ML"]), &strings(&["Machine Learning"]))
            .await
            .unwrap();
        assert!(score > 0.95, "score was {score}");
    }

    #[tokio::test]
    async fn test_unrelated_extra_skill_halves_mean() {
        // Python matches exactly (1.0), Cooking matches nothing (0.0)
        let e = fixture();
        let score = skills_match(
            &e,
            &strings(&["Python", "Cooking"]),
            &strings(&["Python", "ML"]),
        )
        .await
        .unwrap();
        assert!((score - 0.5).abs() < 1e-6, "score was {score}");
    }

    #[tokio::test]
    async fn test_encodes_both_sides_in_one_batch() {
        let e = fixture();
        skills_match(&e, &strings(&["ML"]), &strings(&["Python"]))
            .await
            .unwrap();
        assert_eq!(e.calls(), 1);
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let err = skills_match(&UnavailableEmbedder, &strings(&["Rust"]), &strings(&["Go"]))
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Unavailable(_)));
    }
}
