//! Education Matcher: best single similarity between the candidate's education
//! and any acceptable degree or field.

use tracing::debug;

use super::matrix_max;
use crate::embedding::{Embedder, EmbeddingError};
use crate::models::EducationRequirement;

/// All candidate entries are joined into one text and compared against
/// `[minimum_degree] + preferred_fields`; the maximum similarity wins.
///
/// Either side empty → 0.0.
pub async fn education_match(
    embedder: &dyn Embedder,
    resume_education: &[String],
    requirement: &EducationRequirement,
) -> Result<f64, EmbeddingError> {
    let resume_text = resume_education.join(" ");
    if resume_text.trim().is_empty() || requirement.is_empty() {
        return Ok(0.0);
    }
    let targets = requirement.targets();

    let mut texts = Vec::with_capacity(targets.len() + 1);
    texts.push(resume_text);
    texts.extend(targets);

    let mut resume_vectors = embedder.encode(&texts).await?;
    if resume_vectors.len() != texts.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: texts.len(),
            actual: resume_vectors.len(),
        });
    }
    let target_vectors = resume_vectors.split_off(1);

    let matrix = embedder.similarity(&resume_vectors, &target_vectors);
    let score = matrix_max(&matrix);

    debug!(targets = target_vectors.len(), score, "education matched");
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::FixedEmbedder;

    fn requirement(degree: Option<&str>, fields: &[&str]) -> EducationRequirement {
        EducationRequirement {
            minimum_degree: degree.map(str::to_string),
            preferred_fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fixture() -> FixedEmbedder {
        FixedEmbedder::new(&[
            ("B.Tech IIT Delhi M.Tech NIT Trichy", &[0.6, 0.8, 0.0]),
            ("B.Tech IIT Delhi", &[0.6, 0.8, 0.0]),
            ("Bachelor's", &[1.0, 0.0, 0.0]),
            ("Computer Science", &[0.0, 1.0, 0.0]),
            ("Fine Arts", &[0.0, 0.0, 1.0]),
        ])
    }

    #[tokio::test]
    async fn test_empty_resume_education_is_zero() {
        let e = fixture();
        let score = education_match(&e, &[], &requirement(Some("Bachelor's"), &[]))
            .await
            .unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(e.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_requirement_is_zero() {
        let e = fixture();
        let score = education_match(
            &e,
            &["B.Tech IIT Delhi".to_string()],
            &EducationRequirement::default(),
        )
        .await
        .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_entries_are_joined_into_one_text() {
        let e = fixture();
        let resume = vec!["B.Tech IIT Delhi".to_string(), "M.Tech NIT Trichy".to_string()];
        let score = education_match(&e, &resume, &requirement(Some("Bachelor's"), &[]))
            .await
            .unwrap();
        assert!((score - 0.6).abs() < 1e-6, "score was {score}");
    }

    #[tokio::test]
    async fn test_best_target_wins() {
        // degree similarity 0.6, field similarity 0.8
        let e = fixture();
        let score = education_match(
            &e,
            &["B.Tech IIT Delhi".to_string()],
            &requirement(Some("Bachelor's"), &["Fine Arts", "Computer Science"]),
        )
        .await
        .unwrap();
        assert!((score - 0.8).abs() < 1e-6, "score was {score}");
    }

    #[tokio::test]
    async fn test_fields_only_requirement_still_scores() {
        let e = fixture();
        let score = education_match(
            &e,
            &["B.Tech IIT Delhi".to_string()],
            &requirement(None, &["Computer Science"]),
        )
        .await
        .unwrap();
        assert!(score > 0.0);
    }
}
