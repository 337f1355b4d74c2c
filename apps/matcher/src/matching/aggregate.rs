//! Aggregator: the two weighting schemes.
//!
//! `combine` uses configurable `ScoreWeights` and reports on a 0–100 scale.
//! `blend_ranking` uses the fixed `RANKING_WEIGHTS` and orders match results in [0, 1].

use serde::{Deserialize, Serialize};

use super::MatchError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.2,
        }
    }
}

/// Fixed blend used to rank candidate × job pairs.
pub const RANKING_WEIGHTS: ScoreWeights = ScoreWeights {
    skills: 0.35,
    experience: 0.35,
    education: 0.30,
};

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education
    }

    /// Every weight finite and non-negative, with a positive sum.
    pub fn validate(&self) -> Result<(), MatchError> {
        let fields = [
            ("skills", self.skills),
            ("experience", self.experience),
            ("education", self.education),
        ];
        for (name, weight) in fields {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MatchError::InvalidWeights(format!(
                    "{name} weight must be a finite number >= 0, got {weight}"
                )));
            }
        }
        if self.sum() <= 0.0 {
            return Err(MatchError::InvalidWeights(
                "weights must not sum to zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Weighted score in [0, 100], rounded to one decimal. Weights are normalized
/// by their sum.
pub fn combine(
    skills: f64,
    experience: f64,
    education: f64,
    weights: &ScoreWeights,
) -> Result<f64, MatchError> {
    weights.validate()?;
    let total = weights.sum();

    let weighted = skills * weights.skills / total
        + experience * weights.experience / total
        + education * weights.education / total;

    Ok((weighted * 100.0 * 10.0).round() / 10.0)
}

/// Ranking score in [0, 1]. Component scores are clamped to [0, 1] first.
pub fn blend_ranking(skills: f64, experience: f64, education: f64) -> f64 {
    let w = RANKING_WEIGHTS;
    skills.clamp(0.0, 1.0) * w.skills
        + experience.clamp(0.0, 1.0) * w.experience
        + education.clamp(0.0, 1.0) * w.education
}
