//! Experience Matcher.
//!
//! Two operations:
//! - `experience_deviation`: signed distance between a candidate's years and a
//!   requirement (range or "N+"). Not a score; never blended directly.
//! - `experience_match`: normalized [0, 1] score against a minimum, using years
//!   read from the candidate's first experience entry.

use std::sync::OnceLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use tracing::debug;

use super::MatchError;
use crate::models::ExperienceRequirement;

/// `(2018 - 2022)` anywhere in the entry.
fn year_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\((\d{4})\s*-\s*(\d{4})\)").expect("year range pattern is a valid regex")
    })
}

/// Signed deviation of `years` from the requirement.
///
/// - `AtLeast(n)`: `years - n`
/// - `Range(min, max)`: `years - min` below, `years - max` above, and `years`
///   itself inside the range (not 0).
///
/// Any other requirement shape is `InvalidRequirementFormat`.
pub fn experience_deviation(
    requirement: &ExperienceRequirement,
    years: i64,
) -> Result<i64, MatchError> {
    let deviation = match requirement {
        ExperienceRequirement::AtLeast { years: floor } => years.checked_sub(*floor),
        ExperienceRequirement::Range {
            min_years,
            max_years,
        } => {
            if years < *min_years {
                years.checked_sub(*min_years)
            } else if years > *max_years {
                years.checked_sub(*max_years)
            } else {
                Some(years)
            }
        }
        other => {
            return Err(MatchError::InvalidRequirementFormat(format!(
                "expected a (min, max) range or \"N+\", got {other:?}"
            )))
        }
    };

    deviation.ok_or_else(|| {
        MatchError::InvalidRequirementFormat(format!(
            "deviation of {years} years from {requirement:?} is out of range"
        ))
    })
}

/// Years of experience in one entry, from its `(start - end)` pattern.
///
/// An end year after `current_year` counts up to `current_year`. No pattern → 0.
pub fn parse_experience_years(entry: &str, current_year: i32) -> i64 {
    let Some(caps) = year_range_pattern().captures(entry) else {
        return 0;
    };

    let (Ok(start), Ok(end)) = (caps[1].parse::<i64>(), caps[2].parse::<i64>()) else {
        return 0;
    };

    let current = i64::from(current_year);
    let years = if end > current {
        current - start
    } else {
        end - start
    };
    years.max(0)
}

/// Normalized experience score against the requirement's minimum years,
/// evaluated at the current calendar year.
pub fn experience_match(requirement: &ExperienceRequirement, resume_experience: &[String]) -> f64 {
    experience_match_at(requirement, resume_experience, Utc::now().year())
}

/// `experience_match` with an explicit current year.
///
/// - no experience entries → 0.0
/// - unreadable minimum → 0.0
/// - `years >= min` → 1.0, else `years / min`
pub fn experience_match_at(
    requirement: &ExperienceRequirement,
    resume_experience: &[String],
    current_year: i32,
) -> f64 {
    let Some(first_entry) = resume_experience.first() else {
        return 0.0;
    };

    let years = parse_experience_years(first_entry, current_year);

    let Some(min_years) = requirement.minimum_years() else {
        debug!(?requirement, "unreadable minimum years; scoring experience 0.0");
        return 0.0;
    };

    // min <= 0 is always satisfied and must not reach the division
    if min_years <= 0 || years >= min_years {
        return 1.0;
    }
    (years as f64 / min_years as f64).max(0.0)
}
