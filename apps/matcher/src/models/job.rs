use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::lenient;
use crate::matching::MatchError;

const UNKNOWN_POSITION: &str = "Unknown Position";
const NOT_SPECIFIED: &str = "not specified";

// ────────────────────────────────────────────────────────────────────────────
// Experience requirement
// ────────────────────────────────────────────────────────────────────────────

/// A job's experience requirement, resolved from whatever shape the data source sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExperienceRequirement {
    /// Closed range, e.g. `(0, 5)` or `"2-4"`.
    Range { min_years: i64, max_years: i64 },
    /// Open-ended floor written as `"N+"`.
    AtLeast { years: i64 },
    /// Bare minimum, e.g. `{"minimum_years": 3}`.
    Minimum { years: i64 },
    /// Missing, blank or the literal "Not specified".
    #[default]
    NotSpecified,
    /// Present but in no recognised shape.
    Unrecognized { raw: String },
}

impl ExperienceRequirement {
    /// Parses "5+", "0-5", "(0, 5)", "3", "3 years" and "Not specified".
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.is_empty() || lowered == NOT_SPECIFIED {
            return ExperienceRequirement::NotSpecified;
        }

        let core = ["years", "year", "yrs"]
            .iter()
            .find_map(|suffix| lowered.strip_suffix(suffix))
            .unwrap_or(lowered.as_str())
            .trim();

        if let Ok(years) = core.parse::<i64>() {
            return ExperienceRequirement::Minimum { years };
        }

        if let Some(floor) = core.strip_suffix('+') {
            if let Ok(years) = floor.trim().parse::<i64>() {
                return ExperienceRequirement::AtLeast { years };
            }
        }

        let inner = core
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(core);
        let bounds: Vec<&str> = inner.split(['-', ',']).map(str::trim).collect();
        if let [min, max] = bounds.as_slice() {
            if let (Ok(min_years), Ok(max_years)) = (min.parse::<i64>(), max.parse::<i64>()) {
                if min_years <= max_years {
                    return ExperienceRequirement::Range {
                        min_years,
                        max_years,
                    };
                }
            }
        }

        ExperienceRequirement::Unrecognized {
            raw: trimmed.to_string(),
        }
    }

    /// Resolves a decoded JSON value: numbers, strings or `[min, max]` pairs.
    /// An explicit `null` is present but unreadable.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)) {
                Some(years) => ExperienceRequirement::Minimum { years },
                None => ExperienceRequirement::Unrecognized { raw: n.to_string() },
            },
            Value::String(s) => ExperienceRequirement::parse(s),
            Value::Array(items) => match items.as_slice() {
                [min, max] => match (min.as_i64(), max.as_i64()) {
                    (Some(min_years), Some(max_years)) if min_years <= max_years => {
                        ExperienceRequirement::Range {
                            min_years,
                            max_years,
                        }
                    }
                    _ => ExperienceRequirement::Unrecognized {
                        raw: value.to_string(),
                    },
                },
                _ => ExperienceRequirement::Unrecognized {
                    raw: value.to_string(),
                },
            },
            other => ExperienceRequirement::Unrecognized {
                raw: other.to_string(),
            },
        }
    }

    /// Minimum years for the normalized score. "Not specified" means zero;
    /// `None` means the requirement can't be read as a number at all.
    pub fn minimum_years(&self) -> Option<i64> {
        match self {
            ExperienceRequirement::Range { min_years, .. } => Some(*min_years),
            ExperienceRequirement::AtLeast { years } | ExperienceRequirement::Minimum { years } => {
                Some(*years)
            }
            ExperienceRequirement::NotSpecified => Some(0),
            ExperienceRequirement::Unrecognized { .. } => None,
        }
    }
}

/// `experienceRequirements` payload. A missing `minimum_years` is "Not specified";
/// an explicit `null` is kept and reads as unrecognized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceRequirementRecord {
    #[serde(default, deserialize_with = "lenient::present")]
    pub minimum_years: Option<Value>,
    pub maximum_years: Option<Value>,
}

impl From<ExperienceRequirementRecord> for ExperienceRequirement {
    fn from(record: ExperienceRequirementRecord) -> Self {
        let minimum = record
            .minimum_years
            .as_ref()
            .map(ExperienceRequirement::from_value)
            .unwrap_or_default();
        let maximum = record.maximum_years.as_ref().and_then(Value::as_i64);

        match (minimum, maximum) {
            (ExperienceRequirement::Minimum { years }, Some(max_years)) if years <= max_years => {
                ExperienceRequirement::Range {
                    min_years: years,
                    max_years,
                }
            }
            (minimum, _) => minimum,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education requirement
// ────────────────────────────────────────────────────────────────────────────

/// Disjunctive education requirement: the degree OR any preferred field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRequirement {
    pub minimum_degree: Option<String>,
    pub preferred_fields: Vec<String>,
}

impl EducationRequirement {
    /// Non-blank texts to compare against: the degree first, then the fields.
    pub fn targets(&self) -> Vec<String> {
        self.minimum_degree
            .iter()
            .chain(self.preferred_fields.iter())
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.targets().is_empty()
    }
}

/// `educationRequirements` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationRequirementRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub minimum_degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub preferred_fields: Option<Vec<String>>,
}

impl From<EducationRequirementRecord> for EducationRequirement {
    fn from(record: EducationRequirementRecord) -> Self {
        EducationRequirement {
            minimum_degree: record.minimum_degree,
            preferred_fields: record.preferred_fields.unwrap_or_default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job
// ────────────────────────────────────────────────────────────────────────────

/// Job description record as served by the data source. The two requirement
/// fields arrive either as JSON text or as already-decoded objects. A field of
/// the wrong type counts as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub preferred_skills: Option<Vec<String>>,
    pub experience_requirements: Option<Value>,
    pub education_requirements: Option<Value>,
}

/// Immutable job snapshot for one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub title: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience: ExperienceRequirement,
    pub education: EducationRequirement,
}

impl JobRequirement {
    /// Resolves a raw record. Undecodable requirement fields are logged and
    /// replaced by their empty structure; this never fails.
    pub fn from_record(record: JobRecord) -> Self {
        let title = record
            .title
            .unwrap_or_else(|| UNKNOWN_POSITION.to_string());

        let experience = decode_requirement::<ExperienceRequirementRecord>(
            "experienceRequirements",
            record.experience_requirements.as_ref(),
        )
        .unwrap_or_else(|e| {
            warn!(job = %title, "{e}; treating experience requirement as empty");
            ExperienceRequirementRecord::default()
        });

        let education = decode_requirement::<EducationRequirementRecord>(
            "educationRequirements",
            record.education_requirements.as_ref(),
        )
        .unwrap_or_else(|e| {
            warn!(job = %title, "{e}; treating education requirement as empty");
            EducationRequirementRecord::default()
        });

        JobRequirement {
            title,
            required_skills: record.required_skills.unwrap_or_default(),
            preferred_skills: record.preferred_skills.unwrap_or_default(),
            experience: experience.into(),
            education: education.into(),
        }
    }
}

/// Decodes a requirement field that may be JSON text or a decoded value.
/// Missing or null decodes to `T::default()`.
pub fn decode_requirement<T>(field: &'static str, value: Option<&Value>) -> Result<T, MatchError>
where
    T: DeserializeOwned + Default,
{
    let malformed = |e: serde_json::Error| MatchError::MalformedRequirementJson {
        field,
        reason: e.to_string(),
    };

    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(Value::String(text)) => serde_json::from_str(text).map_err(malformed),
        Some(other) => serde_json::from_value(other.clone()).map_err(malformed),
    }
}
