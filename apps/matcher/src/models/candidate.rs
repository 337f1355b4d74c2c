use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

/// A resume project. Missing or wrongly-typed fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string_list_or_empty")]
    pub technologies: Vec<String>,
}

/// Project objects of an array; other entries are dropped.
fn project_list<'de, D>(deserializer: D) -> Result<Option<Vec<Project>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

/// Resume record as served by the data source. Every field is optional there and
/// a field of the wrong type counts as missing; defaults are applied once in
/// `Candidate::from`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub technical_skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub education: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub experience: Option<Vec<String>>,
    #[serde(default, deserialize_with = "project_list")]
    pub projects: Option<Vec<Project>>,
}

/// Immutable candidate snapshot for one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    /// Free text, e.g. "Backend Engineer at Acme (2019 - 2023)".
    pub experience: Vec<String>,
    pub projects: Vec<Project>,
}

impl From<CandidateRecord> for Candidate {
    fn from(record: CandidateRecord) -> Self {
        Candidate {
            name: record
                .name
                .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string()),
            skills: record.technical_skills.unwrap_or_default(),
            education: record.education.unwrap_or_default(),
            experience: record.experience.unwrap_or_default(),
            projects: record.projects.unwrap_or_default(),
        }
    }
}
