pub mod candidate;
pub mod job;
mod lenient;
pub mod match_result;

pub use candidate::{Candidate, CandidateRecord, Project};
pub use job::{
    decode_requirement, EducationRequirement, EducationRequirementRecord, ExperienceRequirement,
    JobRecord, JobRequirement,
};
pub use match_result::MatchResult;
