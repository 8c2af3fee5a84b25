pub mod assessments;
pub mod candidates;
pub mod jobs;
pub mod seed;

pub use assessments::AssessmentStore;
pub use candidates::{CandidateFilter, CandidateStore};
pub use jobs::{JobFilter, JobStore};
