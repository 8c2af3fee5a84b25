pub mod assessments;
pub mod candidates;
pub mod jobs;
pub mod normalize;
