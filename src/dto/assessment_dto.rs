use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::assessment::Section;

/// Body of `PUT /assessments/:jobId`. The `job_id` is always taken from
/// the URL path; a `job_id` in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SaveAssessmentPayload {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub sections: Option<Vec<Section>>,
    pub is_active: Option<bool>,
}
