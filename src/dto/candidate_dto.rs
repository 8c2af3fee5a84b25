use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::Stage;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub job_id: Option<String>,
    pub stage: Option<Stage>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_id: Option<String>,
    pub stage: Option<Stage>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateListQuery {
    pub search: Option<String>,
    /// Exact-match filter; the literal "all" means no filter.
    pub stage: Option<String>,
    pub job_id: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddNotePayload {
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub is_private: bool,
}

/// Body of `PATCH /candidates/:id/stage`. The caller supplies the
/// human-readable stage titles used in the timeline message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StageChangePayload {
    #[validate(length(min = 1))]
    pub candidate_name: String,
    pub previous_stage: Stage,
    pub new_stage: Stage,
    pub previous_stage_title: String,
    pub new_stage_title: String,
}
