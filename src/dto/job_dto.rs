use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::{JobStatus, SalaryRange};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub department: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub salary_range: Option<SalaryRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub department: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub salary_range: Option<SalaryRange>,
    pub order: Option<i64>,
    pub applicant_count: Option<i64>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListQuery {
    pub search: Option<String>,
    /// Exact-match filter; the literal "all" means no filter.
    pub status: Option<String>,
    pub department: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReorderJobsPayload {
    #[serde(rename = "jobIds")]
    #[validate(length(min = 1))]
    pub job_ids: Vec<String>,
}
