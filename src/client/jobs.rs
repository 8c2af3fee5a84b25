use http::Method;
use serde_json::{json, Value};

use crate::client::{query_string, ApiClient};
use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct JobsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl JobsQuery {
    fn to_query_string(&self) -> String {
        query_string(&[
            ("search", self.search.clone()),
            ("status", self.status.clone()),
            ("department", self.department.clone()),
            ("page", self.page.map(|p| p.to_string())),
            ("pageSize", self.page_size.map(|p| p.to_string())),
        ])
    }
}

impl ApiClient {
    pub async fn get_jobs(&self, params: &JobsQuery) -> Result<Value> {
        let uri = format!("/api/jobs{}", params.to_query_string());
        self.send(Method::GET, &uri, None).await
    }

    pub async fn get_job(&self, id: &str) -> Result<Value> {
        self.send(Method::GET, &format!("/api/jobs/{id}"), None).await
    }

    pub async fn create_job(&self, payload: &CreateJobPayload) -> Result<Value> {
        let body = serde_json::to_value(payload)?;
        self.send(Method::POST, "/api/jobs", Some(&body)).await
    }

    pub async fn update_job(&self, id: &str, payload: &UpdateJobPayload) -> Result<Value> {
        let body = serde_json::to_value(payload)?;
        self.send(Method::PATCH, &format!("/api/jobs/{id}"), Some(&body))
            .await
    }

    pub async fn delete_job(&self, id: &str) -> Result<Value> {
        self.send(Method::DELETE, &format!("/api/jobs/{id}"), None)
            .await
    }

    pub async fn reorder_jobs(&self, job_ids: &[String]) -> Result<Value> {
        let body = json!({ "jobIds": job_ids });
        self.send(Method::PATCH, "/api/jobs/reorder", Some(&body))
            .await
    }
}
