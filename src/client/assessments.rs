use http::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::dto::assessment_dto::SaveAssessmentPayload;
use crate::error::Result;

impl ApiClient {
    pub async fn get_assessment(&self, job_id: &str) -> Result<Value> {
        self.send(Method::GET, &format!("/api/assessments/{job_id}"), None)
            .await
    }

    pub async fn save_assessment(
        &self,
        job_id: &str,
        payload: &SaveAssessmentPayload,
    ) -> Result<Value> {
        let body = serde_json::to_value(payload)?;
        self.send(Method::PUT, &format!("/api/assessments/{job_id}"), Some(&body))
            .await
    }

    pub async fn delete_assessment(&self, job_id: &str) -> Result<Value> {
        self.send(Method::DELETE, &format!("/api/assessments/{job_id}"), None)
            .await
    }
}
