use std::collections::HashMap;

use http::Method;
use serde_json::{json, Value};
use tracing::warn;

use crate::client::{query_string, ApiClient};
use crate::dto::candidate_dto::{StageChangePayload, UpdateCandidatePayload};
use crate::error::Result;
use crate::models::candidate::{Candidate, Stage};

#[derive(Debug, Clone, Default)]
pub struct CandidatesQuery {
    pub search: Option<String>,
    pub stage: Option<String>,
    pub job_id: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl CandidatesQuery {
    fn to_query_string(&self) -> String {
        query_string(&[
            ("search", self.search.clone()),
            ("stage", self.stage.clone()),
            ("job_id", self.job_id.clone()),
            ("page", self.page.map(|p| p.to_string())),
            ("pageSize", self.page_size.map(|p| p.to_string())),
        ])
    }
}

impl ApiClient {
    pub async fn get_candidates(&self, params: &CandidatesQuery) -> Result<Value> {
        let uri = format!("/api/candidates{}", params.to_query_string());
        self.send(Method::GET, &uri, None).await
    }

    pub async fn get_candidate(&self, id: &str) -> Result<Value> {
        self.send(Method::GET, &format!("/api/candidates/{id}"), None)
            .await
    }

    pub async fn update_candidate(
        &self,
        id: &str,
        payload: &UpdateCandidatePayload,
    ) -> Result<Value> {
        let body = serde_json::to_value(payload)?;
        self.send(Method::PATCH, &format!("/api/candidates/{id}"), Some(&body))
            .await
    }

    pub async fn add_note(&self, id: &str, content: &str, is_private: bool) -> Result<Value> {
        let body = json!({ "content": content, "is_private": is_private });
        self.send(
            Method::POST,
            &format!("/api/candidates/{id}/notes"),
            Some(&body),
        )
        .await
    }

    pub async fn update_stage(&self, id: &str, payload: &StageChangePayload) -> Result<Value> {
        let body = serde_json::to_value(payload)?;
        self.send(
            Method::PATCH,
            &format!("/api/candidates/{id}/stage"),
            Some(&body),
        )
        .await
    }

    /// Fetches one oversized page and partitions it client-side. Every stage
    /// appears in the result, empty buckets included, so board columns can
    /// render without existence checks.
    pub async fn get_candidates_by_stage(
        &self,
        job_id: Option<&str>,
    ) -> Result<HashMap<Stage, Vec<Candidate>>> {
        let params = CandidatesQuery {
            job_id: job_id.map(str::to_string),
            page_size: Some(1000),
            ..Default::default()
        };
        let raw = self.get_candidates(&params).await?;

        let candidates: Vec<Candidate> =
            if let Some(list) = raw.pointer("/data/candidates").and_then(Value::as_array) {
                serde_json::from_value(Value::Array(list.clone()))?
            } else if let Some(list) = raw.get("data").and_then(Value::as_array) {
                serde_json::from_value(Value::Array(list.clone()))?
            } else if let Some(list) = raw.as_array() {
                serde_json::from_value(Value::Array(list.clone()))?
            } else {
                warn!("unexpected candidates response shape, treating as empty");
                Vec::new()
            };

        let mut by_stage: HashMap<Stage, Vec<Candidate>> =
            Stage::ALL.iter().map(|stage| (*stage, Vec::new())).collect();
        for candidate in candidates {
            by_stage.entry(candidate.stage).or_default().push(candidate);
        }
        Ok(by_stage)
    }
}
