use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::assessment_dto::SaveAssessmentPayload,
    error::{Error, Result},
    AppState,
};

/// A job without an assessment is a normal answer, not an error: the
/// response carries `data: null`.
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    let assessment = state.assessments.get_by_job(&job_id).await?;
    Ok(Json(json!({ "success": true, "data": assessment })))
}

#[axum::debug_handler]
pub async fn save_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(payload): Json<SaveAssessmentPayload>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    payload.validate()?;
    if job_id.trim().is_empty() {
        return Err(Error::BadRequest(
            "job_id is required when saving an assessment".to_string(),
        ));
    }

    let assessment = state.assessments.create_or_replace(&job_id, payload).await?;
    Ok(Json(json!({ "success": true, "data": assessment })))
}

#[axum::debug_handler]
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    state.assessments.delete_by_job(&job_id).await?;
    Ok(Json(json!({ "success": true, "message": "Assessment deleted" })))
}
