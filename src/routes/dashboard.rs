use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    let jobs = state.jobs.count().await?;
    let candidates = state.candidates.count().await?;
    let assessments = state.assessments.count().await?;
    let jobs_with_assessments = state.assessments.jobs_with_assessments().await?;
    let jobs_without_assessments = (jobs - jobs_with_assessments).max(0);
    let assessment_coverage = if jobs > 0 {
        ((jobs_with_assessments as f64 / jobs as f64) * 100.0).round() as i64
    } else {
        0
    };

    Ok(Json(json!({
        "success": true,
        "data": {
            "jobs": jobs,
            "candidates": candidates,
            "assessments": assessments,
            "jobs_with_assessments": jobs_with_assessments,
            "jobs_without_assessments": jobs_without_assessments,
            "assessment_coverage": assessment_coverage,
        },
    })))
}
