use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::{
        job_dto::{CreateJobPayload, JobListQuery, ReorderJobsPayload, UpdateJobPayload},
        response::paginate,
    },
    error::{Error, Result},
    store::JobFilter,
    utils::time,
    AppState,
};

#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    let filter = JobFilter {
        search: query.search,
        status: query.status,
        department: query.department,
    };
    let jobs = state.jobs.list(&filter).await?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).max(1);
    let (jobs, pagination) = paginate(jobs, page, page_size);

    Ok(Json(json!({
        "success": true,
        "data": { "jobs": jobs, "pagination": pagination },
        "timestamp": time::now(),
    })))
}

#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    let job = state
        .jobs
        .get(&id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": job })))
}

#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    payload.validate()?;
    let job = state.jobs.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": job })),
    ))
}

#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    payload.validate()?;
    let job = state
        .jobs
        .update(&id, payload)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": job })))
}

#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    state.jobs.delete(&id).await?;
    Ok(Json(json!({ "success": true, "message": "Job deleted" })))
}

#[axum::debug_handler]
pub async fn reorder_jobs(
    State(state): State<AppState>,
    Json(payload): Json<ReorderJobsPayload>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    payload.validate()?;
    let job_ids = state.jobs.reorder(&payload.job_ids).await?;
    Ok(Json(json!({ "success": true, "data": job_ids })))
}
