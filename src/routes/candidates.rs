use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::{
        candidate_dto::{
            AddNotePayload, CandidateListQuery, StageChangePayload, UpdateCandidatePayload,
        },
        response::paginate,
    },
    error::{Error, Result},
    store::CandidateFilter,
    utils::time,
    AppState,
};

#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    let filter = CandidateFilter {
        search: query.search,
        stage: query.stage,
        job_id: query.job_id,
    };
    let candidates = state.candidates.list(&filter).await?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).max(1);
    let (candidates, pagination) = paginate(candidates, page, page_size);

    Ok(Json(json!({
        "success": true,
        "data": { "candidates": candidates, "pagination": pagination },
        "timestamp": time::now(),
    })))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    let candidate = state
        .candidates
        .get(&id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": candidate })))
}

#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    payload.validate()?;
    let candidate = state
        .candidates
        .update(&id, payload)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": candidate })))
}

#[axum::debug_handler]
pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddNotePayload>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    payload.validate()?;
    let note = state
        .candidates
        .add_note(&id, payload, "hr@company.com")
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": note })),
    ))
}

#[axum::debug_handler]
pub async fn update_stage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StageChangePayload>,
) -> Result<impl IntoResponse> {
    state.latency.sleep().await;

    payload.validate()?;
    let candidate = state
        .candidates
        .update_stage(&id, &payload)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": candidate })))
}
