use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

pub mod assessments;
pub mod candidates;
pub mod dashboard;
pub mod health;
pub mod jobs;

/// The full intercepted API surface. The in-process client drives this
/// router directly; the binary serves the same router over TCP.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/reorder", patch(jobs::reorder_jobs))
        .route(
            "/api/jobs/:id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/api/candidates", get(candidates::list_candidates))
        .route(
            "/api/candidates/:id",
            get(candidates::get_candidate).patch(candidates::update_candidate),
        )
        .route("/api/candidates/:id/notes", post(candidates::add_note))
        .route("/api/candidates/:id/stage", patch(candidates::update_stage))
        .route(
            "/api/assessments/:job_id",
            get(assessments::get_assessment)
                .put(assessments::save_assessment)
                .delete(assessments::delete_assessment),
        )
        .route("/api/dashboard/stats", get(dashboard::get_stats))
        .with_state(state)
}
