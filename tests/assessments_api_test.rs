mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{request, setup_seeded_state, setup_state};
use talentflow_backend::routes::api_router;

#[tokio::test]
async fn missing_assessment_is_null_data_not_404() {
    let app = api_router(setup_seeded_state().await);

    let (status, body) = request(&app, Method::GET, "/api/assessments/job-404", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn seeded_assessment_is_returned_by_job_id() {
    let state = setup_seeded_state().await;
    let app = api_router(state.clone());

    let (status, body) = request(&app, Method::GET, "/api/assessments/job-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "assessment-job-1");
    assert_eq!(body["data"]["job_id"], "job-1");
    assert!(!body["data"]["sections"].as_array().unwrap().is_empty());

    // Primary-key lookup agrees with the job_id index.
    let stored = state.assessments.get("assessment-job-1").await.unwrap().unwrap();
    assert_eq!(stored.job_id, "job-1");
}

#[tokio::test]
async fn upsert_creates_then_replaces_keeping_identity() {
    let app = api_router(setup_state().await);

    let first = json!({
        "title": "Frontend Screening",
        "description": "Round one",
        "sections": [{
            "id": "section-1",
            "title": "Basics",
            "questions": [{
                "id": "question-1",
                "type": "short_text",
                "title": "Years of React?",
                "required": true
            }]
        }]
    });
    let (status, created) = request(
        &app,
        Method::PUT,
        "/api/assessments/job-7",
        Some(first),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created_id = created["data"]["id"].as_str().unwrap().to_string();
    let created_at = created["data"]["created_at"].clone();
    assert_eq!(created["data"]["job_id"], "job-7");

    let second = json!({
        "title": "Frontend Screening v2",
        "sections": []
    });
    let (_, replaced) = request(
        &app,
        Method::PUT,
        "/api/assessments/job-7",
        Some(second),
    )
    .await;

    // Same record: identity and creation stamp survive, content is new.
    assert_eq!(replaced["data"]["id"], created_id.as_str());
    assert_eq!(replaced["data"]["created_at"], created_at);
    assert_eq!(replaced["data"]["title"], "Frontend Screening v2");
    assert!(replaced["data"]["sections"].as_array().unwrap().is_empty());
    // Omitted fields keep their previous value.
    assert_eq!(replaced["data"]["description"], "Round one");

    let (_, fetched) = request(&app, Method::GET, "/api/assessments/job-7", None).await;
    assert_eq!(fetched["data"]["id"], created_id.as_str());
}

#[tokio::test]
async fn body_job_id_is_ignored_in_favor_of_the_path() {
    let app = api_router(setup_state().await);

    let (_, body) = request(
        &app,
        Method::PUT,
        "/api/assessments/job-9",
        Some(json!({ "title": "Quiz", "job_id": "job-1" })),
    )
    .await;
    assert_eq!(body["data"]["job_id"], "job-9");
}

#[tokio::test]
async fn upsert_without_title_gets_a_default() {
    let app = api_router(setup_state().await);

    let (status, body) = request(&app, Method::PUT, "/api/assessments/job-3", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Assessment for Job job-3");
    assert_eq!(body["data"]["is_active"], true);
}

#[tokio::test]
async fn delete_always_reports_success() {
    let app = api_router(setup_seeded_state().await);

    let (status, body) = request(&app, Method::DELETE, "/api/assessments/job-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Assessment deleted");

    let (_, gone) = request(&app, Method::GET, "/api/assessments/job-1", None).await;
    assert!(gone["data"].is_null());

    // Deleting again, or deleting for a job that never had one, is fine.
    let (status, body) = request(&app, Method::DELETE, "/api/assessments/job-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn dashboard_stats_reflect_store_counts() {
    let app = api_router(setup_seeded_state().await);

    let (status, body) = request(&app, Method::GET, "/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["jobs"], 5);
    assert_eq!(body["data"]["candidates"], 6);
    assert_eq!(body["data"]["jobs_with_assessments"], 2);
    assert_eq!(body["data"]["jobs_without_assessments"], 3);
    assert_eq!(body["data"]["assessment_coverage"], 40);
}
