#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use talentflow_backend::database::pool::create_memory_pool;
use talentflow_backend::database::MIGRATOR;
use talentflow_backend::store::seed;
use talentflow_backend::utils::latency::Latency;
use talentflow_backend::AppState;

pub async fn setup_state() -> AppState {
    let pool = create_memory_pool().await.unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    AppState::new(pool, Latency::zero())
}

pub async fn setup_seeded_state() -> AppState {
    let state = setup_state().await;
    seed::initialize(&state.pool).await.unwrap();
    state
}

pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
