mod common;

use std::time::Instant;

use common::{setup_seeded_state, setup_state};
use talentflow_backend::client::ApiClient;
use talentflow_backend::dto::candidate_dto::StageChangePayload;
use talentflow_backend::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use talentflow_backend::models::candidate::Stage;
use talentflow_backend::state::assessments::{AssessmentsActions, AssessmentsState, Existence};
use talentflow_backend::state::candidates::{CandidatesActions, CandidatesState};
use talentflow_backend::state::jobs::{JobFilters, JobsActions, JobsEvent, JobsState};
use talentflow_backend::store::seed::{self, SeedReport};
use talentflow_backend::utils::latency::Latency;
use talentflow_backend::AppState;

#[tokio::test]
async fn seeding_is_idempotent() {
    let state = setup_state().await;

    let first = seed::initialize(&state.pool).await.unwrap();
    assert_eq!(first.jobs, 5);
    assert_eq!(first.candidates, 6);
    assert_eq!(first.assessments, 2);

    let second = seed::initialize(&state.pool).await.unwrap();
    assert_eq!(second, SeedReport::default());
}

#[tokio::test]
async fn jobs_list_flows_into_state() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = JobsActions::new(client);
    let mut state = JobsState::default();

    actions.fetch_list(&mut state).await;

    assert!(!state.list_loading);
    assert!(state.list_error.is_none());
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.pagination.total_items, 5);
    assert_eq!(state.items[0].id, "job-1");
}

#[tokio::test]
async fn filtered_fetch_respects_the_all_sentinel() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = JobsActions::new(client);
    let mut state = JobsState::default();

    // The default filter is the "all" sentinel, which must behave like no
    // filter at all.
    actions.fetch_list(&mut state).await;
    assert_eq!(state.items.len(), 5);

    talentflow_backend::state::jobs::reduce(
        &mut state,
        JobsEvent::FiltersSet(JobFilters {
            status: "active".to_string(),
            ..Default::default()
        }),
    );
    actions.fetch_list(&mut state).await;
    assert_eq!(state.items.len(), 3);
}

#[tokio::test]
async fn failed_detail_fetch_records_error_without_touching_list() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = JobsActions::new(client);
    let mut state = JobsState::default();

    actions.fetch_list(&mut state).await;
    actions.fetch_detail(&mut state, "job-999").await;

    assert!(state.detail_error.is_some());
    assert!(state.current.is_none());
    assert_eq!(state.items.len(), 5);
    assert!(state.list_error.is_none());
}

#[tokio::test]
async fn failed_mutation_keeps_prior_items() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = JobsActions::new(client);
    let mut state = JobsState::default();

    actions.fetch_list(&mut state).await;
    actions
        .update(
            &mut state,
            "job-999",
            &UpdateJobPayload {
                title: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(state.list_error.is_some());
    assert_eq!(state.items.len(), 5);
}

#[tokio::test]
async fn created_job_lands_at_the_front_of_items() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = JobsActions::new(client);
    let mut state = JobsState::default();

    actions.fetch_list(&mut state).await;
    actions
        .create(
            &mut state,
            &CreateJobPayload {
                title: "Platform Engineer".to_string(),
                ..Default::default()
            },
        )
        .await;

    assert_eq!(state.items.len(), 6);
    assert_eq!(state.items[0].title, "Platform Engineer");
    assert_eq!(state.pagination.total_items, 6);

    let id = state.items[0].id.clone();
    actions.delete(&mut state, &id).await;
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.pagination.total_items, 5);
}

#[tokio::test]
async fn board_cache_moves_candidate_only_after_confirmation() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = CandidatesActions::new(client);
    let mut state = CandidatesState::default();

    actions.fetch_by_stage(&mut state, Some("job-1")).await;
    assert_eq!(state.by_stage.len(), 6);
    assert_eq!(state.by_stage[&Stage::Applied].len(), 1);
    assert_eq!(state.by_stage[&Stage::Screen].len(), 1);
    assert!(state.by_stage[&Stage::Hired].is_empty());

    let payload = StageChangePayload {
        candidate_name: "Alice Nguyen".to_string(),
        previous_stage: Stage::Applied,
        new_stage: Stage::Tech,
        previous_stage_title: "Applied".to_string(),
        new_stage_title: "Technical".to_string(),
    };
    actions.move_stage(&mut state, "candidate-1", &payload).await;

    assert!(state.by_stage[&Stage::Applied].is_empty());
    assert_eq!(state.by_stage[&Stage::Tech].len(), 1);
    assert_eq!(state.by_stage[&Stage::Tech][0].id, "candidate-1");
}

#[tokio::test]
async fn failed_board_move_leaves_buckets_untouched() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = CandidatesActions::new(client);
    let mut state = CandidatesState::default();

    actions.fetch_by_stage(&mut state, None).await;
    let applied_before = state.by_stage[&Stage::Applied].len();

    let payload = StageChangePayload {
        candidate_name: "Ghost".to_string(),
        previous_stage: Stage::Applied,
        new_stage: Stage::Screen,
        previous_stage_title: "Applied".to_string(),
        new_stage_title: "Screening".to_string(),
    };
    actions
        .move_stage(&mut state, "candidate-999", &payload)
        .await;

    assert!(state.list_error.is_some());
    assert_eq!(state.by_stage[&Stage::Applied].len(), applied_before);
}

#[tokio::test]
async fn note_action_appends_to_current_candidate() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = CandidatesActions::new(client);
    let mut state = CandidatesState::default();

    actions.fetch_detail(&mut state, "candidate-2").await;
    assert_eq!(state.current.as_ref().unwrap().notes.len(), 1);

    actions
        .add_note(&mut state, "candidate-2", "Book the onsite", false)
        .await;
    assert_eq!(state.current.as_ref().unwrap().notes.len(), 2);
}

#[tokio::test]
async fn add_section_creates_missing_assessment_first() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = AssessmentsActions::new(client.clone());
    let mut state = AssessmentsState::default();
    assert_eq!(state.existence, Existence::Unknown);

    // job-3 has no seeded assessment: the first edit has to create one.
    actions.add_section(&mut state, "job-3", "Basics").await;

    assert_eq!(state.existence, Existence::Exists);
    let draft = state.current.as_ref().unwrap();
    assert_eq!(draft.sections.len(), 1);
    assert_eq!(draft.sections[0].title, "Basics");

    // The section lives only in the draft until saved.
    let fetched = client.get_assessment("job-3").await.unwrap();
    assert!(fetched["data"]["sections"].as_array().unwrap().is_empty());

    actions.save(&mut state, "job-3").await;
    let fetched = client.get_assessment("job-3").await.unwrap();
    assert_eq!(fetched["data"]["sections"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn assessment_existence_tracks_fetch_and_delete() {
    let client = ApiClient::new(setup_seeded_state().await);
    let actions = AssessmentsActions::new(client);
    let mut state = AssessmentsState::default();

    actions.fetch(&mut state, "job-1").await;
    assert_eq!(state.existence, Existence::Exists);
    assert!(state.current.is_some());

    actions.delete(&mut state, "job-1").await;
    assert_eq!(state.existence, Existence::Absent);
    assert!(state.current.is_none());

    actions.fetch(&mut state, "job-1").await;
    assert_eq!(state.existence, Existence::Absent);
}

#[tokio::test]
async fn handlers_wait_out_the_latency_window() {
    let pool = talentflow_backend::database::pool::create_memory_pool()
        .await
        .unwrap();
    talentflow_backend::database::MIGRATOR.run(&pool).await.unwrap();
    let client = ApiClient::new(AppState::new(pool, Latency::new(30, 60)));

    let started = Instant::now();
    client.get_jobs(&Default::default()).await.unwrap();
    assert!(started.elapsed().as_millis() >= 30);
}

#[tokio::test]
async fn api_errors_surface_with_status_and_message() {
    let client = ApiClient::new(setup_state().await);

    let err = client.get_job("job-1").await.unwrap_err();
    match err {
        talentflow_backend::error::Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("not found") || message.contains("Not found"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
