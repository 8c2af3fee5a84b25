use sqlx::SqlitePool;

use crate::store::{AssessmentStore, CandidateStore, JobStore};
use crate::utils::latency::Latency;

pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jobs: JobStore,
    pub candidates: CandidateStore,
    pub assessments: AssessmentStore,
    pub latency: Latency,
}

impl AppState {
    pub fn new(pool: SqlitePool, latency: Latency) -> Self {
        Self {
            jobs: JobStore::new(pool.clone()),
            candidates: CandidateStore::new(pool.clone()),
            assessments: AssessmentStore::new(pool.clone()),
            pool,
            latency,
        }
    }
}
