use serde_json::Value;
use tracing::warn;

use crate::client::{ApiClient, JobsQuery};
use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::models::job::Job;
use crate::state::normalize::{resolve_entity, resolve_list};

#[derive(Debug, Clone)]
pub struct JobFilters {
    pub search: Option<String>,
    pub status: String,
    pub department: Option<String>,
}

impl Default for JobFilters {
    fn default() -> Self {
        Self {
            search: None,
            status: "all".to_string(),
            department: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageCursor {
    pub current_page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
            total_items: 0,
            total_pages: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobsState {
    pub items: Vec<Job>,
    pub current: Option<Job>,
    pub list_loading: bool,
    pub list_error: Option<String>,
    pub detail_loading: bool,
    pub detail_error: Option<String>,
    pub filters: JobFilters,
    pub pagination: PageCursor,
}

#[derive(Debug, Clone)]
pub enum JobsEvent {
    FiltersSet(JobFilters),
    PageSet(i64),
    ListPending,
    ListFulfilled {
        items: Vec<Job>,
        total_items: i64,
        total_pages: i64,
    },
    ListRejected(String),
    DetailPending,
    DetailFulfilled(Job),
    DetailRejected(String),
    Created(Job),
    Updated(Job),
    Deleted(String),
    Reordered(Vec<String>),
    MutationRejected(String),
    ErrorsCleared,
}

pub fn reduce(state: &mut JobsState, event: JobsEvent) {
    match event {
        JobsEvent::FiltersSet(filters) => {
            // A filter change invalidates the current page position.
            state.filters = filters;
            state.pagination.current_page = 1;
        }
        JobsEvent::PageSet(page) => {
            state.pagination.current_page = page.max(1);
        }
        JobsEvent::ListPending => {
            state.list_loading = true;
            state.list_error = None;
        }
        JobsEvent::ListFulfilled {
            items,
            total_items,
            total_pages,
        } => {
            state.items = items;
            state.pagination.total_items = total_items;
            state.pagination.total_pages = total_pages;
            state.list_loading = false;
        }
        JobsEvent::ListRejected(message) => {
            // Stale rows next to an error banner would be misleading.
            state.items = Vec::new();
            state.list_error = Some(message);
            state.list_loading = false;
        }
        JobsEvent::DetailPending => {
            state.detail_loading = true;
            state.detail_error = None;
        }
        JobsEvent::DetailFulfilled(job) => {
            state.current = Some(job);
            state.detail_loading = false;
        }
        JobsEvent::DetailRejected(message) => {
            state.detail_error = Some(message);
            state.detail_loading = false;
        }
        JobsEvent::Created(job) => {
            state.items.insert(0, job);
            state.pagination.total_items += 1;
        }
        JobsEvent::Updated(job) => {
            if let Some(existing) = state.items.iter_mut().find(|j| j.id == job.id) {
                *existing = job.clone();
            }
            if state.current.as_ref().map(|j| &j.id) == Some(&job.id) {
                state.current = Some(job);
            }
        }
        JobsEvent::Deleted(id) => {
            state.items.retain(|j| j.id != id);
            if state.current.as_ref().map(|j| &j.id) == Some(&id) {
                state.current = None;
            }
            state.pagination.total_items = (state.pagination.total_items - 1).max(0);
        }
        JobsEvent::Reordered(ids) => {
            let mut reordered = Vec::with_capacity(state.items.len());
            for id in &ids {
                if let Some(pos) = state.items.iter().position(|j| &j.id == id) {
                    reordered.push(state.items.remove(pos));
                }
            }
            reordered.append(&mut state.items);
            for (index, job) in reordered.iter_mut().enumerate() {
                job.order = index as i64;
            }
            state.items = reordered;
        }
        JobsEvent::MutationRejected(message) => {
            // Unlike a list rejection, items are kept: the prior state is
            // still valid, only the attempted write failed.
            state.list_error = Some(message);
        }
        JobsEvent::ErrorsCleared => {
            state.list_error = None;
            state.detail_error = None;
        }
    }
}

/// Runs job effects against the API and feeds the results back through
/// [`reduce`]. Failures land in state as messages, never as panics.
#[derive(Clone)]
pub struct JobsActions {
    client: ApiClient,
}

impl JobsActions {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch_list(&self, state: &mut JobsState) {
        reduce(state, JobsEvent::ListPending);
        let params = JobsQuery {
            search: state.filters.search.clone(),
            status: Some(state.filters.status.clone()),
            department: state.filters.department.clone(),
            page: Some(state.pagination.current_page),
            page_size: Some(state.pagination.page_size),
        };
        match self.client.get_jobs(&params).await {
            Ok(raw) => {
                let resolved = resolve_list(&raw, "jobs");
                let fallback_len = resolved.items.len() as i64;
                let items: Vec<Job> = serde_json::from_value(Value::Array(resolved.items))
                    .unwrap_or_else(|err| {
                        warn!(error = %err, "failed to decode jobs list, treating as empty");
                        Vec::new()
                    });
                reduce(
                    state,
                    JobsEvent::ListFulfilled {
                        items,
                        total_items: resolved.total_items.unwrap_or(fallback_len),
                        total_pages: resolved.total_pages.unwrap_or(1),
                    },
                );
            }
            Err(err) => reduce(state, JobsEvent::ListRejected(err.to_string())),
        }
    }

    pub async fn fetch_detail(&self, state: &mut JobsState, id: &str) {
        reduce(state, JobsEvent::DetailPending);
        match self.client.get_job(id).await {
            Ok(raw) => match decode_job(&raw) {
                Some(job) => reduce(state, JobsEvent::DetailFulfilled(job)),
                None => reduce(
                    state,
                    JobsEvent::DetailRejected("malformed job response".to_string()),
                ),
            },
            Err(err) => reduce(state, JobsEvent::DetailRejected(err.to_string())),
        }
    }

    pub async fn create(&self, state: &mut JobsState, payload: &CreateJobPayload) {
        match self.client.create_job(payload).await {
            Ok(raw) => {
                if let Some(job) = decode_job(&raw) {
                    reduce(state, JobsEvent::Created(job));
                }
            }
            Err(err) => reduce(state, JobsEvent::MutationRejected(err.to_string())),
        }
    }

    pub async fn update(&self, state: &mut JobsState, id: &str, payload: &UpdateJobPayload) {
        match self.client.update_job(id, payload).await {
            Ok(raw) => {
                if let Some(job) = decode_job(&raw) {
                    reduce(state, JobsEvent::Updated(job));
                }
            }
            Err(err) => reduce(state, JobsEvent::MutationRejected(err.to_string())),
        }
    }

    pub async fn delete(&self, state: &mut JobsState, id: &str) {
        match self.client.delete_job(id).await {
            Ok(_) => reduce(state, JobsEvent::Deleted(id.to_string())),
            Err(err) => reduce(state, JobsEvent::MutationRejected(err.to_string())),
        }
    }

    pub async fn reorder(&self, state: &mut JobsState, job_ids: Vec<String>) {
        match self.client.reorder_jobs(&job_ids).await {
            Ok(_) => reduce(state, JobsEvent::Reordered(job_ids)),
            Err(err) => reduce(state, JobsEvent::MutationRejected(err.to_string())),
        }
    }
}

fn decode_job(raw: &Value) -> Option<Job> {
    let entity = resolve_entity(raw)?;
    match serde_json::from_value(entity) {
        Ok(job) => Some(job),
        Err(err) => {
            warn!(error = %err, "failed to decode job entity");
            None
        }
    }
}
