use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::client::{ApiClient, CandidatesQuery};
use crate::dto::candidate_dto::{StageChangePayload, UpdateCandidatePayload};
use crate::models::candidate::{Candidate, CandidateNote, Stage};
use crate::state::normalize::{resolve_entity, resolve_list};

#[derive(Debug, Clone)]
pub struct CandidateFilters {
    pub search: Option<String>,
    pub stage: String,
    pub job_id: Option<String>,
}

impl Default for CandidateFilters {
    fn default() -> Self {
        Self {
            search: None,
            stage: "all".to_string(),
            job_id: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CandidatesState {
    pub items: Vec<Candidate>,
    pub current: Option<Candidate>,
    /// Derived kanban columns, keyed by every stage even when empty.
    pub by_stage: HashMap<Stage, Vec<Candidate>>,
    pub list_loading: bool,
    pub list_error: Option<String>,
    pub detail_loading: bool,
    pub detail_error: Option<String>,
    pub filters: CandidateFilters,
    pub pagination: super::jobs::PageCursor,
}

#[derive(Debug, Clone)]
pub enum CandidatesEvent {
    FiltersSet(CandidateFilters),
    PageSet(i64),
    ListPending,
    ListFulfilled {
        items: Vec<Candidate>,
        total_items: i64,
        total_pages: i64,
    },
    ListRejected(String),
    DetailPending,
    DetailFulfilled(Candidate),
    DetailRejected(String),
    Updated(Candidate),
    NoteAdded {
        candidate_id: String,
        note: CandidateNote,
    },
    ByStageFulfilled(HashMap<Stage, Vec<Candidate>>),
    StageMoveFulfilled(Candidate),
    MutationRejected(String),
    ErrorsCleared,
}

pub fn reduce(state: &mut CandidatesState, event: CandidatesEvent) {
    match event {
        CandidatesEvent::FiltersSet(filters) => {
            state.filters = filters;
            state.pagination.current_page = 1;
        }
        CandidatesEvent::PageSet(page) => {
            state.pagination.current_page = page.max(1);
        }
        CandidatesEvent::ListPending => {
            state.list_loading = true;
            state.list_error = None;
        }
        CandidatesEvent::ListFulfilled {
            items,
            total_items,
            total_pages,
        } => {
            state.items = items;
            state.pagination.total_items = total_items;
            state.pagination.total_pages = total_pages;
            state.list_loading = false;
        }
        CandidatesEvent::ListRejected(message) => {
            state.items = Vec::new();
            state.list_error = Some(message);
            state.list_loading = false;
        }
        CandidatesEvent::DetailPending => {
            state.detail_loading = true;
            state.detail_error = None;
        }
        CandidatesEvent::DetailFulfilled(candidate) => {
            state.current = Some(candidate);
            state.detail_loading = false;
        }
        CandidatesEvent::DetailRejected(message) => {
            state.detail_error = Some(message);
            state.detail_loading = false;
        }
        CandidatesEvent::Updated(candidate) => {
            replace_everywhere(state, candidate);
        }
        CandidatesEvent::NoteAdded { candidate_id, note } => {
            if let Some(candidate) = state.items.iter_mut().find(|c| c.id == candidate_id) {
                candidate.notes.push(note.clone());
            }
            if let Some(current) = state.current.as_mut() {
                if current.id == candidate_id {
                    current.notes.push(note);
                }
            }
        }
        CandidatesEvent::ByStageFulfilled(by_stage) => {
            state.by_stage = by_stage;
            state.list_loading = false;
        }
        CandidatesEvent::StageMoveFulfilled(candidate) => {
            // Remove from every column before reinserting, so a candidate
            // can never appear on the board twice.
            for bucket in state.by_stage.values_mut() {
                bucket.retain(|c| c.id != candidate.id);
            }
            state
                .by_stage
                .entry(candidate.stage)
                .or_default()
                .push(candidate.clone());
            replace_everywhere(state, candidate);
        }
        CandidatesEvent::MutationRejected(message) => {
            state.list_error = Some(message);
        }
        CandidatesEvent::ErrorsCleared => {
            state.list_error = None;
            state.detail_error = None;
        }
    }
}

fn replace_everywhere(state: &mut CandidatesState, candidate: Candidate) {
    if let Some(existing) = state.items.iter_mut().find(|c| c.id == candidate.id) {
        *existing = candidate.clone();
    }
    if state.current.as_ref().map(|c| &c.id) == Some(&candidate.id) {
        state.current = Some(candidate);
    }
}

#[derive(Clone)]
pub struct CandidatesActions {
    client: ApiClient,
}

impl CandidatesActions {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch_list(&self, state: &mut CandidatesState) {
        reduce(state, CandidatesEvent::ListPending);
        let params = CandidatesQuery {
            search: state.filters.search.clone(),
            stage: Some(state.filters.stage.clone()),
            job_id: state.filters.job_id.clone(),
            page: Some(state.pagination.current_page),
            page_size: Some(state.pagination.page_size),
        };
        match self.client.get_candidates(&params).await {
            Ok(raw) => {
                let resolved = resolve_list(&raw, "candidates");
                let fallback_len = resolved.items.len() as i64;
                let items: Vec<Candidate> = serde_json::from_value(Value::Array(resolved.items))
                    .unwrap_or_else(|err| {
                        warn!(error = %err, "failed to decode candidates list, treating as empty");
                        Vec::new()
                    });
                reduce(
                    state,
                    CandidatesEvent::ListFulfilled {
                        items,
                        total_items: resolved.total_items.unwrap_or(fallback_len),
                        total_pages: resolved.total_pages.unwrap_or(1),
                    },
                );
            }
            Err(err) => reduce(state, CandidatesEvent::ListRejected(err.to_string())),
        }
    }

    pub async fn fetch_detail(&self, state: &mut CandidatesState, id: &str) {
        reduce(state, CandidatesEvent::DetailPending);
        match self.client.get_candidate(id).await {
            Ok(raw) => match decode_candidate(&raw) {
                Some(candidate) => reduce(state, CandidatesEvent::DetailFulfilled(candidate)),
                None => reduce(
                    state,
                    CandidatesEvent::DetailRejected("malformed candidate response".to_string()),
                ),
            },
            Err(err) => reduce(state, CandidatesEvent::DetailRejected(err.to_string())),
        }
    }

    pub async fn update(
        &self,
        state: &mut CandidatesState,
        id: &str,
        payload: &UpdateCandidatePayload,
    ) {
        match self.client.update_candidate(id, payload).await {
            Ok(raw) => {
                if let Some(candidate) = decode_candidate(&raw) {
                    reduce(state, CandidatesEvent::Updated(candidate));
                }
            }
            Err(err) => reduce(state, CandidatesEvent::MutationRejected(err.to_string())),
        }
    }

    pub async fn add_note(
        &self,
        state: &mut CandidatesState,
        id: &str,
        content: &str,
        is_private: bool,
    ) {
        match self.client.add_note(id, content, is_private).await {
            Ok(raw) => {
                let note = resolve_entity(&raw).and_then(|entity| {
                    serde_json::from_value::<CandidateNote>(entity)
                        .map_err(|err| warn!(error = %err, "failed to decode created note"))
                        .ok()
                });
                if let Some(note) = note {
                    reduce(
                        state,
                        CandidatesEvent::NoteAdded {
                            candidate_id: id.to_string(),
                            note,
                        },
                    );
                }
            }
            Err(err) => reduce(state, CandidatesEvent::MutationRejected(err.to_string())),
        }
    }

    pub async fn fetch_by_stage(&self, state: &mut CandidatesState, job_id: Option<&str>) {
        reduce(state, CandidatesEvent::ListPending);
        match self.client.get_candidates_by_stage(job_id).await {
            Ok(by_stage) => reduce(state, CandidatesEvent::ByStageFulfilled(by_stage)),
            Err(err) => reduce(state, CandidatesEvent::ListRejected(err.to_string())),
        }
    }

    /// Board move: nothing local changes until the write is confirmed, so
    /// a failed request leaves the dragged card where it started.
    pub async fn move_stage(
        &self,
        state: &mut CandidatesState,
        id: &str,
        payload: &StageChangePayload,
    ) {
        match self.client.update_stage(id, payload).await {
            Ok(raw) => {
                if let Some(candidate) = decode_candidate(&raw) {
                    reduce(state, CandidatesEvent::StageMoveFulfilled(candidate));
                }
            }
            Err(err) => reduce(state, CandidatesEvent::MutationRejected(err.to_string())),
        }
    }
}

fn decode_candidate(raw: &Value) -> Option<Candidate> {
    let entity = resolve_entity(raw)?;
    match serde_json::from_value(entity) {
        Ok(candidate) => Some(candidate),
        Err(err) => {
            warn!(error = %err, "failed to decode candidate entity");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, stage: Stage) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Candidate {id}"),
            email: format!("{id}@example.com"),
            stage,
            ..Default::default()
        }
    }

    #[test]
    fn stage_move_relocates_between_buckets() {
        let mut state = CandidatesState::default();
        let mut by_stage: HashMap<Stage, Vec<Candidate>> =
            Stage::ALL.iter().map(|s| (*s, Vec::new())).collect();
        by_stage
            .get_mut(&Stage::Applied)
            .unwrap()
            .push(candidate("c1", Stage::Applied));
        reduce(&mut state, CandidatesEvent::ByStageFulfilled(by_stage));

        reduce(
            &mut state,
            CandidatesEvent::StageMoveFulfilled(candidate("c1", Stage::Screen)),
        );
        assert!(state.by_stage[&Stage::Applied].is_empty());
        assert_eq!(state.by_stage[&Stage::Screen].len(), 1);
        assert_eq!(state.by_stage[&Stage::Screen][0].stage, Stage::Screen);
    }

    #[test]
    fn note_added_appends_to_items_and_current() {
        let mut state = CandidatesState::default();
        state.items = vec![candidate("c1", Stage::Applied)];
        state.current = Some(candidate("c1", Stage::Applied));
        let note = CandidateNote {
            id: "note-1".to_string(),
            content: "Strong portfolio".to_string(),
            created_at: chrono::Utc::now(),
            created_by: "hr@company.com".to_string(),
            is_private: false,
        };
        reduce(
            &mut state,
            CandidatesEvent::NoteAdded {
                candidate_id: "c1".to_string(),
                note,
            },
        );
        assert_eq!(state.items[0].notes.len(), 1);
        assert_eq!(state.current.as_ref().unwrap().notes.len(), 1);
    }

    #[test]
    fn filters_set_resets_page() {
        let mut state = CandidatesState::default();
        state.pagination.current_page = 3;
        reduce(
            &mut state,
            CandidatesEvent::FiltersSet(CandidateFilters {
                stage: "tech".to_string(),
                ..Default::default()
            }),
        );
        assert_eq!(state.pagination.current_page, 1);
    }
}
