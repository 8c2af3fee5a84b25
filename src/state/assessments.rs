use serde_json::Value;
use tracing::warn;

use crate::client::ApiClient;
use crate::dto::assessment_dto::SaveAssessmentPayload;
use crate::models::assessment::{Assessment, Question, QuestionType, Section};
use crate::state::normalize::resolve_entity;
use crate::utils::ids::doc_id;
use crate::utils::time::now;

/// Tracks whether the job has a stored assessment at all. `Unknown` until
/// the first fetch completes; gates whether "add section" must create the
/// assessment before editing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Existence {
    #[default]
    Unknown,
    Exists,
    Absent,
}

#[derive(Debug, Clone, Default)]
pub struct AssessmentsState {
    pub current: Option<Assessment>,
    pub existence: Existence,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub correct_options: Option<Vec<usize>>,
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AssessmentsEvent {
    FetchPending,
    FetchFulfilled(Option<Assessment>),
    FetchRejected(String),
    SavePending,
    SaveFulfilled(Assessment),
    SaveRejected(String),
    DeleteFulfilled,
    SectionAdded { title: String },
    SectionUpdated { section_id: String, title: String },
    SectionRemoved { section_id: String },
    QuestionAdded {
        section_id: String,
        kind: QuestionType,
        title: String,
    },
    QuestionUpdated {
        section_id: String,
        question_id: String,
        patch: QuestionPatch,
    },
    QuestionRemoved {
        section_id: String,
        question_id: String,
    },
    ErrorCleared,
}

pub fn reduce(state: &mut AssessmentsState, event: AssessmentsEvent) {
    match event {
        AssessmentsEvent::FetchPending => {
            state.loading = true;
            state.error = None;
        }
        AssessmentsEvent::FetchFulfilled(assessment) => {
            state.existence = if assessment.is_some() {
                Existence::Exists
            } else {
                Existence::Absent
            };
            state.current = assessment;
            state.loading = false;
        }
        AssessmentsEvent::FetchRejected(message) => {
            state.error = Some(message);
            state.loading = false;
        }
        AssessmentsEvent::SavePending => {
            state.saving = true;
            state.error = None;
        }
        AssessmentsEvent::SaveFulfilled(assessment) => {
            state.current = Some(assessment);
            state.existence = Existence::Exists;
            state.saving = false;
        }
        AssessmentsEvent::SaveRejected(message) => {
            state.error = Some(message);
            state.saving = false;
        }
        AssessmentsEvent::DeleteFulfilled => {
            state.current = None;
            state.existence = Existence::Absent;
            state.saving = false;
        }
        AssessmentsEvent::SectionAdded { title } => {
            with_draft(state, |assessment| {
                assessment.sections.push(Section {
                    id: doc_id("section"),
                    title,
                    description: None,
                    questions: Vec::new(),
                });
            });
        }
        AssessmentsEvent::SectionUpdated { section_id, title } => {
            with_draft(state, |assessment| {
                if let Some(section) =
                    assessment.sections.iter_mut().find(|s| s.id == section_id)
                {
                    section.title = title;
                }
            });
        }
        AssessmentsEvent::SectionRemoved { section_id } => {
            with_draft(state, |assessment| {
                assessment.sections.retain(|s| s.id != section_id);
            });
        }
        AssessmentsEvent::QuestionAdded {
            section_id,
            kind,
            title,
        } => {
            with_draft(state, |assessment| {
                if let Some(section) =
                    assessment.sections.iter_mut().find(|s| s.id == section_id)
                {
                    section.questions.push(Question {
                        id: doc_id("question"),
                        kind,
                        title,
                        required: false,
                        options: None,
                        correct_options: None,
                        correct_answer: None,
                    });
                }
            });
        }
        AssessmentsEvent::QuestionUpdated {
            section_id,
            question_id,
            patch,
        } => {
            with_draft(state, |assessment| {
                let question = assessment
                    .sections
                    .iter_mut()
                    .find(|s| s.id == section_id)
                    .and_then(|s| s.questions.iter_mut().find(|q| q.id == question_id));
                if let Some(question) = question {
                    if let Some(title) = patch.title {
                        question.title = title;
                    }
                    if let Some(required) = patch.required {
                        question.required = required;
                    }
                    if let Some(options) = patch.options {
                        question.options = Some(options);
                    }
                    if let Some(correct_options) = patch.correct_options {
                        question.correct_options = Some(correct_options);
                    }
                    if let Some(correct_answer) = patch.correct_answer {
                        question.correct_answer = Some(correct_answer);
                    }
                }
            });
        }
        AssessmentsEvent::QuestionRemoved {
            section_id,
            question_id,
        } => {
            with_draft(state, |assessment| {
                if let Some(section) =
                    assessment.sections.iter_mut().find(|s| s.id == section_id)
                {
                    section.questions.retain(|q| q.id != question_id);
                }
            });
        }
        AssessmentsEvent::ErrorCleared => {
            state.error = None;
        }
    }
}

/// Local draft edits mirror what a persisted write would do: every edit
/// restamps `updated_at` so a later fetch returns an equivalent record.
fn with_draft(state: &mut AssessmentsState, edit: impl FnOnce(&mut Assessment)) {
    if let Some(assessment) = state.current.as_mut() {
        edit(assessment);
        assessment.updated_at = now();
    }
}

#[derive(Clone)]
pub struct AssessmentsActions {
    client: ApiClient,
}

impl AssessmentsActions {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, state: &mut AssessmentsState, job_id: &str) {
        reduce(state, AssessmentsEvent::FetchPending);
        match self.client.get_assessment(job_id).await {
            Ok(raw) => {
                // `data: null` means "no assessment yet", not a failure.
                let assessment = if raw.get("data").map(Value::is_null).unwrap_or(true) {
                    None
                } else {
                    decode_assessment(&raw)
                };
                reduce(state, AssessmentsEvent::FetchFulfilled(assessment));
            }
            Err(err) => reduce(state, AssessmentsEvent::FetchRejected(err.to_string())),
        }
    }

    /// Persists the current draft wholesale.
    pub async fn save(&self, state: &mut AssessmentsState, job_id: &str) {
        let payload = match state.current.as_ref() {
            Some(draft) => SaveAssessmentPayload {
                id: Some(draft.id.clone()),
                title: Some(draft.title.clone()),
                description: draft.description.clone(),
                sections: Some(draft.sections.clone()),
                is_active: Some(draft.is_active),
            },
            None => SaveAssessmentPayload::default(),
        };
        self.save_payload(state, job_id, &payload).await;
    }

    pub async fn delete(&self, state: &mut AssessmentsState, job_id: &str) {
        reduce(state, AssessmentsEvent::SavePending);
        match self.client.delete_assessment(job_id).await {
            Ok(_) => reduce(state, AssessmentsEvent::DeleteFulfilled),
            Err(err) => reduce(state, AssessmentsEvent::SaveRejected(err.to_string())),
        }
    }

    /// Adds a section to the draft, creating the assessment first when the
    /// job does not have one yet.
    pub async fn add_section(&self, state: &mut AssessmentsState, job_id: &str, title: &str) {
        if state.existence == Existence::Unknown {
            self.fetch(state, job_id).await;
        }
        if state.existence == Existence::Absent {
            self.save_payload(state, job_id, &SaveAssessmentPayload::default())
                .await;
            if state.existence != Existence::Exists {
                return;
            }
        }
        reduce(
            state,
            AssessmentsEvent::SectionAdded {
                title: title.to_string(),
            },
        );
    }

    async fn save_payload(
        &self,
        state: &mut AssessmentsState,
        job_id: &str,
        payload: &SaveAssessmentPayload,
    ) {
        reduce(state, AssessmentsEvent::SavePending);
        match self.client.save_assessment(job_id, payload).await {
            Ok(raw) => match decode_assessment(&raw) {
                Some(assessment) => reduce(state, AssessmentsEvent::SaveFulfilled(assessment)),
                None => reduce(
                    state,
                    AssessmentsEvent::SaveRejected("malformed assessment response".to_string()),
                ),
            },
            Err(err) => reduce(state, AssessmentsEvent::SaveRejected(err.to_string())),
        }
    }
}

fn decode_assessment(raw: &Value) -> Option<Assessment> {
    let entity = resolve_entity(raw)?;
    match serde_json::from_value(entity) {
        Ok(assessment) => Some(assessment),
        Err(err) => {
            warn!(error = %err, "failed to decode assessment entity");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> Assessment {
        Assessment {
            id: "assessment-job-1".to_string(),
            job_id: "job-1".to_string(),
            title: "Screening".to_string(),
            description: None,
            sections: vec![Section {
                id: "section-1".to_string(),
                title: "Basics".to_string(),
                description: None,
                questions: Vec::new(),
            }],
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn existence_follows_fetch_save_delete() {
        let mut state = AssessmentsState::default();
        assert_eq!(state.existence, Existence::Unknown);

        reduce(&mut state, AssessmentsEvent::FetchFulfilled(None));
        assert_eq!(state.existence, Existence::Absent);

        reduce(&mut state, AssessmentsEvent::SaveFulfilled(assessment()));
        assert_eq!(state.existence, Existence::Exists);

        reduce(&mut state, AssessmentsEvent::DeleteFulfilled);
        assert_eq!(state.existence, Existence::Absent);
        assert!(state.current.is_none());
    }

    #[test]
    fn draft_edits_restamp_updated_at() {
        let mut state = AssessmentsState::default();
        let mut seeded = assessment();
        seeded.updated_at = seeded.updated_at - chrono::Duration::hours(1);
        let before = seeded.updated_at;
        reduce(&mut state, AssessmentsEvent::FetchFulfilled(Some(seeded)));

        reduce(
            &mut state,
            AssessmentsEvent::QuestionAdded {
                section_id: "section-1".to_string(),
                kind: QuestionType::ShortText,
                title: "Years of experience?".to_string(),
            },
        );
        let current = state.current.as_ref().unwrap();
        assert_eq!(current.sections[0].questions.len(), 1);
        assert!(current.updated_at > before);
    }

    #[test]
    fn question_patch_merges_fields() {
        let mut state = AssessmentsState::default();
        reduce(
            &mut state,
            AssessmentsEvent::FetchFulfilled(Some(assessment())),
        );
        reduce(
            &mut state,
            AssessmentsEvent::QuestionAdded {
                section_id: "section-1".to_string(),
                kind: QuestionType::SingleChoice,
                title: "Preferred stack?".to_string(),
            },
        );
        let question_id = state.current.as_ref().unwrap().sections[0].questions[0]
            .id
            .clone();
        reduce(
            &mut state,
            AssessmentsEvent::QuestionUpdated {
                section_id: "section-1".to_string(),
                question_id,
                patch: QuestionPatch {
                    required: Some(true),
                    options: Some(vec!["Rust".to_string(), "Go".to_string()]),
                    correct_options: Some(vec![0]),
                    ..Default::default()
                },
            },
        );
        let question = &state.current.as_ref().unwrap().sections[0].questions[0];
        assert_eq!(question.title, "Preferred stack?");
        assert!(question.required);
        assert_eq!(question.options.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn section_removal_keeps_other_sections() {
        let mut state = AssessmentsState::default();
        reduce(
            &mut state,
            AssessmentsEvent::FetchFulfilled(Some(assessment())),
        );
        reduce(
            &mut state,
            AssessmentsEvent::SectionAdded {
                title: "Culture".to_string(),
            },
        );
        assert_eq!(state.current.as_ref().unwrap().sections.len(), 2);
        reduce(
            &mut state,
            AssessmentsEvent::SectionRemoved {
                section_id: "section-1".to_string(),
            },
        );
        let sections = &state.current.as_ref().unwrap().sections;
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Culture");
    }
}
