use serde_json::json;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::dto::candidate_dto::{
    AddNotePayload, CreateCandidatePayload, StageChangePayload, UpdateCandidatePayload,
};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateNote, TimelineEvent};
use crate::utils::{ids, time};

#[derive(Clone)]
pub struct CandidateStore {
    pool: SqlitePool,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// Case-insensitive substring match on name, email, or any skill.
    pub search: Option<String>,
    /// Exact stage match; `None` or the literal "all" means no filter.
    pub stage: Option<String>,
    pub job_id: Option<String>,
}

impl CandidateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let now = time::now();
        let name = payload.name;
        let stage = payload.stage.unwrap_or_default();
        let candidate = Candidate {
            id: ids::doc_id("candidate"),
            email: payload.email,
            phone: payload.phone.unwrap_or_default(),
            job_id: payload.job_id.unwrap_or_default(),
            stage,
            location: payload.location.unwrap_or_default(),
            experience: payload.experience.unwrap_or_default(),
            skills: payload.skills.unwrap_or_default(),
            applied_at: now,
            updated_at: now,
            notes: Vec::new(),
            timeline: vec![TimelineEvent {
                id: ids::doc_id("timeline"),
                kind: "applied".to_string(),
                message: format!("{} applied for the position", name),
                created_at: now,
                created_by: "system".to_string(),
                metadata: None,
            }],
            name,
        };
        self.insert(&candidate).await?;
        info!(candidate_id = %candidate.id, "Candidate created");
        Ok(candidate)
    }

    pub async fn insert(&self, candidate: &Candidate) -> Result<()> {
        sqlx::query(
            "INSERT INTO candidates (id, job_id, stage, applied_at, updated_at, doc)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&candidate.id)
        .bind(&candidate.job_id)
        .bind(candidate.stage.as_str())
        .bind(time::to_rfc3339(candidate.applied_at))
        .bind(time::to_rfc3339(candidate.updated_at))
        .bind(serde_json::to_string(candidate)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Candidate>> {
        let row = sqlx::query("SELECT doc FROM candidates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let doc: String = row.get("doc");
                Ok(Some(serde_json::from_str(&doc)?))
            }
            None => Ok(None),
        }
    }

    pub async fn update(
        &self,
        id: &str,
        payload: UpdateCandidatePayload,
    ) -> Result<Option<Candidate>> {
        let Some(mut candidate) = self.get(id).await? else {
            return Ok(None);
        };

        if let Some(name) = payload.name {
            candidate.name = name;
        }
        if let Some(email) = payload.email {
            candidate.email = email;
        }
        if let Some(phone) = payload.phone {
            candidate.phone = phone;
        }
        if let Some(job_id) = payload.job_id {
            candidate.job_id = job_id;
        }
        if let Some(stage) = payload.stage {
            candidate.stage = stage;
        }
        if let Some(location) = payload.location {
            candidate.location = location;
        }
        if let Some(experience) = payload.experience {
            candidate.experience = experience;
        }
        if let Some(skills) = payload.skills {
            candidate.skills = skills;
        }
        candidate.updated_at = time::now();

        self.persist(&candidate).await?;
        Ok(Some(candidate))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM candidates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(stage) = &filter.stage {
            if stage != "all" {
                clauses.push("stage = ?");
                binds.push(stage.clone());
            }
        }
        if let Some(job_id) = &filter.job_id {
            clauses.push("job_id = ?");
            binds.push(job_id.clone());
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT doc FROM candidates {} ORDER BY applied_at ASC",
            where_clause
        );

        let mut statement = sqlx::query(&sql);
        for value in &binds {
            statement = statement.bind(value);
        }
        let rows = statement.fetch_all(&self.pool).await?;

        let mut candidates = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: String = row.get("doc");
            candidates.push(serde_json::from_str::<Candidate>(&doc)?);
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            candidates.retain(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
                    || c.skills.iter().any(|s| s.to_lowercase().contains(&needle))
            });
        }

        Ok(candidates)
    }

    /// Appends a note. The one store operation that errors on a missing
    /// id instead of returning `None`.
    pub async fn add_note(
        &self,
        id: &str,
        payload: AddNotePayload,
        created_by: &str,
    ) -> Result<CandidateNote> {
        let Some(mut candidate) = self.get(id).await? else {
            return Err(Error::NotFound("Candidate not found".to_string()));
        };

        let note = CandidateNote {
            id: ids::doc_id("note"),
            content: payload.content,
            created_at: time::now(),
            created_by: created_by.to_string(),
            is_private: payload.is_private,
        };
        candidate.notes.push(note.clone());
        self.persist(&candidate).await?;

        info!(candidate_id = %id, "Note added to candidate");
        Ok(note)
    }

    /// Updates the stage and appends exactly one "stage_change" timeline
    /// event in a single document write.
    pub async fn update_stage(
        &self,
        id: &str,
        payload: &StageChangePayload,
    ) -> Result<Option<Candidate>> {
        let Some(mut candidate) = self.get(id).await? else {
            return Ok(None);
        };

        candidate.timeline.push(TimelineEvent {
            id: ids::doc_id("timeline"),
            kind: "stage_change".to_string(),
            message: format!(
                "{} moved from {} to {}",
                payload.candidate_name, payload.previous_stage_title, payload.new_stage_title
            ),
            created_at: time::now(),
            created_by: "By HR".to_string(),
            metadata: Some(json!({
                "previousStage": payload.previous_stage,
                "newStage": payload.new_stage,
                "previousStageTitle": payload.previous_stage_title,
                "newStageTitle": payload.new_stage_title,
            })),
        });
        candidate.stage = payload.new_stage;
        candidate.updated_at = time::now();

        self.persist(&candidate).await?;
        Ok(Some(candidate))
    }

    async fn persist(&self, candidate: &Candidate) -> Result<()> {
        sqlx::query(
            "UPDATE candidates SET job_id = ?, stage = ?, applied_at = ?, updated_at = ?, doc = ?
             WHERE id = ?",
        )
        .bind(&candidate.job_id)
        .bind(candidate.stage.as_str())
        .bind(time::to_rfc3339(candidate.applied_at))
        .bind(time::to_rfc3339(candidate.updated_at))
        .bind(serde_json::to_string(candidate)?)
        .bind(&candidate.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
