use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::dto::assessment_dto::SaveAssessmentPayload;
use crate::error::Result;
use crate::models::assessment::Assessment;
use crate::utils::{ids, time};

/// Assessments collection. Keyed by primary id, but the meaningful lookup
/// is the secondary `job_id` index: one assessment per job, guaranteed by
/// upsert semantics rather than a uniqueness constraint.
#[derive(Clone)]
pub struct AssessmentStore {
    pool: SqlitePool,
}

impl AssessmentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assessments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn jobs_with_assessments(&self) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT job_id) FROM assessments")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn insert(&self, assessment: &Assessment) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO assessments (id, job_id, created_at, doc)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&assessment.id)
        .bind(&assessment.job_id)
        .bind(time::to_rfc3339(assessment.created_at))
        .bind(serde_json::to_string(assessment)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Assessment>> {
        let row = sqlx::query("SELECT doc FROM assessments WHERE id = ?")
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

    pub async fn get_by_job(&self, job_id: &str) -> Result<Option<Assessment>> {
        let row = sqlx::query(
            "SELECT doc FROM assessments WHERE job_id = ? ORDER BY created_at ASC LIMIT 1",
        )
        .bind(job_id)
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

    /// Upsert keyed by `job_id`: an existing record keeps its `id` and
    /// `created_at` while every provided field is replaced; otherwise a
    /// new record is created.
    pub async fn create_or_replace(
        &self,
        job_id: &str,
        payload: SaveAssessmentPayload,
    ) -> Result<Assessment> {
        let now = time::now();
        let assessment = match self.get_by_job(job_id).await? {
            Some(existing) => Assessment {
                id: existing.id,
                job_id: job_id.to_string(),
                title: payload.title.unwrap_or(existing.title),
                description: payload.description.or(existing.description),
                sections: payload.sections.unwrap_or(existing.sections),
                is_active: payload.is_active.unwrap_or(existing.is_active),
                created_at: existing.created_at,
                updated_at: now,
            },
            None => Assessment {
                id: payload
                    .id
                    .unwrap_or_else(|| ids::doc_id(&format!("assessment-{}", job_id))),
                job_id: job_id.to_string(),
                title: payload
                    .title
                    .unwrap_or_else(|| format!("Assessment for Job {}", job_id)),
                description: payload.description,
                sections: payload.sections.unwrap_or_default(),
                is_active: payload.is_active.unwrap_or(true),
                created_at: now,
                updated_at: now,
            },
        };

        self.insert(&assessment).await?;
        info!(job_id = %job_id, assessment_id = %assessment.id, "Assessment saved");
        Ok(assessment)
    }

    /// Deletes the assessment for a job if one exists. Returns whether a
    /// record was removed.
    pub async fn delete_by_job(&self, job_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM assessments WHERE job_id = ?")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
