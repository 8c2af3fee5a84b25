use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::Result;
use crate::models::job::Job;
use crate::utils::{ids, slug, time};

/// Jobs collection. Documents live in a JSON column; status, department
/// and the sort key are duplicated into indexed columns for filtering.
#[derive(Clone)]
pub struct JobStore {
    pool: SqlitePool,
}

#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring match on title/description.
    pub search: Option<String>,
    /// Exact status match; `None` or the literal "all" means no filter.
    pub status: Option<String>,
    pub department: Option<String>,
}

impl JobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let now = time::now();
        let order = self.count().await? + 1;
        let job = Job {
            id: ids::doc_id("job"),
            slug: payload
                .slug
                .unwrap_or_else(|| slug::slugify(&payload.title)),
            title: payload.title,
            description: payload.description.unwrap_or_default(),
            status: payload.status.unwrap_or_default(),
            tags: payload.tags.unwrap_or_default(),
            location: payload.location.unwrap_or_default(),
            job_type: payload.job_type.unwrap_or_else(|| "Full-time".to_string()),
            department: payload.department.unwrap_or_default(),
            requirements: payload.requirements.unwrap_or_default(),
            responsibilities: payload.responsibilities.unwrap_or_default(),
            salary_range: payload.salary_range,
            created_at: now,
            updated_at: now,
            created_by: Some("current-user@company.com".to_string()),
            order,
            applicant_count: 0,
            is_featured: false,
        };
        self.insert(&job).await?;
        info!(job_id = %job.id, "Job created");
        Ok(job)
    }

    pub async fn insert(&self, job: &Job) -> Result<()> {
        sqlx::query(
            "INSERT INTO jobs (id, status, department, sort_order, created_at, doc)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&job.id)
        .bind(job.status.as_str())
        .bind(&job.department)
        .bind(job.order)
        .bind(time::to_rfc3339(job.created_at))
        .bind(serde_json::to_string(job)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Job>> {
        let row = sqlx::query("SELECT doc FROM jobs WHERE id = ?")
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

    /// Merges the provided fields into the stored document and restamps
    /// `updated_at`. Returns `None` when the id is absent.
    pub async fn update(&self, id: &str, payload: UpdateJobPayload) -> Result<Option<Job>> {
        let Some(mut job) = self.get(id).await? else {
            return Ok(None);
        };

        if let Some(title) = payload.title {
            job.title = title;
        }
        if let Some(slug) = payload.slug {
            job.slug = slug;
        }
        if let Some(description) = payload.description {
            job.description = description;
        }
        if let Some(status) = payload.status {
            job.status = status;
        }
        if let Some(tags) = payload.tags {
            job.tags = tags;
        }
        if let Some(location) = payload.location {
            job.location = location;
        }
        if let Some(job_type) = payload.job_type {
            job.job_type = job_type;
        }
        if let Some(department) = payload.department {
            job.department = department;
        }
        if let Some(requirements) = payload.requirements {
            job.requirements = requirements;
        }
        if let Some(responsibilities) = payload.responsibilities {
            job.responsibilities = responsibilities;
        }
        if let Some(salary_range) = payload.salary_range {
            job.salary_range = Some(salary_range);
        }
        if let Some(order) = payload.order {
            job.order = order;
        }
        if let Some(applicant_count) = payload.applicant_count {
            job.applicant_count = applicant_count;
        }
        if let Some(is_featured) = payload.is_featured {
            job.is_featured = is_featured;
        }
        job.updated_at = time::now();

        self.persist(&job).await?;
        Ok(Some(job))
    }

    /// Idempotent: deleting an absent id is a no-op.
    pub async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = &filter.status {
            if status != "all" {
                clauses.push("status = ?");
                binds.push(status.clone());
            }
        }
        if let Some(department) = &filter.department {
            clauses.push("department = ?");
            binds.push(department.clone());
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT doc FROM jobs {} ORDER BY sort_order ASC",
            where_clause
        );

        let mut statement = sqlx::query(&sql);
        for value in &binds {
            statement = statement.bind(value);
        }
        let rows = statement.fetch_all(&self.pool).await?;

        let mut jobs = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: String = row.get("doc");
            jobs.push(serde_json::from_str::<Job>(&doc)?);
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            jobs.retain(|job| {
                job.title.to_lowercase().contains(&needle)
                    || job.description.to_lowercase().contains(&needle)
            });
        }

        Ok(jobs)
    }

    /// Reassigns `order` for the given ids to `min(existing orders) +
    /// position`, preserving the relative placement of jobs not included.
    /// Ids that do not resolve to a job are skipped.
    pub async fn reorder(&self, job_ids: &[String]) -> Result<Vec<String>> {
        let mut min_order: Option<i64> = None;
        for id in job_ids {
            if let Some(job) = self.get(id).await? {
                min_order = Some(match min_order {
                    Some(current) => current.min(job.order),
                    None => job.order,
                });
            }
        }
        let base = min_order.unwrap_or(0);

        for (index, id) in job_ids.iter().enumerate() {
            if let Some(mut job) = self.get(id).await? {
                job.order = base + index as i64;
                job.updated_at = time::now();
                self.persist(&job).await?;
            }
        }

        Ok(job_ids.to_vec())
    }

    async fn persist(&self, job: &Job) -> Result<()> {
        sqlx::query(
            "UPDATE jobs SET status = ?, department = ?, sort_order = ?, doc = ? WHERE id = ?",
        )
        .bind(job.status.as_str())
        .bind(&job.department)
        .bind(job.order)
        .bind(serde_json::to_string(job)?)
        .bind(&job.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
