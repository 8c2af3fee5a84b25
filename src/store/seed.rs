use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::Result;
use crate::models::assessment::{Assessment, Section};
use crate::models::candidate::{Candidate, CandidateNote, Stage, TimelineEvent};
use crate::models::job::{Job, JobStatus};
use crate::store::{AssessmentStore, CandidateStore, JobStore};
use crate::utils::{ids, slug, time};

const JOBS_JSON: &str = include_str!("../../data/jobs.json");
const CANDIDATES_JSON: &str = include_str!("../../data/candidates.json");
const ASSESSMENTS_JSON: &str = include_str!("../../data/assessments.json");

/// Records inserted per collection. Zero for collections that already
/// held data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub jobs: usize,
    pub candidates: usize,
    pub assessments: usize,
}

/// Populates empty collections from the bundled fixtures. Idempotent: a
/// collection is only seeded when its count is zero.
pub async fn initialize(pool: &SqlitePool) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let jobs = JobStore::new(pool.clone());
    if jobs.count().await? == 0 {
        report.jobs = seed_jobs(&jobs).await?;
        info!(count = report.jobs, "Seeded jobs");
    }

    let candidates = CandidateStore::new(pool.clone());
    if candidates.count().await? == 0 {
        report.candidates = seed_candidates(&candidates).await?;
        info!(count = report.candidates, "Seeded candidates");
    }

    let assessments = AssessmentStore::new(pool.clone());
    if assessments.count().await? == 0 {
        report.assessments = seed_assessments(&assessments).await?;
        info!(count = report.assessments, "Seeded assessments");
    }

    Ok(report)
}

// Fixture records tolerate both snake_case and camelCase field names and
// may omit timestamps entirely.

#[derive(Debug, Deserialize)]
struct SeedJob {
    id: Option<String>,
    title: String,
    slug: Option<String>,
    description: Option<String>,
    status: Option<JobStatus>,
    tags: Option<Vec<String>>,
    location: Option<String>,
    #[serde(rename = "type")]
    job_type: Option<String>,
    department: Option<String>,
    requirements: Option<Vec<String>>,
    responsibilities: Option<Vec<String>>,
    #[serde(alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updatedAt")]
    updated_at: Option<DateTime<Utc>>,
    order: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SeedNote {
    id: Option<String>,
    content: String,
    #[serde(alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(alias = "createdBy")]
    created_by: Option<String>,
    is_private: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SeedTimelineEvent {
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    message: String,
    #[serde(alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(alias = "createdBy")]
    created_by: Option<String>,
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeedCandidate {
    id: Option<String>,
    name: String,
    email: String,
    phone: Option<String>,
    #[serde(alias = "jobId")]
    job_id: Option<String>,
    stage: Option<Stage>,
    location: Option<String>,
    experience: Option<String>,
    skills: Option<Vec<String>>,
    #[serde(alias = "appliedAt")]
    applied_at: Option<DateTime<Utc>>,
    notes: Option<Vec<SeedNote>>,
    timeline: Option<Vec<SeedTimelineEvent>>,
}

#[derive(Debug, Deserialize)]
struct SeedAssessment {
    id: Option<String>,
    #[serde(alias = "jobId")]
    job_id: String,
    title: String,
    description: Option<String>,
    sections: Option<Vec<Section>>,
    is_active: Option<bool>,
    #[serde(alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updatedAt")]
    updated_at: Option<DateTime<Utc>>,
}

async fn seed_jobs(store: &JobStore) -> Result<usize> {
    let records: Vec<SeedJob> = serde_json::from_str(JOBS_JSON)?;
    let mut inserted = 0;
    for (index, record) in records.into_iter().enumerate() {
        let now = time::now();
        let job = Job {
            id: record.id.unwrap_or_else(|| ids::doc_id("job")),
            slug: record
                .slug
                .unwrap_or_else(|| slug::slugify(&record.title)),
            title: record.title,
            description: record.description.unwrap_or_default(),
            status: record.status.unwrap_or_default(),
            tags: record.tags.unwrap_or_default(),
            location: record.location.unwrap_or_default(),
            job_type: record.job_type.unwrap_or_else(|| "Full-time".to_string()),
            department: record.department.unwrap_or_default(),
            requirements: record.requirements.unwrap_or_default(),
            responsibilities: record.responsibilities.unwrap_or_default(),
            salary_range: None,
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
            created_by: None,
            order: record.order.unwrap_or(index as i64 + 1),
            applicant_count: 0,
            is_featured: false,
        };
        store.insert(&job).await?;
        inserted += 1;
    }
    Ok(inserted)
}

async fn seed_candidates(store: &CandidateStore) -> Result<usize> {
    let records: Vec<SeedCandidate> = serde_json::from_str(CANDIDATES_JSON)?;
    let mut inserted = 0;
    for record in records {
        let now = time::now();
        let notes = record
            .notes
            .unwrap_or_default()
            .into_iter()
            .map(|n| CandidateNote {
                id: n.id.unwrap_or_else(|| ids::doc_id("note")),
                content: n.content,
                created_at: n.created_at.unwrap_or(now),
                created_by: n.created_by.unwrap_or_else(|| "system".to_string()),
                is_private: n.is_private.unwrap_or(false),
            })
            .collect();
        let timeline = record
            .timeline
            .unwrap_or_default()
            .into_iter()
            .map(|e| TimelineEvent {
                id: e.id.unwrap_or_else(|| ids::doc_id("timeline")),
                kind: e.kind,
                message: e.message,
                created_at: e.created_at.unwrap_or(now),
                created_by: e.created_by.unwrap_or_else(|| "system".to_string()),
                metadata: e.metadata,
            })
            .collect();

        let candidate = Candidate {
            id: record.id.unwrap_or_else(|| ids::doc_id("candidate")),
            name: record.name,
            email: record.email,
            phone: record.phone.unwrap_or_default(),
            job_id: record.job_id.unwrap_or_default(),
            stage: record.stage.unwrap_or_default(),
            location: record.location.unwrap_or_default(),
            experience: record.experience.unwrap_or_default(),
            skills: record.skills.unwrap_or_default(),
            applied_at: record.applied_at.unwrap_or(now),
            updated_at: now,
            notes,
            timeline,
        };
        store.insert(&candidate).await?;
        inserted += 1;
    }
    Ok(inserted)
}

async fn seed_assessments(store: &AssessmentStore) -> Result<usize> {
    let records: Vec<SeedAssessment> = serde_json::from_str(ASSESSMENTS_JSON)?;
    let mut inserted = 0;
    for record in records {
        let now = time::now();
        let assessment = Assessment {
            id: record
                .id
                .unwrap_or_else(|| ids::doc_id(&format!("assessment-{}", record.job_id))),
            job_id: record.job_id,
            title: record.title,
            description: record.description,
            sections: record.sections.unwrap_or_default(),
            is_active: record.is_active.unwrap_or(true),
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
        };
        store.insert(&assessment).await?;
        inserted += 1;
    }
    Ok(inserted)
}
