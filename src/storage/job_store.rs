//! Job and Step Persistence
//!
//! `StepStore` is the collaborator the pipeline writes step records into.
//! `MemoryStepStore` keeps them for the life of the process; `Database`
//! persists them in SQLite.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::database::Database;
use crate::pipeline::{PipelineStep, StepRecord, StepStatus};
use crate::types::{BrandError, Result, ResultExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub url: String,
    pub status: JobStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            status: JobStatus::Running,
            error: None,
            created_at: Utc::now(),
            finished_at: None,
        }
    }
}

pub trait StepStore: Send + Sync {
    fn create_job(&self, job: &JobRecord) -> Result<()>;

    /// Insert or replace the record for `record.step`
    fn save_step(&self, job_id: &str, record: &StepRecord) -> Result<()>;

    fn finish_job(&self, job_id: &str, status: JobStatus, error: Option<&str>) -> Result<()>;

    fn load_job(&self, job_id: &str) -> Result<Option<JobRecord>>;

    /// Step records in pipeline order
    fn load_steps(&self, job_id: &str) -> Result<Vec<StepRecord>>;
}

pub type SharedStepStore = Arc<dyn StepStore>;

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
pub struct MemoryStepStore {
    jobs: Mutex<HashMap<String, (JobRecord, Vec<StepRecord>)>>,
}

impl MemoryStepStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_jobs<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, (JobRecord, Vec<StepRecord>)>) -> Result<T>,
    ) -> Result<T> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| BrandError::Storage("Step store lock poisoned".to_string()))?;
        f(&mut jobs)
    }
}

fn unknown_job(job_id: &str) -> BrandError {
    BrandError::Storage(format!("Unknown job: {}", job_id))
}

impl StepStore for MemoryStepStore {
    fn create_job(&self, job: &JobRecord) -> Result<()> {
        self.with_jobs(|jobs| {
            jobs.insert(job.id.clone(), (job.clone(), Vec::new()));
            Ok(())
        })
    }

    fn save_step(&self, job_id: &str, record: &StepRecord) -> Result<()> {
        self.with_jobs(|jobs| {
            let (_, steps) = jobs.get_mut(job_id).ok_or_else(|| unknown_job(job_id))?;
            match steps.iter_mut().find(|s| s.step == record.step) {
                Some(existing) => *existing = record.clone(),
                None => {
                    steps.push(record.clone());
                    steps.sort_by_key(|s| s.step);
                }
            }
            Ok(())
        })
    }

    fn finish_job(&self, job_id: &str, status: JobStatus, error: Option<&str>) -> Result<()> {
        self.with_jobs(|jobs| {
            let (job, _) = jobs.get_mut(job_id).ok_or_else(|| unknown_job(job_id))?;
            job.status = status;
            job.error = error.map(str::to_string);
            job.finished_at = Some(Utc::now());
            Ok(())
        })
    }

    fn load_job(&self, job_id: &str) -> Result<Option<JobRecord>> {
        self.with_jobs(|jobs| Ok(jobs.get(job_id).map(|(job, _)| job.clone())))
    }

    fn load_steps(&self, job_id: &str) -> Result<Vec<StepRecord>> {
        self.with_jobs(|jobs| Ok(jobs.get(job_id).map(|(_, s)| s.clone()).unwrap_or_default()))
    }
}

// =============================================================================
// SQLite store
// =============================================================================

fn parse_time(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc))
}

fn to_json_text(value: &Option<Value>) -> Result<Option<String>> {
    value
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(BrandError::from)
}

fn from_json_text(text: Option<String>) -> Option<Value> {
    text.and_then(|s| serde_json::from_str(&s).ok())
}

/// (step, status, retry_count, started_at, finished_at, input, output, error)
type StepRow = (
    String,
    String,
    u32,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

impl StepStore for Database {
    fn create_job(&self, job: &JobRecord) -> Result<()> {
        self.execute(
            "INSERT INTO jobs (id, url, status, error, created_at, finished_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            &[
                &job.id,
                &job.url,
                &job.status.as_str(),
                &job.error,
                &job.created_at.to_rfc3339(),
                &job.finished_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        tracing::debug!("Created job {} for {}", job.id, job.url);
        Ok(())
    }

    fn save_step(&self, job_id: &str, record: &StepRecord) -> Result<()> {
        let input = to_json_text(&record.input)?;
        let output = to_json_text(&record.output)?;

        self.connection()?
            .execute(
                "INSERT INTO job_steps
                 (job_id, step, position, status, retry_count, started_at, finished_at,
                  input_json, output_json, error)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(job_id, step) DO UPDATE SET
                    status = excluded.status,
                    retry_count = excluded.retry_count,
                    started_at = excluded.started_at,
                    finished_at = excluded.finished_at,
                    input_json = excluded.input_json,
                    output_json = excluded.output_json,
                    error = excluded.error",
                params![
                    job_id,
                    record.step.as_str(),
                    record.step.index() as i64,
                    record.status.as_str(),
                    record.retry_count,
                    record.started_at.map(|t| t.to_rfc3339()),
                    record.finished_at.map(|t| t.to_rfc3339()),
                    input,
                    output,
                    record.error,
                ],
            )
            .with_context(format!("Failed to save step {}", record.step))?;
        Ok(())
    }

    fn finish_job(&self, job_id: &str, status: JobStatus, error: Option<&str>) -> Result<()> {
        let updated = self.execute(
            "UPDATE jobs SET status = ?1, error = ?2, finished_at = ?3 WHERE id = ?4",
            &[&status.as_str(), &error, &Utc::now().to_rfc3339(), &job_id],
        )?;
        if updated == 0 {
            return Err(unknown_job(job_id));
        }
        Ok(())
    }

    fn load_job(&self, job_id: &str) -> Result<Option<JobRecord>> {
        let row = self
            .connection()?
            .query_row(
                "SELECT id, url, status, error, created_at, finished_at FROM jobs WHERE id = ?1",
                params![job_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )
            .optional()
            .with_context("Failed to load job")?;

        let Some((id, url, status, error, created_at, finished_at)) = row else {
            return Ok(None);
        };
        let status = JobStatus::parse(&status)
            .ok_or_else(|| BrandError::Storage(format!("Unknown job status '{}'", status)))?;

        Ok(Some(JobRecord {
            id,
            url,
            status,
            error,
            created_at: parse_time(Some(created_at)).unwrap_or_else(Utc::now),
            finished_at: parse_time(finished_at),
        }))
    }

    fn load_steps(&self, job_id: &str) -> Result<Vec<StepRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT step, status, retry_count, started_at, finished_at,
                        input_json, output_json, error
                 FROM job_steps WHERE job_id = ?1 ORDER BY position",
            )
            .with_context("Failed to prepare step query")?;

        let rows: Vec<StepRow> = stmt
            .query_map(params![job_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ))
            })
            .with_context("Failed to query steps")?
            .collect::<std::result::Result<_, _>>()
            .with_context("Failed to read step row")?;

        rows.into_iter()
            .map(
                |(step, status, retry_count, started, finished, input, output, error)| {
                    let step = PipelineStep::parse(&step)
                        .ok_or_else(|| BrandError::Storage(format!("Unknown step '{}'", step)))?;
                    let status = StepStatus::parse(&status).ok_or_else(|| {
                        BrandError::Storage(format!("Unknown step status '{}'", status))
                    })?;
                    Ok(StepRecord {
                        step,
                        status,
                        retry_count,
                        started_at: parse_time(started),
                        finished_at: parse_time(finished),
                        input: from_json_text(input),
                        output: from_json_text(output),
                        error,
                    })
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn exercise(store: &dyn StepStore) {
        let job = JobRecord::new("job-1", "https://brand.test/");
        store.create_job(&job).unwrap();

        let mut palette = StepRecord::new(PipelineStep::GeneratePalette);
        palette.start(Some(json!({"colors": ["#1e3a8a"]}))).unwrap();
        store.save_step("job-1", &palette).unwrap();

        let mut fetch = StepRecord::new(PipelineStep::FetchWebsite);
        fetch.start(None).unwrap();
        fetch.fail("HTTP 503").unwrap();
        store.save_step("job-1", &fetch).unwrap();
        fetch.start(None).unwrap();
        fetch.complete(json!({"bytes": 1024})).unwrap();
        store.save_step("job-1", &fetch).unwrap();

        let steps = store.load_steps("job-1").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step, PipelineStep::FetchWebsite);
        assert_eq!(steps[0].status, StepStatus::Completed);
        assert_eq!(steps[0].retry_count, 1);
        assert_eq!(steps[0].output, Some(json!({"bytes": 1024})));
        assert_eq!(steps[1].status, StepStatus::InProgress);
        assert_eq!(steps[1].input, Some(json!({"colors": ["#1e3a8a"]})));

        store
            .finish_job("job-1", JobStatus::Completed, None)
            .unwrap();
        let loaded = store.load_job("job-1").unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Completed);
        assert!(loaded.finished_at.is_some());

        assert!(store.load_job("missing").unwrap().is_none());
        assert!(store.finish_job("missing", JobStatus::Failed, Some("x")).is_err());
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStepStore::new());
    }

    #[test]
    fn test_sqlite_store_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        exercise(&db);
    }

    #[test]
    fn test_sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs").join("brandkit.db");

        {
            let db = Database::open(&path).unwrap();
            db.initialize().unwrap();
            db.create_job(&JobRecord::new("job-2", "https://brand.test/"))
                .unwrap();
            let mut heroes = StepRecord::new(PipelineStep::GenerateHeroes);
            heroes.skip("not rendered").unwrap();
            db.save_step("job-2", &heroes).unwrap();
        }

        let db = Database::open(&path).unwrap();
        db.initialize().unwrap();
        let steps = db.load_steps("job-2").unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].status, StepStatus::Skipped);
        assert_eq!(steps[0].output.as_ref().unwrap()["reason"], "not rendered");
    }
}
