//! Job Tracker
//!
//! Holds the 14 step records of one build and mirrors every transition into
//! a `StepStore`. Store failures are logged; they never fail the build.

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use super::steps::{PipelineStep, StepRecord};
use crate::storage::{JobRecord, JobStatus, SharedStepStore};
use crate::types::Result;

pub struct JobTracker {
    job_id: String,
    records: Vec<StepRecord>,
    store: SharedStepStore,
}

impl JobTracker {
    /// Register a new job and its pending steps
    pub fn start(url: &str, store: SharedStepStore) -> Self {
        let job_id = Uuid::new_v4().to_string();
        let records: Vec<StepRecord> = PipelineStep::ALL.into_iter().map(StepRecord::new).collect();

        let tracker = Self {
            job_id,
            records,
            store,
        };
        if let Err(e) = tracker.store.create_job(&JobRecord::new(&tracker.job_id, url)) {
            warn!("Job {} not persisted: {}", tracker.job_id, e);
        }
        for record in &tracker.records {
            tracker.persist(record);
        }
        tracker
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn record(&self, step: PipelineStep) -> &StepRecord {
        &self.records[step.index()]
    }

    fn persist(&self, record: &StepRecord) {
        if let Err(e) = self.store.save_step(&self.job_id, record) {
            warn!("Step {} of job {} not persisted: {}", record.step, self.job_id, e);
        }
    }

    fn update(
        &mut self,
        step: PipelineStep,
        f: impl FnOnce(&mut StepRecord) -> Result<()>,
    ) -> Result<()> {
        let record = &mut self.records[step.index()];
        f(record)?;
        let snapshot = record.clone();
        self.persist(&snapshot);
        Ok(())
    }

    pub fn begin(&mut self, step: PipelineStep, input: Option<Value>) -> Result<()> {
        self.update(step, |r| r.start(input))
    }

    pub fn complete(&mut self, step: PipelineStep, output: Value) -> Result<()> {
        self.update(step, |r| r.complete(output))
    }

    pub fn fail(&mut self, step: PipelineStep, error: &str) -> Result<()> {
        self.update(step, |r| r.fail(error))
    }

    pub fn skip(&mut self, step: PipelineStep, reason: &str) -> Result<()> {
        self.update(step, |r| r.skip(reason))
    }

    /// Begin and complete in one go, for steps whose work is already done
    pub fn record_completed(
        &mut self,
        step: PipelineStep,
        input: Option<Value>,
        output: Value,
    ) -> Result<()> {
        self.begin(step, input)?;
        self.complete(step, output)
    }

    pub fn finish(&self, status: JobStatus, error: Option<&str>) {
        if let Err(e) = self.store.finish_job(&self.job_id, status, error) {
            warn!("Job {} completion not persisted: {}", self.job_id, e);
        }
    }
}
