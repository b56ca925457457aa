pub mod database;
pub mod job_store;

pub use database::{Database, PoolConfig, SharedDatabase};
pub use job_store::{JobRecord, JobStatus, MemoryStepStore, SharedStepStore, StepStore};
