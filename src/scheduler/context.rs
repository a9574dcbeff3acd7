use std::sync::Arc;

use crate::scheduler::job::Job;

/// Round-scoped wrapper around one job.
///
/// Contexts are created once when a job enters the scheduler and are never
/// mutated afterwards, so they are shared as `Arc<SchedulingContext>`.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    job: Arc<Job>,
}

impl SchedulingContext {
    /// Fresh context for `job`.
    pub fn from_job(job: Arc<Job>) -> Arc<Self> {
        Arc::new(Self { job })
    }

    pub fn job(&self) -> &Arc<Job> {
        &self.job
    }

    pub fn job_id(&self) -> &str {
        &self.job.id
    }
}
