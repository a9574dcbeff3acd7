use std::sync::Arc;

use crate::cancel::CancellationSignal;
use crate::error::{IterationError, Result};
use crate::iteration::JobContextIterator;
use crate::scheduler::{JobRepository, JobSource, SchedulingContext};

/// Iterator over the queued jobs of one queue in the durable store, yielding
/// only jobs eligible for `pool`.
///
/// Cancellation is checked once per pull. Jobs for other pools are skipped
/// without materialising a filtered copy, so the source order is preserved.
pub struct QueuedJobsIterator<C> {
    source: Box<dyn JobSource + Send>,
    pool: String,
    signal: C,
    exhausted: bool,
}

impl<C: CancellationSignal> QueuedJobsIterator<C> {
    pub fn new(signal: C, source: Box<dyn JobSource + Send>, pool: impl Into<String>) -> Self {
        Self {
            source,
            pool: pool.into(),
            signal,
            exhausted: false,
        }
    }

    pub fn from_repository<R>(signal: C, queue: &str, pool: impl Into<String>, repo: &R) -> Self
    where
        R: JobRepository + ?Sized,
    {
        Self::new(signal, repo.queued_jobs(queue), pool)
    }

    pub fn pool(&self) -> &str {
        &self.pool
    }
}

impl<C> std::fmt::Debug for QueuedJobsIterator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedJobsIterator")
            .field("pool", &self.pool)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl<C: CancellationSignal> JobContextIterator for QueuedJobsIterator<C> {
    fn next(&mut self) -> Result<Option<Arc<SchedulingContext>>> {
        loop {
            // Sources are not required to be fused.
            if self.exhausted {
                return Ok(None);
            }
            if let Some(reason) = self.signal.cancel_reason() {
                tracing::debug!(pool = %self.pool, %reason, "Queued job iteration cancelled");
                return Err(IterationError::Cancelled(reason));
            }
            let Some(job) = self.source.next_job()? else {
                self.exhausted = true;
                return Ok(None);
            };
            if job.is_eligible_for(&self.pool) {
                return Ok(Some(SchedulingContext::from_job(job)));
            }
            tracing::trace!(job_id = %job.id, pool = %self.pool, "Skipping job not eligible for pool");
        }
    }
}
