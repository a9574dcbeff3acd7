use std::sync::Arc;

use crate::error::SourceError;
use crate::scheduler::job::Job;

/// Ordered stream of queued jobs from the durable job store.
///
/// `Ok(None)` signals exhaustion. Errors are surfaced to iterator consumers
/// untouched.
pub trait JobSource {
    fn next_job(&mut self) -> Result<Option<Arc<Job>>, SourceError>;
}

impl<I> JobSource for I
where
    I: Iterator<Item = Arc<Job>>,
{
    fn next_job(&mut self) -> Result<Option<Arc<Job>>, SourceError> {
        Ok(self.next())
    }
}

/// Per-queue view of the durable job store.
pub trait JobRepository {
    /// Queued jobs of `queue` in the store's scheduling order.
    fn queued_jobs(&self, queue: &str) -> Box<dyn JobSource + Send>;
}
