//! Pull-based traversal of scheduling contexts.
//!
//! Every job source the scheduler draws from implements [`JobContextIterator`]:
//!
//! - [`InMemoryJobIterator`]: replays a snapshot taken from the in-memory index
//! - [`QueuedJobsIterator`]: reads the durable store for one queue, keeping only
//!   jobs eligible for a pool and honouring cancellation
//! - [`MultiJobsIterator`]: concatenates other iterators in the order given
//!
//! Iterators are single-pass and driven by one consumer at a time.

pub mod in_memory;
pub mod multi;
pub mod queued;

pub use in_memory::InMemoryJobIterator;
pub use multi::MultiJobsIterator;
pub use queued::QueuedJobsIterator;

use std::sync::Arc;

use crate::error::Result;
use crate::scheduler::SchedulingContext;

pub trait JobContextIterator {
    /// Next context in order.
    ///
    /// `Ok(None)` means the iterator is exhausted and will stay exhausted.
    /// An error is terminal; callers should stop pulling after seeing one.
    fn next(&mut self) -> Result<Option<Arc<SchedulingContext>>>;

    /// Pull until exhaustion, stopping at the first error.
    fn drain(&mut self) -> Result<Vec<Arc<SchedulingContext>>> {
        let mut contexts = Vec::new();
        while let Some(ctx) = self.next()? {
            contexts.push(ctx);
        }
        Ok(contexts)
    }
}

impl<T: JobContextIterator + ?Sized> JobContextIterator for Box<T> {
    fn next(&mut self) -> Result<Option<Arc<SchedulingContext>>> {
        (**self).next()
    }
}
