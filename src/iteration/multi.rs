use std::sync::Arc;

use crate::error::Result;
use crate::iteration::JobContextIterator;
use crate::scheduler::SchedulingContext;

/// Chains several iterators together in the order provided.
///
/// Output is plain concatenation, not a merge by scheduling order. An error
/// from any child is returned immediately and later children are not read.
/// Once exhausted, children pushed afterwards are never read.
#[derive(Default)]
pub struct MultiJobsIterator {
    i: usize,
    its: Vec<Box<dyn JobContextIterator + Send>>,
    exhausted: bool,
}

impl MultiJobsIterator {
    /// Chain `its` in the given order.
    pub fn new(its: Vec<Box<dyn JobContextIterator + Send>>) -> Self {
        Self {
            i: 0,
            its,
            exhausted: false,
        }
    }

    /// Append a child after the existing ones. Has no effect on output once
    /// the chain has reported exhaustion.
    pub fn push<I>(&mut self, it: I)
    where
        I: JobContextIterator + Send + 'static,
    {
        self.its.push(Box::new(it));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with<I>(mut self, it: I) -> Self
    where
        I: JobContextIterator + Send + 'static,
    {
        self.push(it);
        self
    }
}

impl std::fmt::Debug for MultiJobsIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiJobsIterator")
            .field("i", &self.i)
            .field("children", &self.its.len())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl JobContextIterator for MultiJobsIterator {
    fn next(&mut self) -> Result<Option<Arc<SchedulingContext>>> {
        if self.exhausted {
            return Ok(None);
        }
        while let Some(it) = self.its.get_mut(self.i) {
            if let Some(ctx) = it.next()? {
                return Ok(Some(ctx));
            }
            self.i += 1;
        }
        self.exhausted = true;
        Ok(None)
    }
}
