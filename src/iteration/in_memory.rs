use std::sync::Arc;

use crate::error::Result;
use crate::iteration::JobContextIterator;
use crate::scheduler::SchedulingContext;

/// Iterator over a fixed sequence of contexts captured at construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobIterator {
    i: usize,
    contexts: Vec<Arc<SchedulingContext>>,
}

impl InMemoryJobIterator {
    pub fn new(contexts: Vec<Arc<SchedulingContext>>) -> Self {
        Self { i: 0, contexts }
    }

    /// Contexts not yet yielded.
    pub fn remaining(&self) -> usize {
        self.contexts.len().saturating_sub(self.i)
    }
}

impl JobContextIterator for InMemoryJobIterator {
    fn next(&mut self) -> Result<Option<Arc<SchedulingContext>>> {
        let Some(ctx) = self.contexts.get(self.i) else {
            return Ok(None);
        };
        self.i += 1;
        Ok(Some(Arc::clone(ctx)))
    }
}
