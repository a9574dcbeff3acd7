use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{DuplicatePolicy, IndexConfig};
use crate::iteration::InMemoryJobIterator;
use crate::scheduler::context::SchedulingContext;
use crate::scheduler::job::Job;

#[derive(Debug, Default)]
struct IndexState {
    contexts_by_queue: HashMap<String, Vec<Arc<SchedulingContext>>>,
    /// Job id to its latest context and the queue that context was placed in.
    contexts_by_id: HashMap<String, (String, Arc<SchedulingContext>)>,
}

/// In-memory, queue-partitioned index of jobs for a single pool.
///
/// Each queue is kept in scheduling order. Jobs whose latest run happened in
/// another pool are placed in the away queue of their home queue. The index
/// lives for one scheduling round and only grows; consumers read it through
/// snapshot iterators.
///
/// Both maps sit behind one mutex. Every operation, read or write, holds it
/// for its whole duration and releases it before returning.
#[derive(Debug)]
pub struct InMemoryJobRepository {
    config: IndexConfig,
    state: Mutex<IndexState>,
}

impl InMemoryJobRepository {
    /// Empty index for `pool` with default settings.
    pub fn new(pool: impl Into<String>) -> Self {
        Self::with_config(IndexConfig::new(pool))
    }

    /// Empty index configured by `config`.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            state: Mutex::new(IndexState::default()),
        }
    }

    /// Pool this index schedules for.
    pub fn pool(&self) -> &str {
        &self.config.pool
    }

    /// Settings the index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Queue a context belongs in: its home queue, or the away queue when
    /// the job last ran in a different pool.
    fn target_queue(&self, job: &Job) -> String {
        match job.latest_run_pool() {
            Some(pool) if pool != self.config.pool => {
                let away = self.config.away_queue_name(&job.queue);
                tracing::trace!(
                    job_id = %job.id,
                    run_pool = pool,
                    pool = %self.config.pool,
                    queue = %away,
                    "Redirecting job to away queue"
                );
                away
            }
            _ => job.queue.clone(),
        }
    }

    /// Add a batch of contexts and re-sort every queue the batch touched.
    ///
    /// The batch is applied atomically with respect to all other operations.
    /// It is collected before the lock is taken, so a producer that panics
    /// leaves the index unchanged.
    pub fn enqueue_many<I>(&self, contexts: I)
    where
        I: IntoIterator<Item = Arc<SchedulingContext>>,
    {
        let batch: Vec<Arc<SchedulingContext>> = contexts.into_iter().collect();
        let batch_size = batch.len();

        let mut state = self.state.lock();
        let mut touched: HashSet<String> = HashSet::new();

        for ctx in batch {
            let queue = self.target_queue(ctx.job());
            let previous = state
                .contexts_by_id
                .insert(ctx.job_id().to_string(), (queue.clone(), Arc::clone(&ctx)));

            if let (Some((old_queue, old_ctx)), DuplicatePolicy::Replace) =
                (previous, self.config.duplicate_policy)
            {
                tracing::debug!(
                    job_id = %ctx.job_id(),
                    old_queue = %old_queue,
                    queue = %queue,
                    "Replacing previously indexed job"
                );
                if let Some(contexts) = state.contexts_by_queue.get_mut(&old_queue) {
                    contexts.retain(|c| !Arc::ptr_eq(c, &old_ctx));
                }
            }

            state
                .contexts_by_queue
                .entry(queue.clone())
                .or_default()
                .push(ctx);
            touched.insert(queue);
        }

        for queue in &touched {
            if let Some(contexts) = state.contexts_by_queue.get_mut(queue) {
                sort_queue(contexts);
            }
        }

        tracing::debug!(
            pool = %self.config.pool,
            batch_size,
            touched_queues = touched.len(),
            "Enqueued job batch"
        );
    }

    /// Job ids of `queue` in scheduling order. Unknown queues are empty.
    pub fn queue_job_ids(&self, queue: &str) -> Vec<String> {
        let state = self.state.lock();
        state
            .contexts_by_queue
            .get(queue)
            .map(|contexts| contexts.iter().map(|c| c.job_id().to_string()).collect())
            .unwrap_or_default()
    }

    /// Jobs for the ids that are indexed, in the order the ids were given.
    pub fn existing_jobs_by_ids<S: AsRef<str>>(&self, job_ids: &[S]) -> Vec<Arc<Job>> {
        let state = self.state.lock();
        job_ids
            .iter()
            .filter_map(|id| state.contexts_by_id.get(id.as_ref()))
            .map(|(_, ctx)| Arc::clone(ctx.job()))
            .collect()
    }

    /// Snapshot iterator over `queue`. Later enqueues do not affect it.
    pub fn job_iterator(&self, queue: &str) -> InMemoryJobIterator {
        let snapshot = {
            let state = self.state.lock();
            state
                .contexts_by_queue
                .get(queue)
                .cloned()
                .unwrap_or_default()
        };
        InMemoryJobIterator::new(snapshot)
    }

    /// Names of all non-empty queues, sorted.
    pub fn queue_names(&self) -> Vec<String> {
        let state = self.state.lock();
        state
            .contexts_by_queue
            .iter()
            .filter(|(_, contexts)| !contexts.is_empty())
            .map(|(name, _)| name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether `job_id` is indexed.
    pub fn contains(&self, job_id: &str) -> bool {
        self.state.lock().contexts_by_id.contains_key(job_id)
    }

    /// Number of distinct job ids indexed.
    pub fn len(&self) -> usize {
        self.state.lock().contexts_by_id.len()
    }

    /// Returns true if no job is indexed.
    pub fn is_empty(&self) -> bool {
        self.state.lock().contexts_by_id.is_empty()
    }
}

fn sort_queue(contexts: &mut [Arc<SchedulingContext>]) {
    contexts.sort_by(|a, b| a.job().scheduling_order_compare(b.job()));
}
