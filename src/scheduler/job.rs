use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single execution attempt of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRun {
    pub id: String,
    pub pool: String,
}

impl JobRun {
    /// New run in `pool` with a fresh id.
    pub fn new(pool: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pool: pool.into(),
        }
    }
}

/// A queued job as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub queue: String,
    /// Pools this job may be scheduled into.
    pub pools: Vec<String>,
    /// Priority of the job's priority class. Higher schedules first.
    pub priority_class_priority: i32,
    /// Per-queue priority. Lower schedules first.
    pub priority: u32,
    pub submitted_at: DateTime<Utc>,
    pub latest_run: Option<JobRun>,
}

impl Job {
    /// Job in `queue`, eligible for `pools`, with a fresh id and default priorities.
    pub fn new<P, S>(queue: impl Into<String>, pools: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4().to_string(),
            queue: queue.into(),
            pools: pools.into_iter().map(Into::into).collect(),
            priority_class_priority: 0,
            priority: 0,
            submitted_at: Utc::now(),
            latest_run: None,
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the per-queue priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the priority of the job's priority class.
    pub fn with_priority_class_priority(mut self, priority: i32) -> Self {
        self.priority_class_priority = priority;
        self
    }

    /// Set the submission time.
    pub fn with_submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = submitted_at;
        self
    }

    /// Record the job's most recent run.
    pub fn with_latest_run(mut self, run: JobRun) -> Self {
        self.latest_run = Some(run);
        self
    }

    /// Pool of the latest run, if the job has run.
    pub fn latest_run_pool(&self) -> Option<&str> {
        self.latest_run.as_ref().map(|run| run.pool.as_str())
    }

    /// Whether the job may be scheduled into `pool`.
    pub fn is_eligible_for(&self, pool: &str) -> bool {
        self.pools.iter().any(|p| p == pool)
    }

    /// Total order in which jobs should be scheduled. `Less` means `self` goes first.
    ///
    /// Higher priority class first, then lower queue priority, then earlier
    /// submission. Ties are broken by id so the order is total and scheduling
    /// is reproducible.
    pub fn scheduling_order_compare(&self, other: &Job) -> Ordering {
        other
            .priority_class_priority
            .cmp(&self.priority_class_priority)
            .then_with(|| self.priority.cmp(&other.priority))
            .then_with(|| self.submitted_at.cmp(&other.submitted_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}
