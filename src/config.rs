/// Suffix appended to a home queue name to form its away queue.
pub const DEFAULT_AWAY_QUEUE_SUFFIX: &str = "-away";

/// How the index treats a context whose job id is already indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Drop the stale context from its queue before inserting the new one.
    /// A job id is then present in exactly one queue.
    #[default]
    Replace,
    /// Overwrite the id lookup only and leave the stale context in its queue.
    KeepAll,
}

/// Configuration for a per-pool in-memory job index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Pool this index schedules for.
    pub pool: String,
    pub away_queue_suffix: String,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            pool: "default".to_string(),
            away_queue_suffix: DEFAULT_AWAY_QUEUE_SUFFIX.to_string(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl IndexConfig {
    /// Default settings for `pool`.
    pub fn new(pool: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            ..Default::default()
        }
    }

    /// Set the suffix used to derive away queue names.
    pub fn with_away_queue_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.away_queue_suffix = suffix.into();
        self
    }

    /// Set how re-enqueued job ids are handled.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Derive the away queue for `queue`. Not meant to be reversed.
    pub fn away_queue_name(&self, queue: &str) -> String {
        format!("{}{}", queue, self.away_queue_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_config_default() {
        let cfg = IndexConfig::default();
        assert_eq!(cfg.pool, "default");
        assert_eq!(cfg.away_queue_suffix, "-away");
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Replace);
    }

    #[test]
    fn index_config_new() {
        let cfg = IndexConfig::new("gpu");
        assert_eq!(cfg.pool, "gpu");
        assert_eq!(cfg.away_queue_suffix, DEFAULT_AWAY_QUEUE_SUFFIX);
    }

    #[test]
    fn index_config_builders() {
        let cfg = IndexConfig::new("cpu")
            .with_away_queue_suffix(".elsewhere")
            .with_duplicate_policy(DuplicatePolicy::KeepAll);
        assert_eq!(cfg.away_queue_suffix, ".elsewhere");
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::KeepAll);
    }

    #[test]
    fn away_queue_name_is_distinct_and_deterministic() {
        let cfg = IndexConfig::new("cpu");
        assert_eq!(cfg.away_queue_name("team-a"), "team-a-away");
        assert_eq!(cfg.away_queue_name("team-a"), cfg.away_queue_name("team-a"));
        assert_ne!(cfg.away_queue_name("team-a"), "team-a");
    }
}
