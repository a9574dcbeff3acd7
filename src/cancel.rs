use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

/// Why a traversal was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Cancelled,
    DeadlineExceeded,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::Cancelled => write!(f, "scheduling round cancelled"),
            CancelReason::DeadlineExceeded => write!(f, "scheduling round deadline exceeded"),
        }
    }
}

/// Cooperative cancellation predicate polled by iterators once per pull.
pub trait CancellationSignal {
    fn is_cancelled(&self) -> bool {
        self.cancel_reason().is_some()
    }

    /// `None` until cancellation has been requested.
    fn cancel_reason(&self) -> Option<CancelReason>;
}

impl CancellationSignal for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }

    fn cancel_reason(&self) -> Option<CancelReason> {
        CancellationToken::is_cancelled(self).then_some(CancelReason::Cancelled)
    }
}

/// Cancellation scope for a single scheduling round.
///
/// Combines a `CancellationToken` with an optional deadline. Explicit
/// cancellation takes precedence over an expired deadline when both apply.
#[derive(Debug, Clone, Default)]
pub struct RoundContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RoundContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round that is cancelled whenever `parent` is, e.g. a process shutdown token.
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        tracing::debug!("Cancelling scheduling round");
        self.token.cancel();
    }
}

impl CancellationSignal for RoundContext {
    fn cancel_reason(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }
}

impl<S: CancellationSignal + ?Sized> CancellationSignal for &S {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn cancel_reason(&self) -> Option<CancelReason> {
        (**self).cancel_reason()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_reports_cancelled() {
        let token = CancellationToken::new();
        assert_eq!(token.cancel_reason(), None);
        token.cancel();
        assert_eq!(token.cancel_reason(), Some(CancelReason::Cancelled));
    }

    #[test]
    fn round_context_follows_parent() {
        let parent = CancellationToken::new();
        let round = RoundContext::child_of(&parent);
        assert!(!CancellationSignal::is_cancelled(&round));

        parent.cancel();
        assert_eq!(round.cancel_reason(), Some(CancelReason::Cancelled));
    }

    #[test]
    fn cancelling_round_leaves_parent_alone() {
        let parent = CancellationToken::new();
        let round = RoundContext::child_of(&parent);
        round.cancel();
        assert!(CancellationSignal::is_cancelled(&round));
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn expired_deadline_is_reported() {
        let round = RoundContext::new().with_deadline(Instant::now() - Duration::from_millis(1));
        assert_eq!(round.cancel_reason(), Some(CancelReason::DeadlineExceeded));
    }

    #[test]
    fn explicit_cancel_wins_over_deadline() {
        let round = RoundContext::new().with_deadline(Instant::now() - Duration::from_millis(1));
        round.cancel();
        assert_eq!(round.cancel_reason(), Some(CancelReason::Cancelled));
    }

    #[test]
    fn future_deadline_is_not_cancelled() {
        let round = RoundContext::new().with_timeout(Duration::from_secs(60));
        assert!(round.deadline().is_some());
        assert_eq!(round.cancel_reason(), None);
    }
}
