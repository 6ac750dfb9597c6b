//! Request budgets: a deadline plus a cooperative cancellation token.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::{Duration, Instant};

use crate::error::{QueryPhase, ReportError};

/// Cooperative cancellation flag shared between a request and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Time and cancellation budget of one query request.
///
/// Clones share the token and the record of the last phase started.
#[derive(Debug, Clone)]
pub struct QueryBudget {
    deadline: Option<Instant>,
    token: CancellationToken,
    last_phase: Arc<AtomicU8>,
}

const NO_PHASE: u8 = u8::MAX;

const fn phase_code(phase: QueryPhase) -> u8 {
    match phase {
        QueryPhase::Materialise => 0,
        QueryPhase::TotalCount => 1,
        QueryPhase::FilteredCount => 2,
        QueryPhase::DataFetch => 3,
    }
}

const fn phase_from_code(code: u8) -> Option<QueryPhase> {
    match code {
        0 => Some(QueryPhase::Materialise),
        1 => Some(QueryPhase::TotalCount),
        2 => Some(QueryPhase::FilteredCount),
        3 => Some(QueryPhase::DataFetch),
        _ => None,
    }
}

impl QueryBudget {
    /// A budget expiring `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            token: CancellationToken::new(),
            last_phase: Arc::new(AtomicU8::new(NO_PHASE)),
        }
    }

    /// A budget with no deadline.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            token: CancellationToken::new(),
            last_phase: Arc::new(AtomicU8::new(NO_PHASE)),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The most recent phase that passed [`Self::check`].
    #[must_use]
    pub fn last_phase(&self) -> Option<QueryPhase> {
        phase_from_code(self.last_phase.load(Ordering::Relaxed))
    }

    /// Check the budget before starting `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Cancelled`] if the token was cancelled, or
    /// [`ReportError::Timeout`] if the deadline has passed.
    pub fn check(&self, report: &str, phase: QueryPhase) -> Result<(), ReportError> {
        if self.token.is_cancelled() {
            return Err(ReportError::Cancelled {
                report: report.to_string(),
                phase,
            });
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(ReportError::Timeout {
                report: report.to_string(),
                phase,
            });
        }
        self.last_phase.store(phase_code(phase), Ordering::Relaxed);
        Ok(())
    }
}
