use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/** Cooperative stop token polled by the solvers between two search nodes.

A token carries an optional deadline and an optional shared cancellation
flag. There is no implicit timeout: a token built with [`StopToken::none`]
never triggers. When a token triggers, the running solver unwinds and
returns the best clique discovered so far with its `proven` flag cleared. */
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    /// absolute instant after which the search must stop
    deadline: Option<Instant>,
    /// shared flag raised by [`StopHandle::cancel`]
    cancelled: Option<Arc<AtomicBool>>,
}

/** Remote side of a cancellable [`StopToken`]: raising it from another
thread stops the search at its next poll point. */
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopToken {
    /// token that never triggers
    pub fn none() -> Self {
        Self::default()
    }

    /// token that triggers once `budget` has elapsed
    pub fn with_timeout(budget: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + budget),
            cancelled: None,
        }
    }

    /// token that triggers at the given instant
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: None,
        }
    }

    /// token paired with a handle that cancels it from elsewhere
    pub fn cancellable() -> (Self, StopHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        let token = Self {
            deadline: None,
            cancelled: Some(flag.clone()),
        };
        (token, StopHandle { flag })
    }

    /// true iff the deadline has passed or the cancellation flag is raised
    pub fn is_triggered(&self) -> bool {
        if let Some(flag) = &self.cancelled {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

impl StopHandle {
    /// raises the cancellation flag
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}
