//! Search budget: interrupt flag and optional time limit.
//!
//! The budget never cuts a search short before one complete pairing has been
//! found, so an interrupted search still covers every player.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Budget handed to the search. Cheap to clone; clones share the stop flag.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    /// Shared stop flag
    stopped: Arc<AtomicBool>,
    /// Wall-clock limit for one search (None = unlimited)
    time_limit: Option<Duration>,
    /// How often to look at the clock (in nodes)
    check_interval: u64,
}

impl SearchBudget {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            time_limit,
            check_interval: 1024,
        }
    }

    /// No limit; only an explicit [`SearchBudget::stop`] interrupts
    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn from_millis(limit: Option<u64>) -> Self {
        Self::new(limit.map(Duration::from_millis))
    }

    /// Ask a running search to return its best pairing so far
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Check the flag and, every `check_interval` nodes, the clock.
    pub fn exhausted(&self, started: Instant, nodes: u64) -> bool {
        if self.is_stopped() {
            return true;
        }
        if nodes % self.check_interval != 0 {
            return false;
        }
        match self.time_limit {
            Some(limit) if started.elapsed() >= limit => {
                self.stop();
                true
            }
            _ => false,
        }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_shared_between_clones() {
        let budget = SearchBudget::unlimited();
        let handle = budget.clone();
        assert!(!budget.is_stopped());
        handle.stop();
        assert!(budget.is_stopped());
        assert!(budget.exhausted(Instant::now(), 1));
    }

    #[test]
    fn test_zero_time_limit_expires_on_check() {
        let budget = SearchBudget::new(Some(Duration::ZERO));
        // Off-interval nodes do not look at the clock
        assert!(!budget.exhausted(Instant::now(), 1));
        assert!(budget.exhausted(Instant::now(), 1024));
        assert!(budget.is_stopped());
    }

    #[test]
    fn test_unlimited_never_expires() {
        let budget = SearchBudget::unlimited();
        assert!(!budget.exhausted(Instant::now(), 0));
        assert!(!budget.exhausted(Instant::now(), 4096));
    }
}
