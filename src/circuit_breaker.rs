//! # Circuit Breaker Module
//!
//! Stops calling the product search collaborator after repeated failures,
//! giving a broken shopper session time to recover instead of hammering it.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::config::RecoveryConfig;

#[derive(Debug, Default)]
struct BreakerState {
    failure_count: u32,
    last_failure: Option<Instant>,
}

/// Consecutive-failure circuit breaker in front of product search
///
/// # State Machine
///
/// - **Closed**: searches pass through
/// - **Open**: `circuit_breaker_threshold` consecutive failures were recorded
///   less than `circuit_breaker_reset_secs` ago; searches fail fast
/// - Once the reset window has passed the breaker closes again and the next
///   search is let through
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    reset_after: Duration,
}

impl CircuitBreaker {
    /// Create a closed breaker from the recovery settings
    ///
    /// ```rust
    /// use recipe_cart::circuit_breaker::CircuitBreaker;
    /// use recipe_cart::config::RecoveryConfig;
    ///
    /// let breaker = CircuitBreaker::new(&RecoveryConfig::default());
    /// assert!(!breaker.is_open());
    /// ```
    pub fn new(config: &RecoveryConfig) -> Self {
        Self::with_reset(
            config.circuit_breaker_threshold,
            Duration::from_secs(config.circuit_breaker_reset_secs),
        )
    }

    /// Create a breaker with an explicit reset window
    pub fn with_reset(threshold: u32, reset_after: Duration) -> Self {
        Self {
            state: Mutex::new(BreakerState::default()),
            threshold,
            reset_after,
        }
    }

    // A panic while holding the lock leaves plain counters behind, still usable
    fn state(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Whether searches should currently be refused
    ///
    /// Closes the breaker as a side effect once the reset window has elapsed.
    pub fn is_open(&self) -> bool {
        let mut state = self.state();
        if state.failure_count < self.threshold {
            return false;
        }
        match state.last_failure {
            Some(last) if last.elapsed() < self.reset_after => true,
            _ => {
                *state = BreakerState::default();
                false
            }
        }
    }

    /// Record a failed search
    pub fn record_failure(&self) {
        let mut state = self.state();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure = Some(Instant::now());
    }

    /// Record a successful search, closing the breaker
    pub fn record_success(&self) {
        *self.state() = BreakerState::default();
    }

    /// Consecutive failures since the last success or reset
    pub fn failure_count(&self) -> u32 {
        self.state().failure_count
    }
}
