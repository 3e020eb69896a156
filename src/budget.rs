//! Wall-clock budgets.
//!
//! Long-running loops poll [`TimeBudget::expired`] once per iteration and
//! return their best result when it fires. Nothing is preempted.

use std::time::Instant;

/// A deadline measured in seconds from construction.
///
/// `f64::INFINITY` never expires.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: f64,
}

impl TimeBudget {
    /// Starts a budget of `limit` seconds.
    pub fn start(limit: f64) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn unlimited() -> Self {
        Self::start(f64::INFINITY)
    }

    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Seconds left, never negative.
    pub fn remaining(&self) -> f64 {
        (self.limit - self.elapsed()).max(0.0)
    }

    pub fn expired(&self) -> bool {
        self.elapsed() > self.limit
    }
}

/// Checks that `limit` is usable as a budget in seconds.
pub(crate) fn validate_limit(name: &str, limit: f64) -> Result<(), crate::Error> {
    if limit.is_nan() || limit < 0.0 {
        return Err(crate::Error::InvalidConfig(format!(
            "{name} must be a non-negative number of seconds, got {limit}"
        )));
    }
    Ok(())
}
