//! GRASP configuration.

use crate::budget::validate_limit;
use crate::error::{Error, Result};

/// Configuration for [`GraspRunner`](super::GraspRunner).
///
/// # Examples
///
/// ```
/// use u_localsearch::grasp::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_max_iterations(50)
///     .with_alpha(0.3)
///     .with_time_limit(10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Number of construct-then-improve iterations.
    pub max_iterations: usize,

    /// Greediness of the construction in [0, 1]: 0 = pure greedy,
    /// 1 = uniform over every feasible candidate.
    pub alpha: f64,

    /// Wall-clock budget for the whole run in seconds.
    pub time_limit: f64,

    /// Budget for a single construction in seconds.
    pub construction_time_limit: f64,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            alpha: 0.1,
            time_limit: f64::INFINITY,
            construction_time_limit: f64::INFINITY,
        }
    }
}

impl GraspConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_construction_time_limit(mut self, seconds: f64) -> Self {
        self.construction_time_limit = seconds;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig("max_iterations must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::InvalidConfig(format!(
                "alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        validate_limit("time_limit", self.time_limit)?;
        validate_limit("construction_time_limit", self.construction_time_limit)
    }
}
