//! Local search configuration.

use crate::budget::validate_limit;
use crate::error::{Error, Result};
use crate::neighborhood::Exploration;

/// Local search driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearchMethod {
    /// Applies improving moves until none is found. Ends at a local optimum
    /// of the neighborhood under the chosen exploration.
    #[default]
    HillClimbing,

    /// Like hill climbing, but tolerates up to `patience` consecutive
    /// non-improving steps. A non-improving step tries one random sideways
    /// move (same score), which lets the search walk across plateaus.
    RandomDescent {
        /// Consecutive non-improving steps before stopping.
        patience: usize,
    },
}

/// Configuration for [`LocalSearchRunner`](super::LocalSearchRunner).
///
/// # Examples
///
/// ```
/// use u_localsearch::local_search::{LocalSearchConfig, LocalSearchMethod};
/// use u_localsearch::neighborhood::Exploration;
///
/// let config = LocalSearchConfig::default()
///     .with_method(LocalSearchMethod::RandomDescent { patience: 10 })
///     .with_exploration(Exploration::RandomSelection { samples: 5 })
///     .with_time_limit(2.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Driver.
    pub method: LocalSearchMethod,

    /// Strategy used to pick each step's move.
    pub exploration: Exploration,

    /// Wall-clock budget in seconds. `f64::INFINITY` = no limit.
    pub time_limit: f64,

    /// Maximum number of steps. 0 = no limit.
    pub max_iterations: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            method: LocalSearchMethod::default(),
            exploration: Exploration::default(),
            time_limit: f64::INFINITY,
            max_iterations: 0,
        }
    }
}

impl LocalSearchConfig {
    /// Hill climbing with the given exploration.
    pub fn hill_climbing(exploration: Exploration) -> Self {
        Self::default().with_exploration(exploration)
    }

    /// Random descent with the given patience and exploration.
    pub fn random_descent(patience: usize, exploration: Exploration) -> Self {
        Self::default()
            .with_method(LocalSearchMethod::RandomDescent { patience })
            .with_exploration(exploration)
    }

    pub fn with_method(mut self, method: LocalSearchMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_exploration(mut self, exploration: Exploration) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if let LocalSearchMethod::RandomDescent { patience: 0 } = self.method {
            return Err(Error::InvalidConfig(
                "random descent patience must be positive".into(),
            ));
        }
        self.exploration.validate()?;
        validate_limit("time_limit", self.time_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocalSearchConfig::default();
        assert_eq!(config.method, LocalSearchMethod::HillClimbing);
        assert_eq!(config.exploration, Exploration::FirstImprovement);
        assert!(config.time_limit.is_infinite());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_patience() {
        let config = LocalSearchConfig::random_descent(0, Exploration::BestImprovement);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_exploration() {
        let config = LocalSearchConfig::hill_climbing(Exploration::RandomScan { samples: 0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_time_limit() {
        let config = LocalSearchConfig::default().with_time_limit(-0.5);
        assert!(config.validate().is_err());
    }
}
