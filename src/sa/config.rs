//! SA configuration, initial temperature and cooling schedules.

use crate::budget::validate_limit;
use crate::error::{Error, Result};

/// Cooling schedule for temperature reduction.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Typical `alpha`: 0.90 to 0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / max_steps`.
    ///
    /// The step count comes from `max_iterations / iterations_per_temperature`
    /// when an iteration cap is set.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// One trial per temperature step.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// How the starting temperature is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialTemperature {
    /// Use the given temperature as is.
    Fixed(f64),

    /// Heat up from `start` until enough random moves around the initial
    /// solution are accepted.
    ///
    /// Each round runs `iterations_per_temperature` trials from the initial
    /// solution and counts Metropolis acceptances. The round's temperature is
    /// kept once the acceptance rate reaches `target_acceptance`; otherwise
    /// it is multiplied by `heating_factor` and another round starts.
    Preheat {
        /// Temperature of the first round.
        start: f64,
        /// Multiplier applied after a round below target. Must be > 1.
        heating_factor: f64,
        /// Acceptance rate in (0, 1] that ends heating.
        target_acceptance: f64,
        /// Rounds before giving up and keeping the current temperature.
        max_rounds: usize,
    },
}

impl Default for InitialTemperature {
    fn default() -> Self {
        InitialTemperature::Preheat {
            start: 1.0,
            heating_factor: 1.05,
            target_acceptance: 0.9,
            max_rounds: 100,
        }
    }
}

/// Configuration for the Simulated Annealing algorithm.
///
/// # Examples
///
/// ```
/// use u_localsearch::sa::{CoolingSchedule, InitialTemperature, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(InitialTemperature::Fixed(100.0))
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_iterations_per_temperature(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature, fixed or obtained by preheating.
    pub initial_temperature: InitialTemperature,

    /// Minimum temperature. The algorithm stops once T drops to this.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Number of trials at each temperature level.
    ///
    /// For `LundyMees` this is ignored during annealing (1 trial per
    /// level) but still sizes the preheating rounds.
    pub iterations_per_temperature: usize,

    /// Maximum total trials. 0 = no limit.
    pub max_iterations: usize,

    /// Wall-clock budget in seconds. `f64::INFINITY` = no limit.
    pub time_limit: f64,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: InitialTemperature::default(),
            min_temperature: 1e-5,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 100,
            max_iterations: 0,
            time_limit: f64::INFINITY,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: InitialTemperature) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_temperature > 0.0) {
            return Err(Error::InvalidConfig("min_temperature must be positive".into()));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::InvalidConfig(
                "iterations_per_temperature must be positive".into(),
            ));
        }
        match self.initial_temperature {
            InitialTemperature::Fixed(t) => {
                if !(t > 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "initial temperature must be positive, got {t}"
                    )));
                }
                if self.min_temperature >= t {
                    return Err(Error::InvalidConfig(
                        "min_temperature must be less than the initial temperature".into(),
                    ));
                }
            }
            InitialTemperature::Preheat {
                start,
                heating_factor,
                target_acceptance,
                max_rounds,
            } => {
                if !(start > 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "preheat start must be positive, got {start}"
                    )));
                }
                if !(heating_factor > 1.0) {
                    return Err(Error::InvalidConfig(format!(
                        "heating factor must be greater than 1, got {heating_factor}"
                    )));
                }
                if !(target_acceptance > 0.0 && target_acceptance <= 1.0) {
                    return Err(Error::InvalidConfig(format!(
                        "target acceptance must be in (0, 1], got {target_acceptance}"
                    )));
                }
                if max_rounds == 0 {
                    return Err(Error::InvalidConfig("max_rounds must be positive".into()));
                }
            }
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(Error::InvalidConfig(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
            CoolingSchedule::Linear => {}
        }
        validate_limit("time_limit", self.time_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.min_temperature - 1e-5).abs() < 1e-15);
        assert_eq!(config.iterations_per_temperature, 100);
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.95 });
        assert!(matches!(
            config.initial_temperature,
            InitialTemperature::Preheat { heating_factor, target_acceptance, .. }
                if (heating_factor - 1.05).abs() < 1e-12 && (target_acceptance - 0.9).abs() < 1e-12
        ));
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(InitialTemperature::Fixed(-1.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(InitialTemperature::Fixed(10.0))
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 1.5 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_beta() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::LundyMees { beta: -1.0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_preheat() {
        let cooling_off = InitialTemperature::Preheat {
            start: 1.0,
            heating_factor: 0.9,
            target_acceptance: 0.9,
            max_rounds: 10,
        };
        assert!(SaConfig::default()
            .with_initial_temperature(cooling_off)
            .validate()
            .is_err());

        let unreachable = InitialTemperature::Preheat {
            start: 1.0,
            heating_factor: 1.05,
            target_acceptance: 1.5,
            max_rounds: 10,
        };
        assert!(SaConfig::default()
            .with_initial_temperature(unreachable)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_iterations_per_temperature() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nan_time_limit() {
        let config = SaConfig::default().with_time_limit(f64::NAN);
        assert!(config.validate().is_err());
    }
}
