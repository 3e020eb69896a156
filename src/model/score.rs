//! Objective values.

use std::fmt;

/// Objective value of a candidate solution. Higher is better.
///
/// `Infeasible` plays the role of the punishment value: it orders strictly
/// below every feasible score, so comparisons never need a special case.
///
/// # Examples
///
/// ```
/// use u_localsearch::model::Score;
///
/// assert!(Score::Infeasible < Score::Feasible(0));
/// assert!(Score::Feasible(3) < Score::Feasible(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Score {
    /// The solution violates a hard constraint.
    Infeasible,
    /// The solution is feasible with the given objective value.
    Feasible(i64),
}

impl Score {
    /// Returns the objective value, or `None` when infeasible.
    pub fn value(self) -> Option<i64> {
        match self {
            Score::Feasible(v) => Some(v),
            Score::Infeasible => None,
        }
    }

    pub fn is_feasible(self) -> bool {
        matches!(self, Score::Feasible(_))
    }

    /// Signed change when going from `base` to `self`.
    ///
    /// Entering infeasibility is `-inf`, leaving it is `+inf`, and two
    /// infeasible scores differ by zero.
    pub fn delta_from(self, base: Score) -> f64 {
        match (base, self) {
            (Score::Feasible(a), Score::Feasible(b)) => b as f64 - a as f64,
            (Score::Feasible(_), Score::Infeasible) => f64::NEG_INFINITY,
            (Score::Infeasible, Score::Feasible(_)) => f64::INFINITY,
            (Score::Infeasible, Score::Infeasible) => 0.0,
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::Feasible(0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Feasible(v) => write!(f, "{v}"),
            Score::Infeasible => f.write_str("infeasible"),
        }
    }
}
