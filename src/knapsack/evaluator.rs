//! Knapsack instance data and objective.

use super::solution::{KnapsackSolution, Totals};
use crate::error::{Error, Result};
use crate::model::{Evaluator, Score};

/// A 0/1 knapsack instance, used as the evaluator of [`KnapsackSolution`]s.
///
/// The score of a solution is the summed value of its items, or
/// [`Score::Infeasible`] when their summed weight exceeds the capacity.
///
/// # Examples
///
/// ```
/// use u_localsearch::knapsack::{KnapsackEvaluator, KnapsackSolution};
/// use u_localsearch::model::{Evaluator, Score};
///
/// let evaluator = KnapsackEvaluator::new(3, 10, vec![5, 8, 3], vec![4, 7, 2]).unwrap();
/// let mut solution = KnapsackSolution::empty(3);
/// solution.flip(0, Some(&evaluator));
/// solution.flip(2, Some(&evaluator));
/// assert_eq!(evaluator.evaluation(&mut solution), Score::Feasible(8));
///
/// solution.flip(1, Some(&evaluator));
/// assert_eq!(evaluator.evaluation(&mut solution), Score::Infeasible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackEvaluator {
    capacity: i64,
    values: Vec<i64>,
    weights: Vec<i64>,
}

impl KnapsackEvaluator {
    /// Builds an instance, rejecting inconsistent or negative data.
    pub fn new(
        item_count: usize,
        capacity: i64,
        values: Vec<i64>,
        weights: Vec<i64>,
    ) -> Result<Self> {
        if values.len() != item_count {
            return Err(Error::LengthMismatch {
                field: "values",
                expected: item_count,
                actual: values.len(),
            });
        }
        if weights.len() != item_count {
            return Err(Error::LengthMismatch {
                field: "weights",
                expected: item_count,
                actual: weights.len(),
            });
        }
        if capacity < 0 {
            return Err(Error::NegativeCapacity(capacity));
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|&(_, &v)| v < 0) {
            return Err(Error::NegativeValue { index, value });
        }
        if let Some((index, &weight)) = weights.iter().enumerate().find(|&(_, &w)| w < 0) {
            return Err(Error::NegativeWeight { index, weight });
        }

        Ok(Self {
            capacity,
            values,
            weights,
        })
    }

    pub fn item_count(&self) -> usize {
        self.values.len()
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    pub fn value(&self, item: usize) -> i64 {
        self.values[item]
    }

    pub fn weight(&self, item: usize) -> i64 {
        self.weights[item]
    }

    /// Value per unit of weight. Weightless items rank first when they carry
    /// any value.
    pub fn ratio(&self, item: usize) -> f64 {
        let (value, weight) = (self.values[item], self.weights[item]);
        if weight == 0 {
            if value > 0 {
                f64::MAX
            } else {
                0.0
            }
        } else {
            value as f64 / weight as f64
        }
    }

    /// Sums value and weight of the included items with a full scan.
    pub fn totals(&self, solution: &KnapsackSolution) -> Totals {
        self.sum(solution.flags())
    }

    pub(crate) fn sum(&self, flags: &[bool]) -> Totals {
        flags
            .iter()
            .zip(self.values.iter().zip(&self.weights))
            .filter(|&(&included, _)| included)
            .fold(Totals::default(), |acc, (_, (&v, &w))| Totals {
                value: acc.value + v,
                weight: acc.weight + w,
            })
    }

    /// Applies the capacity rule to summed totals.
    pub fn score_of(&self, totals: Totals) -> Score {
        if totals.weight > self.capacity {
            Score::Infeasible
        } else {
            Score::Feasible(totals.value)
        }
    }

    /// Summarizes a final solution for reporting.
    pub fn report(&self, solution: &mut KnapsackSolution) -> KnapsackReport {
        let totals = solution.ensure_totals(self);
        KnapsackReport {
            score: self.score_of(totals),
            value: totals.value,
            weight: totals.weight,
            items: solution.included_items(),
        }
    }
}

impl Evaluator for KnapsackEvaluator {
    type Solution = KnapsackSolution;

    fn evaluate(&self, solution: &KnapsackSolution) -> Score {
        self.score_of(self.totals(solution))
    }

    fn evaluation(&self, solution: &mut KnapsackSolution) -> Score {
        let totals = solution.ensure_totals(self);
        self.score_of(totals)
    }
}

/// Result handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackReport {
    /// Objective value, or infeasible.
    pub score: Score,
    /// Summed value of the included items, even when infeasible.
    pub value: i64,
    /// Summed weight of the included items.
    pub weight: i64,
    /// Included item indices in ascending order.
    pub items: Vec<usize>,
}
