//! Knapsack candidate solutions with incremental evaluation.

use super::evaluator::KnapsackEvaluator;
use crate::model::Cached;

/// Summed value and weight of the included items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub value: i64,
    pub weight: i64,
}

impl Totals {
    /// Totals after toggling `item`, given whether it was included before.
    pub fn toggled(self, evaluator: &KnapsackEvaluator, item: usize, was_included: bool) -> Self {
        let (value, weight) = (evaluator.value(item), evaluator.weight(item));
        if was_included {
            Totals {
                value: self.value - value,
                weight: self.weight - weight,
            }
        } else {
            Totals {
                value: self.value + value,
                weight: self.weight + weight,
            }
        }
    }
}

/// An inclusion flag per item plus a cache of the item totals.
///
/// Mutations that receive the evaluator keep a valid cache valid in O(1);
/// mutations without it invalidate the cache, and the next
/// [`Evaluator::evaluation`](crate::model::Evaluator::evaluation) call
/// rescans all items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackSolution {
    flags: Vec<bool>,
    totals: Cached<Totals>,
}

impl KnapsackSolution {
    /// The solution with no item included. Its totals are known to be zero.
    pub fn empty(item_count: usize) -> Self {
        Self {
            flags: vec![false; item_count],
            totals: Cached::valid(Totals::default()),
        }
    }

    /// Wraps explicit flags. The cache starts invalid.
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self {
            flags,
            totals: Cached::invalid(),
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// # Panics
    ///
    /// Panics if `item` is out of range.
    pub fn get(&self, item: usize) -> bool {
        self.flags[item]
    }

    /// Sets the flag of `item`. Setting the current value changes nothing.
    pub fn set(&mut self, item: usize, included: bool, evaluator: Option<&KnapsackEvaluator>) {
        if self.flags[item] != included {
            self.flip(item, evaluator);
        }
    }

    /// Toggles the flag of `item`.
    ///
    /// With an evaluator and a valid cache the totals are updated by the
    /// item's value and weight; otherwise the cache is invalidated.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of range.
    pub fn flip(&mut self, item: usize, evaluator: Option<&KnapsackEvaluator>) {
        let was_included = self.flags[item];
        self.flags[item] = !was_included;

        match evaluator {
            Some(evaluator) => {
                self.totals.update(|t| t.toggled(evaluator, item, was_included));
            }
            None => self.totals.invalidate(),
        }
    }

    /// Totals if the cache is valid.
    pub fn cached_totals(&self) -> Option<Totals> {
        self.totals.get()
    }

    pub fn is_evaluated(&self) -> bool {
        self.totals.is_valid()
    }

    /// Included item indices in ascending order.
    pub fn included_items(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &included)| included.then_some(i))
            .collect()
    }

    pub(crate) fn ensure_totals(&mut self, evaluator: &KnapsackEvaluator) -> Totals {
        let flags = &self.flags;
        self.totals.get_or_compute(|| evaluator.sum(flags))
    }
}
