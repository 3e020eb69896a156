//! Constructive heuristics for the knapsack.
//!
//! All three builders only ever add items that fit into the remaining
//! capacity, so they always return a feasible solution whose cache is valid.

use super::evaluator::KnapsackEvaluator;
use super::solution::KnapsackSolution;
use crate::budget::TimeBudget;
use crate::model::Construction;
use rand::Rng;

/// Greedy by value/weight ratio.
///
/// Items are visited in descending ratio order (ties by index) and added
/// whenever they still fit. No backtracking.
pub fn greedy(evaluator: &KnapsackEvaluator) -> KnapsackSolution {
    let n = evaluator.item_count();
    let mut solution = KnapsackSolution::empty(n);
    let mut remaining = evaluator.capacity();

    for item in by_ratio_desc(evaluator, (0..n).collect()) {
        let weight = evaluator.weight(item);
        if weight <= remaining {
            remaining -= weight;
            solution.set(item, true, Some(evaluator));
        }
    }

    solution
}

/// Random feasible construction.
///
/// Repeatedly adds a uniformly drawn item among those that still fit,
/// until none fits or `time_limit` seconds have elapsed.
pub fn random_feasible<R: Rng>(
    evaluator: &KnapsackEvaluator,
    time_limit: f64,
    rng: &mut R,
) -> KnapsackSolution {
    let budget = TimeBudget::start(time_limit);
    let n = evaluator.item_count();
    let mut solution = KnapsackSolution::empty(n);
    let mut remaining = evaluator.capacity();

    // Ascending weight, so items that stop fitting are always at the tail.
    let mut pool: Vec<usize> = (0..n).collect();
    pool.sort_by_key(|&i| evaluator.weight(i));
    prune_heavy(evaluator, &mut pool, remaining);

    while !pool.is_empty() {
        if budget.expired() {
            break;
        }
        let item = pool.remove(rng.random_range(0..pool.len()));
        remaining -= evaluator.weight(item);
        solution.set(item, true, Some(evaluator));
        prune_heavy(evaluator, &mut pool, remaining);
    }

    solution
}

/// Greedy randomized construction with a restricted candidate list.
///
/// At each step the feasible remaining items with ratio at least
/// `max - alpha * (max - min)` form the list, and one of them is added at
/// random. `alpha` is clamped to `[0, 1]`: 0 is greedy, 1 is uniform.
pub fn greedy_randomized<R: Rng>(
    evaluator: &KnapsackEvaluator,
    time_limit: f64,
    alpha: f64,
    rng: &mut R,
) -> KnapsackSolution {
    let budget = TimeBudget::start(time_limit);
    let alpha = if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    };
    let n = evaluator.item_count();
    let mut solution = KnapsackSolution::empty(n);
    let mut remaining = evaluator.capacity();

    let fitting = (0..n).filter(|&i| evaluator.weight(i) <= remaining).collect();
    let mut pool = by_ratio_desc(evaluator, fitting);

    while let (Some(&first), Some(&last)) = (pool.first(), pool.last()) {
        if budget.expired() {
            break;
        }
        let (max, min) = (evaluator.ratio(first), evaluator.ratio(last));
        // measured from `min` so that alpha = 1 admits the whole pool exactly
        let threshold = (min + (1.0 - alpha) * (max - min)).min(max);
        let rcl_len = pool
            .iter()
            .take_while(|&&i| evaluator.ratio(i) >= threshold)
            .count()
            .max(1);

        let item = pool.remove(rng.random_range(0..rcl_len));
        remaining -= evaluator.weight(item);
        solution.set(item, true, Some(evaluator));
        pool.retain(|&i| evaluator.weight(i) <= remaining);
    }

    solution
}

fn by_ratio_desc(evaluator: &KnapsackEvaluator, mut items: Vec<usize>) -> Vec<usize> {
    items.sort_by(|&a, &b| evaluator.ratio(b).total_cmp(&evaluator.ratio(a)));
    items
}

fn prune_heavy(evaluator: &KnapsackEvaluator, pool: &mut Vec<usize>, remaining: i64) {
    while pool.last().is_some_and(|&i| evaluator.weight(i) > remaining) {
        pool.pop();
    }
}

/// Constructive method selected by configuration.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_localsearch::knapsack::{KnapsackConstruction, KnapsackEvaluator};
/// use u_localsearch::model::Construction;
///
/// let evaluator = KnapsackEvaluator::new(3, 4, vec![3, 4, 5], vec![1, 2, 3]).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let solution = KnapsackConstruction::Greedy.construct(&evaluator, 1.0, 0.0, &mut rng);
/// assert_eq!(solution.included_items(), vec![0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnapsackConstruction {
    /// [`greedy`]; ignores the time limit and `alpha`.
    Greedy,
    /// [`random_feasible`]; ignores `alpha`.
    RandomFeasible,
    /// [`greedy_randomized`].
    #[default]
    GreedyRandomized,
}

impl Construction<KnapsackEvaluator> for KnapsackConstruction {
    fn construct<R: Rng>(
        &self,
        evaluator: &KnapsackEvaluator,
        time_limit: f64,
        alpha: f64,
        rng: &mut R,
    ) -> KnapsackSolution {
        match self {
            KnapsackConstruction::Greedy => greedy(evaluator),
            KnapsackConstruction::RandomFeasible => random_feasible(evaluator, time_limit, rng),
            KnapsackConstruction::GreedyRandomized => {
                greedy_randomized(evaluator, time_limit, alpha, rng)
            }
        }
    }
}
