//! Local search execution loop.
//!
//! # Algorithm
//!
//! 1. `current := initial`
//! 2. Ask the exploration for an improving move on `current`
//! 3. If one is found, apply it and reset the non-improving streak
//! 4. Otherwise hill climbing stops; random descent tries a sideways move
//!    and stops once the streak reaches its patience
//! 5. The time budget and iteration cap stop either driver at any step

use super::config::{LocalSearchConfig, LocalSearchMethod};
use crate::budget::TimeBudget;
use crate::error::Result;
use crate::model::{Evaluator, Move, MoveGenerator, Score};
use rand::Rng;
use tracing::{debug, trace};

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult<S: Clone> {
    /// Final solution. Local search never worsens, so it is also the best.
    pub best: S,

    /// Score of `best`.
    pub best_score: Score,

    /// Steps taken (explorations performed).
    pub iterations: usize,

    /// Steps that applied an improving move.
    pub improvements: usize,

    /// Whether the run stopped because the time budget ran out.
    pub timed_out: bool,
}

/// Executes hill climbing or random descent.
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Refines `initial` with the configured driver.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use u_localsearch::knapsack::{
    ///     construction, KnapsackEvaluator, KnapsackMoveGenerator, MoveKind,
    /// };
    /// use u_localsearch::local_search::{LocalSearchConfig, LocalSearchRunner};
    /// use u_localsearch::neighborhood::Exploration;
    ///
    /// let evaluator = KnapsackEvaluator::new(4, 10, vec![6, 5, 8, 9], vec![2, 3, 6, 7]).unwrap();
    /// let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
    /// let config = LocalSearchConfig::hill_climbing(Exploration::BestImprovement);
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    ///
    /// let initial = construction::greedy(&evaluator);
    /// let result = LocalSearchRunner::run(&evaluator, &mut generator, &initial, &config, &mut rng)
    ///     .unwrap();
    /// assert!(result.best_score.value().unwrap() >= 11);
    /// ```
    pub fn run<E, G, R>(
        evaluator: &E,
        generator: &mut G,
        initial: &E::Solution,
        config: &LocalSearchConfig,
        rng: &mut R,
    ) -> Result<LocalSearchResult<E::Solution>>
    where
        E: Evaluator,
        G: MoveGenerator<E>,
        R: Rng,
    {
        config.validate()?;

        let budget = TimeBudget::start(config.time_limit);
        let mut current = initial.clone();
        let mut current_score = evaluator.evaluation(&mut current);
        let initial_score = current_score;

        let mut iterations = 0usize;
        let mut improvements = 0usize;
        let mut streak = 0usize;
        let mut timed_out = false;

        loop {
            if budget.expired() {
                timed_out = true;
                break;
            }
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                break;
            }
            iterations += 1;

            let selected = config
                .exploration
                .select(evaluator, generator, &mut current, rng);

            match selected {
                Some(step) if step.score > current_score => {
                    step.mv.apply(evaluator, &mut current);
                    current_score = evaluator.evaluation(&mut current);
                    improvements += 1;
                    streak = 0;
                    trace!(
                        iteration = iterations,
                        score = %current_score,
                        "improving move applied"
                    );
                }
                _ => match config.method {
                    LocalSearchMethod::HillClimbing => break,
                    LocalSearchMethod::RandomDescent { patience } => {
                        if let Some(mv) = generator.random_move(rng) {
                            if mv.score_after(evaluator, &current) == current_score {
                                mv.apply(evaluator, &mut current);
                            }
                        }
                        streak += 1;
                        if streak >= patience {
                            break;
                        }
                    }
                },
            }
        }

        debug!(
            method = ?config.method,
            exploration = ?config.exploration,
            initial = %initial_score,
            best = %current_score,
            iterations,
            improvements,
            timed_out,
            "local search finished"
        );

        Ok(LocalSearchResult {
            best: current,
            best_score: current_score,
            iterations,
            improvements,
            timed_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knapsack::{
        construction, KnapsackEvaluator, KnapsackMoveGenerator, KnapsackSolution, MoveKind,
    };
    use crate::neighborhood::Exploration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn sample() -> KnapsackEvaluator {
        KnapsackEvaluator::new(5, 10, vec![10, 40, 30, 50, 35], vec![2, 4, 6, 7, 5]).unwrap()
    }

    fn medium() -> KnapsackEvaluator {
        KnapsackEvaluator::new(
            12,
            50,
            vec![24, 13, 23, 15, 16, 9, 31, 11, 27, 8, 19, 21],
            vec![12, 7, 11, 8, 9, 5, 16, 6, 14, 4, 10, 11],
        )
        .unwrap()
    }

    const STRATEGIES: [Exploration; 4] = [
        Exploration::FirstImprovement,
        Exploration::BestImprovement,
        Exploration::RandomSelection { samples: 10 },
        Exploration::RandomScan { samples: 10 },
    ];

    #[test]
    fn test_hill_climbing_reaches_optimum_from_empty() {
        let evaluator = sample();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let mut rng = StdRng::seed_from_u64(42);
        let config = LocalSearchConfig::hill_climbing(Exploration::BestImprovement);

        let result = LocalSearchRunner::run(
            &evaluator,
            &mut generator,
            &KnapsackSolution::empty(5),
            &config,
            &mut rng,
        )
        .unwrap();

        assert_eq!(result.best_score, Score::Feasible(75));
        assert_eq!(result.best.included_items(), vec![1, 4]);
        assert_eq!(result.improvements, 1);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_hill_climbing_never_worsens() {
        let evaluator = medium();
        let mut rng = StdRng::seed_from_u64(7);
        for kind in MoveKind::ALL {
            for exploration in STRATEGIES {
                let mut generator = KnapsackMoveGenerator::new(kind, &evaluator);
                let mut initial =
                    construction::random_feasible(&evaluator, f64::INFINITY, &mut rng);
                let before = evaluator.evaluation(&mut initial);

                let config = LocalSearchConfig::hill_climbing(exploration);
                let result = LocalSearchRunner::run(
                    &evaluator,
                    &mut generator,
                    &initial,
                    &config,
                    &mut rng,
                )
                .unwrap();

                assert!(result.best_score >= before);
                assert_eq!(evaluator.evaluate(&result.best), result.best_score);
            }
        }
    }

    #[test]
    fn test_hill_climbing_idempotent_at_local_optimum() {
        let evaluator = medium();
        let mut rng = StdRng::seed_from_u64(3);
        for kind in MoveKind::ALL {
            for exploration in [Exploration::FirstImprovement, Exploration::BestImprovement] {
                let mut generator = KnapsackMoveGenerator::new(kind, &evaluator);
                let config = LocalSearchConfig::hill_climbing(exploration);
                let start = construction::greedy(&evaluator);

                let first = LocalSearchRunner::run(
                    &evaluator,
                    &mut generator,
                    &start,
                    &config,
                    &mut rng,
                )
                .unwrap();
                let second = LocalSearchRunner::run(
                    &evaluator,
                    &mut generator,
                    &first.best,
                    &config,
                    &mut rng,
                )
                .unwrap();

                assert_eq!(second.best.flags(), first.best.flags());
                assert_eq!(second.best_score, first.best_score);
                assert_eq!(second.improvements, 0);
            }
        }
    }

    #[test]
    fn test_hill_climbing_escapes_infeasible_start() {
        let evaluator = sample();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let mut rng = StdRng::seed_from_u64(1);
        let start = KnapsackSolution::from_flags(vec![true; 5]);
        let config = LocalSearchConfig::hill_climbing(Exploration::FirstImprovement);

        let result =
            LocalSearchRunner::run(&evaluator, &mut generator, &start, &config, &mut rng).unwrap();
        assert!(result.best_score.is_feasible());
    }

    #[test]
    fn test_random_descent_stops_after_patience() {
        let evaluator = sample();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let mut rng = StdRng::seed_from_u64(5);
        // {1, 4} is already optimal: every step is non-improving.
        let start = KnapsackSolution::from_flags(vec![false, true, false, false, true]);
        let config =
            LocalSearchConfig::random_descent(6, Exploration::RandomSelection { samples: 3 });

        let result =
            LocalSearchRunner::run(&evaluator, &mut generator, &start, &config, &mut rng).unwrap();
        assert_eq!(result.iterations, 6);
        assert_eq!(result.improvements, 0);
        assert_eq!(result.best_score, Score::Feasible(75));
    }

    #[test]
    fn test_random_descent_walks_plateaus() {
        // Every single item has the same value and the capacity holds one:
        // swapping which item is held is a sideways move.
        let evaluator = KnapsackEvaluator::new(4, 3, vec![5; 4], vec![3; 4]).unwrap();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let start = KnapsackSolution::from_flags(vec![true, false, false, false]);
        let config = LocalSearchConfig::random_descent(50, Exploration::RandomScan { samples: 2 });

        let mut ends = HashSet::new();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = LocalSearchRunner::run(
                &evaluator,
                &mut generator,
                &start,
                &config,
                &mut rng,
            )
            .unwrap();
            assert_eq!(result.best_score, Score::Feasible(5));
            assert_eq!(result.best.included_items().len(), 1);
            assert_eq!(result.improvements, 0);
            ends.insert(result.best.included_items()[0]);
        }
        assert!(ends.len() > 1, "random descent never left item 0");
    }

    #[test]
    fn test_random_descent_not_worse_than_start() {
        let evaluator = medium();
        let mut rng = StdRng::seed_from_u64(13);
        for kind in MoveKind::ALL {
            let mut generator = KnapsackMoveGenerator::new(kind, &evaluator);
            let mut start =
                construction::greedy_randomized(&evaluator, f64::INFINITY, 0.5, &mut rng);
            let before = evaluator.evaluation(&mut start);
            let config =
                LocalSearchConfig::random_descent(20, Exploration::RandomSelection { samples: 5 });

            let result = LocalSearchRunner::run(
                &evaluator,
                &mut generator,
                &start,
                &config,
                &mut rng,
            )
            .unwrap();
            assert!(result.best_score >= before);
        }
    }

    #[test]
    fn test_max_iterations() {
        let evaluator = medium();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let mut rng = StdRng::seed_from_u64(2);
        let config =
            LocalSearchConfig::hill_climbing(Exploration::FirstImprovement).with_max_iterations(1);

        let result = LocalSearchRunner::run(
            &evaluator,
            &mut generator,
            &KnapsackSolution::empty(12),
            &config,
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.improvements, 1);
    }

    #[test]
    fn test_zero_time_budget_returns_initial() {
        let evaluator = medium();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let mut rng = StdRng::seed_from_u64(2);
        let config = LocalSearchConfig::default().with_time_limit(0.0);
        let start = KnapsackSolution::empty(12);

        let result =
            LocalSearchRunner::run(&evaluator, &mut generator, &start, &config, &mut rng).unwrap();
        assert!(result.timed_out);
        assert_eq!(result.best_score, Score::Feasible(0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let evaluator = sample();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let mut rng = StdRng::seed_from_u64(2);
        let config = LocalSearchConfig::random_descent(0, Exploration::FirstImprovement);

        assert!(LocalSearchRunner::run(
            &evaluator,
            &mut generator,
            &KnapsackSolution::empty(5),
            &config,
            &mut rng
        )
        .is_err());
    }
}
