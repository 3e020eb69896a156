//! GRASP execution engine.
//!
//! # Algorithm
//!
//! 1. Build a solution with the randomized greedy construction
//! 2. Refine it with local search
//! 3. Keep it if it strictly beats the best so far
//! 4. Repeat until `max_iterations` or the time budget runs out
//!
//! At least one iteration always runs, so a result always exists.

use super::config::GraspConfig;
use crate::budget::TimeBudget;
use crate::error::Result;
use crate::local_search::{LocalSearchConfig, LocalSearchResult, LocalSearchRunner};
use crate::model::{Construction, Evaluator, MoveGenerator, Score};
use rand::Rng;
use tracing::{debug, trace};

/// Result of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Score of the best solution.
    pub best_score: Score,
    /// Iterations executed.
    pub iterations: usize,
    /// Iteration (1-based) at which the best solution was found.
    pub best_iteration: usize,
    /// Whether the run stopped because the time budget ran out.
    pub timed_out: bool,
    /// Best score after each iteration. Non-decreasing.
    pub score_history: Vec<Score>,
}

/// GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Runs GRASP with the given construction and local search.
    ///
    /// Each local search gets at most the time left in the GRASP budget,
    /// and each construction at most `construction_time_limit` of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use u_localsearch::grasp::{GraspConfig, GraspRunner};
    /// use u_localsearch::knapsack::{
    ///     KnapsackConstruction, KnapsackEvaluator, KnapsackMoveGenerator, MoveKind,
    /// };
    /// use u_localsearch::local_search::LocalSearchConfig;
    /// use u_localsearch::neighborhood::Exploration;
    ///
    /// let evaluator = KnapsackEvaluator::new(4, 10, vec![6, 5, 8, 9], vec![2, 3, 6, 7]).unwrap();
    /// let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
    /// let local_search = LocalSearchConfig::hill_climbing(Exploration::BestImprovement);
    /// let config = GraspConfig::default().with_max_iterations(10).with_alpha(0.5);
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    ///
    /// let result = GraspRunner::run(
    ///     &evaluator,
    ///     &KnapsackConstruction::GreedyRandomized,
    ///     &mut generator,
    ///     &local_search,
    ///     &config,
    ///     &mut rng,
    /// )
    /// .unwrap();
    /// assert_eq!(result.iterations, 10);
    /// ```
    pub fn run<E, C, G, R>(
        evaluator: &E,
        construction: &C,
        generator: &mut G,
        local_search: &LocalSearchConfig,
        config: &GraspConfig,
        rng: &mut R,
    ) -> Result<GraspResult<E::Solution>>
    where
        E: Evaluator,
        C: Construction<E>,
        G: MoveGenerator<E>,
        R: Rng,
    {
        config.validate()?;
        local_search.validate()?;

        let budget = TimeBudget::start(config.time_limit);

        let first = iterate(
            evaluator,
            construction,
            generator,
            local_search,
            config,
            &budget,
            rng,
        )?;
        let mut best = first.best;
        let mut best_score = first.best_score;
        let mut best_iteration = 1;
        let mut iterations = 1;
        let mut timed_out = false;

        let mut score_history = Vec::with_capacity(config.max_iterations);
        score_history.push(best_score);

        while iterations < config.max_iterations {
            if budget.expired() {
                timed_out = true;
                break;
            }

            let refined = iterate(
                evaluator,
                construction,
                generator,
                local_search,
                config,
                &budget,
                rng,
            )?;
            iterations += 1;

            if refined.best_score > best_score {
                trace!(iteration = iterations, score = %refined.best_score, "new best");
                best = refined.best;
                best_score = refined.best_score;
                best_iteration = iterations;
            }
            score_history.push(best_score);
        }

        debug!(
            best = %best_score,
            iterations,
            best_iteration,
            timed_out,
            "grasp finished"
        );

        Ok(GraspResult {
            best,
            best_score,
            iterations,
            best_iteration,
            timed_out,
            score_history,
        })
    }
}

/// One construct-then-improve iteration under what is left of `budget`.
fn iterate<E, C, G, R>(
    evaluator: &E,
    construction: &C,
    generator: &mut G,
    local_search: &LocalSearchConfig,
    config: &GraspConfig,
    budget: &TimeBudget,
    rng: &mut R,
) -> Result<LocalSearchResult<E::Solution>>
where
    E: Evaluator,
    C: Construction<E>,
    G: MoveGenerator<E>,
    R: Rng,
{
    let construction_limit = config.construction_time_limit.min(budget.remaining());
    let start = construction.construct(evaluator, construction_limit, config.alpha, rng);

    let ls_config = local_search
        .clone()
        .with_time_limit(local_search.time_limit.min(budget.remaining()));
    LocalSearchRunner::run(evaluator, generator, &start, &ls_config, rng)
}
