//! SA execution loop.

use super::config::{CoolingSchedule, InitialTemperature, SaConfig};
use crate::budget::TimeBudget;
use crate::error::Result;
use crate::model::{Evaluator, Move, MoveGenerator, Score};
use rand::Rng;
use tracing::{debug, trace};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Score of the best solution.
    pub best_score: Score,

    /// Total number of trials (random moves scored).
    pub iterations: usize,

    /// Temperature annealing started from (after preheating, if any).
    pub initial_temperature: f64,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Whether the run stopped because the time budget ran out.
    pub timed_out: bool,

    /// Best score at the start and after each temperature level.
    pub score_history: Vec<Score>,
}

/// Metropolis acceptance probability for a score change `delta` at
/// `temperature` (maximization).
///
/// Non-negative deltas are always accepted. Worsening deltas are accepted
/// with probability `exp(delta / temperature)`, which grows with both the
/// temperature and the delta. A non-positive temperature rejects every
/// worsening move, as does `delta = -inf` (a move into infeasibility).
///
/// # Examples
///
/// ```
/// use u_localsearch::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(3.0, 1.0), 1.0);
/// assert!((acceptance_probability(-1.0, 1.0) - (-1.0f64).exp()).abs() < 1e-12);
/// assert_eq!(acceptance_probability(f64::NEG_INFINITY, 10.0), 0.0);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta >= 0.0 {
        1.0
    } else if temperature > 0.0 {
        (delta / temperature).exp()
    } else {
        0.0
    }
}

fn accepts<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    delta >= 0.0 || rng.random_range(0.0..1.0) < acceptance_probability(delta, temperature)
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Anneals from `initial` using random moves drawn from `generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use u_localsearch::knapsack::{
    ///     KnapsackEvaluator, KnapsackMoveGenerator, KnapsackSolution, MoveKind,
    /// };
    /// use u_localsearch::sa::{InitialTemperature, SaConfig, SaRunner};
    ///
    /// let evaluator = KnapsackEvaluator::new(4, 10, vec![6, 5, 8, 9], vec![2, 3, 6, 7]).unwrap();
    /// let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
    /// let config = SaConfig::default()
    ///     .with_initial_temperature(InitialTemperature::Fixed(20.0))
    ///     .with_min_temperature(0.01);
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    ///
    /// let initial = KnapsackSolution::empty(4);
    /// let result = SaRunner::run(&evaluator, &mut generator, &initial, &config, &mut rng)
    ///     .unwrap();
    /// assert!(result.best_score.is_feasible());
    /// ```
    pub fn run<E, G, R>(
        evaluator: &E,
        generator: &mut G,
        initial: &E::Solution,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult<E::Solution>>
    where
        E: Evaluator,
        G: MoveGenerator<E>,
        R: Rng,
    {
        config.validate()?;

        let budget = TimeBudget::start(config.time_limit);
        let mut current = initial.clone();
        let mut current_score = evaluator.evaluation(&mut current);
        let mut best = current.clone();
        let mut best_score = current_score;

        let initial_temperature = match config.initial_temperature {
            InitialTemperature::Fixed(t) => t,
            InitialTemperature::Preheat {
                start,
                heating_factor,
                target_acceptance,
                max_rounds,
            } => preheat(
                evaluator,
                generator,
                &current,
                current_score,
                Heating {
                    start,
                    factor: heating_factor,
                    target: target_acceptance,
                    max_rounds,
                    trials: config.iterations_per_temperature,
                },
                rng,
            ),
        };
        debug!(
            initial_temperature,
            initial = %current_score,
            "simulated annealing started"
        );

        let mut temperature = initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut timed_out = false;

        // For linear cooling: compute step count
        let linear_max_steps = compute_linear_steps(config);

        let mut score_history = vec![best_score];
        let mut step = 0usize;

        'anneal: while temperature > config.min_temperature {
            let inner_iters = match config.cooling {
                CoolingSchedule::LundyMees { .. } => 1,
                _ => config.iterations_per_temperature,
            };

            for _ in 0..inner_iters {
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    break 'anneal;
                }
                if budget.expired() {
                    timed_out = true;
                    break 'anneal;
                }
                let Some(mv) = generator.random_move(rng) else {
                    break 'anneal;
                };
                total_iterations += 1;

                let neighbor_score = mv.score_after(evaluator, &current);
                let delta = neighbor_score.delta_from(current_score);
                if delta > 0.0 {
                    improving_moves += 1;
                }

                if accepts(delta, temperature, rng) {
                    mv.apply(evaluator, &mut current);
                    current_score = neighbor_score;
                    accepted_moves += 1;

                    if current_score > best_score {
                        best = current.clone();
                        best_score = current_score;
                    }
                }
            }

            score_history.push(best_score);
            trace!(
                step,
                temperature,
                current = %current_score,
                best = %best_score,
                "temperature level done"
            );

            temperature = cool(temperature, initial_temperature, config, step, linear_max_steps);
            step += 1;
        }

        if score_history.last() != Some(&best_score) {
            score_history.push(best_score);
        }

        debug!(
            best = %best_score,
            iterations = total_iterations,
            accepted_moves,
            improving_moves,
            final_temperature = temperature,
            timed_out,
            "simulated annealing finished"
        );

        Ok(SaResult {
            best,
            best_score,
            iterations: total_iterations,
            initial_temperature,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            timed_out,
            score_history,
        })
    }
}

struct Heating {
    start: f64,
    factor: f64,
    target: f64,
    max_rounds: usize,
    trials: usize,
}

/// Raises the temperature until the Metropolis acceptance rate of random
/// moves around `solution` reaches the target.
fn preheat<E, G, R>(
    evaluator: &E,
    generator: &mut G,
    solution: &E::Solution,
    score: Score,
    heating: Heating,
    rng: &mut R,
) -> f64
where
    E: Evaluator,
    G: MoveGenerator<E>,
    R: Rng,
{
    let mut temperature = heating.start;
    for round in 0..heating.max_rounds {
        let mut accepted = 0usize;
        for _ in 0..heating.trials {
            let Some(mv) = generator.random_move(rng) else {
                return temperature;
            };
            let delta = mv.score_after(evaluator, solution).delta_from(score);
            if accepts(delta, temperature, rng) {
                accepted += 1;
            }
        }

        let rate = accepted as f64 / heating.trials as f64;
        trace!(round, temperature, rate, "preheat round");
        if rate >= heating.target {
            break;
        }
        temperature *= heating.factor;
    }
    temperature
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(
    temperature: f64,
    initial_temperature: f64,
    config: &SaConfig,
    step: usize,
    linear_max_steps: usize,
) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear => {
            if linear_max_steps == 0 {
                config.min_temperature
            } else {
                let t = initial_temperature
                    - (step + 1) as f64 * (initial_temperature - config.min_temperature)
                        / linear_max_steps as f64;
                t.max(config.min_temperature)
            }
        }

        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    }
}

/// Estimate the number of temperature steps for linear cooling.
fn compute_linear_steps(config: &SaConfig) -> usize {
    match config.cooling {
        CoolingSchedule::Linear => {
            if config.max_iterations > 0 {
                config.max_iterations / config.iterations_per_temperature
            } else {
                1000
            }
        }
        _ => 0,
    }
}
