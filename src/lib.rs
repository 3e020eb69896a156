//! Local search and metaheuristic engine.
//!
//! Generic building blocks for improving candidate solutions of a
//! maximization problem, plus a complete 0/1 knapsack instantiation:
//!
//! - **Model**: [`Score`](model::Score) (infeasible below every feasible
//!   value), cached evaluations and the `Evaluator` / `Move` /
//!   `MoveGenerator` / `Construction` traits.
//! - **Neighborhood exploration**: first improvement, best improvement,
//!   random selection and bounded random scan.
//! - **Local search**: Hill Climbing and Random Descent.
//! - **Simulated Annealing (SA)**: Metropolis acceptance with optional
//!   preheating and pluggable cooling schedules.
//! - **GRASP**: randomized greedy construction followed by local search,
//!   repeated under an iteration and time budget.
//! - **Knapsack**: evaluator with O(1) incremental updates, 2-flip /
//!   interval flip / interval inversion neighborhoods and greedy, random
//!   and greedy randomized constructions.
//!
//! # Architecture
//!
//! Everything is single-threaded and synchronous. Randomness is injected as
//! `&mut impl rand::Rng`; time limits are wall-clock seconds polled once per
//! step, with `f64::INFINITY` meaning no limit. With the `parallel` feature,
//! best improvement scores its neighborhood with rayon.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use u_localsearch::grasp::{GraspConfig, GraspRunner};
//! use u_localsearch::knapsack::{
//!     KnapsackConstruction, KnapsackEvaluator, KnapsackMoveGenerator, MoveKind,
//! };
//! use u_localsearch::local_search::LocalSearchConfig;
//! use u_localsearch::neighborhood::Exploration;
//!
//! # fn main() -> u_localsearch::Result<()> {
//! let evaluator = KnapsackEvaluator::new(5, 10, vec![10, 40, 30, 50, 35], vec![2, 4, 6, 7, 5])?;
//! let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let result = GraspRunner::run(
//!     &evaluator,
//!     &KnapsackConstruction::GreedyRandomized,
//!     &mut generator,
//!     &LocalSearchConfig::hill_climbing(Exploration::BestImprovement),
//!     &GraspConfig::default().with_max_iterations(20),
//!     &mut rng,
//! )?;
//!
//! let mut best = result.best;
//! let report = evaluator.report(&mut best);
//! assert_eq!(report.value, 75);
//! assert_eq!(report.items, vec![1, 4]);
//! # Ok(())
//! # }
//! ```

pub mod budget;
pub mod error;
pub mod grasp;
pub mod knapsack;
pub mod local_search;
pub mod model;
pub mod neighborhood;
pub mod sa;

pub use error::{Error, Result};
