//! 0/1 knapsack instantiation of the engine.
//!
//! - [`KnapsackEvaluator`]: instance data and objective (infeasible above capacity)
//! - [`KnapsackSolution`]: inclusion flags with O(1) incremental evaluation
//! - [`KnapsackMove`] / [`KnapsackMoveGenerator`]: 2-flip, interval flip and
//!   interval inversion neighborhoods
//! - [`construction`]: greedy, random and greedy randomized (RCL) builders

pub mod construction;
mod evaluator;
mod moves;
mod solution;

pub use construction::KnapsackConstruction;
pub use evaluator::{KnapsackEvaluator, KnapsackReport};
pub use moves::{KnapsackMove, KnapsackMoveGenerator, MoveKind};
pub use solution::{KnapsackSolution, Totals};
