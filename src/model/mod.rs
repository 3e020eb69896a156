//! Generic optimization model.
//!
//! The abstractions every algorithm in this crate is written against:
//!
//! - [`Score`]: ordered objective value with an infeasible bottom
//! - [`Cached`]: explicit lazy cache used for incremental evaluation
//! - [`Evaluator`]: objective function over a solution type
//! - [`Move`] / [`MoveGenerator`]: neighborhood structure
//! - [`Construction`]: initial solution builders

mod cache;
mod score;
mod types;

pub use cache::Cached;
pub use score::Score;
pub use types::{Construction, Evaluator, Move, MoveGenerator};
