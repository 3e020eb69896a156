//! Neighborhood selection strategies.
//!
//! Given a [`MoveGenerator`](crate::model::MoveGenerator) and a current
//! solution, an [`Exploration`] returns at most one improving move:
//!
//! - first improvement (streamed, stops at the first hit)
//! - best improvement (exhaustive)
//! - random selection (best of `k` distinct random draws)
//! - random scan (first improving among `k` random draws)

mod exploration;

pub use exploration::{Exploration, Selected};
