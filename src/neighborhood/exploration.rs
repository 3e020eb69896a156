//! Neighborhood exploration strategies.
//!
//! Each strategy looks at the neighborhood of the current solution and
//! returns at most one move that improves on it.

use crate::error::{Error, Result};
use crate::model::{Evaluator, Move, MoveGenerator, Score};
use rand::Rng;
use std::collections::HashSet;

/// A move chosen by an [`Exploration`], with the score it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected<M> {
    pub mv: M,
    pub score: Score,
}

/// Strategy for picking an improving move from a neighborhood.
///
/// All strategies maximize and only ever return moves that strictly
/// improve on the current score.
///
/// # Examples
///
/// ```
/// use u_localsearch::neighborhood::Exploration;
///
/// // Exhaustive, deterministic
/// let best = Exploration::BestImprovement;
///
/// // Bounded cost per step on a large neighborhood
/// let sampled = Exploration::RandomSelection { samples: 50 };
/// assert!(sampled.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exploration {
    /// Streams the neighborhood through the generator cursor and stops at
    /// the first improving move.
    #[default]
    FirstImprovement,

    /// Scores the whole neighborhood and returns the strictly best improving
    /// move. Ties go to the move enumerated first.
    ///
    /// With the `parallel` feature the moves are scored with rayon.
    BestImprovement,

    /// Draws up to `samples` distinct random moves and returns the best
    /// improving one among them.
    RandomSelection { samples: usize },

    /// Draws up to `samples` random moves and returns the first improving one.
    RandomScan { samples: usize },
}

impl Exploration {
    /// Validates the sampling budget.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Exploration::RandomSelection { samples: 0 }
            | Exploration::RandomScan { samples: 0 } => Err(Error::InvalidConfig(
                "exploration samples must be positive".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Picks an improving move for `current`, or `None` if this strategy
    /// finds none.
    ///
    /// `current` is only touched to fill its evaluation cache.
    pub fn select<E, G, R>(
        &self,
        evaluator: &E,
        generator: &mut G,
        current: &mut E::Solution,
        rng: &mut R,
    ) -> Option<Selected<G::Move>>
    where
        E: Evaluator,
        G: MoveGenerator<E>,
        R: Rng,
    {
        let base = evaluator.evaluation(current);
        let current = &*current;

        match *self {
            Exploration::FirstImprovement => {
                generator.reset();
                while let Some(mv) = generator.next_move() {
                    let score = mv.score_after(evaluator, current);
                    if score > base {
                        return Some(Selected { mv, score });
                    }
                }
                None
            }

            Exploration::BestImprovement => {
                let moves = generator.all_moves(current);
                let scores = score_all(evaluator, &moves, current);
                best_improving(moves.into_iter().zip(scores), base)
            }

            Exploration::RandomSelection { samples } => {
                let limit = samples.min(generator.neighborhood_size());
                let mut seen = HashSet::with_capacity(limit);
                let mut drawn = Vec::with_capacity(limit);
                while seen.len() < limit {
                    let Some(mv) = generator.random_move(rng) else {
                        break;
                    };
                    if seen.insert(mv.clone()) {
                        let score = mv.score_after(evaluator, current);
                        drawn.push((mv, score));
                    }
                }
                best_improving(drawn, base)
            }

            Exploration::RandomScan { samples } => {
                for _ in 0..samples {
                    let mv = generator.random_move(rng)?;
                    let score = mv.score_after(evaluator, current);
                    if score > base {
                        return Some(Selected { mv, score });
                    }
                }
                None
            }
        }
    }
}

/// First strictly best candidate above `base`.
fn best_improving<M, I>(candidates: I, base: Score) -> Option<Selected<M>>
where
    I: IntoIterator<Item = (M, Score)>,
{
    let mut best: Option<Selected<M>> = None;
    for (mv, score) in candidates {
        let bar = best.as_ref().map_or(base, |b| b.score);
        if score > bar {
            best = Some(Selected { mv, score });
        }
    }
    best
}

#[cfg(not(feature = "parallel"))]
fn score_all<E, M>(evaluator: &E, moves: &[M], current: &E::Solution) -> Vec<Score>
where
    E: Evaluator,
    M: Move<E>,
{
    moves
        .iter()
        .map(|mv| mv.score_after(evaluator, current))
        .collect()
}

#[cfg(feature = "parallel")]
fn score_all<E, M>(evaluator: &E, moves: &[M], current: &E::Solution) -> Vec<Score>
where
    E: Evaluator,
    M: Move<E>,
{
    use rayon::prelude::*;

    moves
        .par_iter()
        .map(|mv| mv.score_after(evaluator, current))
        .collect()
}
