//! Core traits shared by every search algorithm.

use super::score::Score;
use rand::Rng;
use std::hash::Hash;

/// Objective function plus feasibility rule for one problem domain.
///
/// The evaluator owns the immutable problem data. Solutions carry their own
/// evaluation cache, which [`Evaluator::evaluation`] fills on demand.
pub trait Evaluator: Send + Sync {
    /// Candidate solution type.
    type Solution: Clone + Send + Sync;

    /// Scores a solution from scratch. Pure; ignores any cached value.
    fn evaluate(&self, solution: &Self::Solution) -> Score;

    /// Returns the cached score, computing it with a full scan only when the
    /// solution's cache is invalid.
    fn evaluation(&self, solution: &mut Self::Solution) -> Score;
}

/// An atomic transformation of a solution.
///
/// A move only stores the positions it touches, so the same value can be
/// applied to any solution of matching size.
pub trait Move<E: Evaluator>: Clone + Eq + Hash + Send + Sync {
    /// Applies the move in place, keeping a valid cache valid.
    fn apply(&self, evaluator: &E, solution: &mut E::Solution);

    /// Returns a moved copy, leaving `solution` untouched.
    fn moved(&self, evaluator: &E, solution: &E::Solution) -> E::Solution {
        let mut next = solution.clone();
        self.apply(evaluator, &mut next);
        next
    }

    /// Score the solution would have after this move, without applying it.
    ///
    /// Cheap when the solution's cache is valid.
    fn score_after(&self, evaluator: &E, solution: &E::Solution) -> Score;
}

/// Defines the neighborhood of a solution.
///
/// Three access patterns are offered: the whole neighborhood at once
/// ([`all_moves`](MoveGenerator::all_moves)), one uniform draw
/// ([`random_move`](MoveGenerator::random_move)), and a resettable cursor
/// ([`has_next`](MoveGenerator::has_next), [`next_move`](MoveGenerator::next_move),
/// [`reset`](MoveGenerator::reset)). The cursor is the only mutable state,
/// so a generator can be reused across runs but not driven by two searches
/// at once.
pub trait MoveGenerator<E: Evaluator> {
    /// Move type produced by this generator.
    type Move: Move<E>;

    /// Every move of the neighborhood, in enumeration order.
    fn all_moves(&self, solution: &E::Solution) -> Vec<Self::Move>;

    /// Draws one move at random. `None` only for an empty neighborhood.
    fn random_move<R: Rng>(&self, rng: &mut R) -> Option<Self::Move>;

    /// Whether the cursor has moves left in the current pass.
    fn has_next(&self) -> bool;

    /// Yields the move under the cursor and advances it.
    fn next_move(&mut self) -> Option<Self::Move>;

    /// Rewinds the cursor to the first move.
    fn reset(&mut self);

    /// Number of distinct moves in the neighborhood.
    fn neighborhood_size(&self) -> usize;
}

/// Builds an initial solution.
///
/// `alpha` is the greediness factor in `[0, 1]` (0 = fully greedy,
/// 1 = fully random); methods without a random component ignore it, as do
/// deterministic methods for `time_limit` (seconds).
pub trait Construction<E: Evaluator> {
    fn construct<R: Rng>(
        &self,
        evaluator: &E,
        time_limit: f64,
        alpha: f64,
        rng: &mut R,
    ) -> E::Solution;
}
