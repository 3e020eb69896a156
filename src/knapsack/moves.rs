//! Knapsack neighborhood operators.
//!
//! Three move families share the same index space (all pairs `i <= j`) and
//! differ only in which flags they toggle:
//!
//! | family               | effect on `[i, j]`                              |
//! |----------------------|-------------------------------------------------|
//! | `TwoFlip`            | toggles `i` and `j` (only `i` when equal)       |
//! | `IntervalFlip`       | toggles every position                          |
//! | `IntervalInversion`  | reverses the flags by swapping mirrored ends    |

use super::evaluator::KnapsackEvaluator;
use super::solution::KnapsackSolution;
use crate::model::{Move, MoveGenerator, Score};
use rand::Rng;

/// Selects a move family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    TwoFlip,
    IntervalFlip,
    IntervalInversion,
}

impl MoveKind {
    pub const ALL: [MoveKind; 3] = [
        MoveKind::TwoFlip,
        MoveKind::IntervalFlip,
        MoveKind::IntervalInversion,
    ];

    /// Builds the move of this family on `[i, j]`. Requires `i <= j`.
    pub fn build(self, i: usize, j: usize) -> KnapsackMove {
        debug_assert!(i <= j, "move bounds out of order: {i} > {j}");
        match self {
            MoveKind::TwoFlip => KnapsackMove::TwoFlip(i, j),
            MoveKind::IntervalFlip => KnapsackMove::IntervalFlip(i, j),
            MoveKind::IntervalInversion => KnapsackMove::IntervalInversion(i, j),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MoveKind::TwoFlip => "2 flip bit",
            MoveKind::IntervalFlip => "interval flip bit",
            MoveKind::IntervalInversion => "interval inversion",
        }
    }
}

/// A knapsack move. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnapsackMove {
    TwoFlip(usize, usize),
    IntervalFlip(usize, usize),
    /// True reversal of `[i, j]`: a mirrored pair is toggled only when its
    /// flags differ, unlike a variant that flips both ends unconditionally.
    IntervalInversion(usize, usize),
}

impl KnapsackMove {
    pub fn kind(&self) -> MoveKind {
        match self {
            KnapsackMove::TwoFlip(..) => MoveKind::TwoFlip,
            KnapsackMove::IntervalFlip(..) => MoveKind::IntervalFlip,
            KnapsackMove::IntervalInversion(..) => MoveKind::IntervalInversion,
        }
    }

    pub fn bounds(&self) -> (usize, usize) {
        match *self {
            KnapsackMove::TwoFlip(i, j)
            | KnapsackMove::IntervalFlip(i, j)
            | KnapsackMove::IntervalInversion(i, j) => (i, j),
        }
    }

    /// Calls `toggle` for every position whose flag this move changes on
    /// `flags`.
    fn for_each_toggle<F: FnMut(usize)>(&self, flags: &[bool], mut toggle: F) {
        match *self {
            KnapsackMove::TwoFlip(i, j) => {
                toggle(i);
                if j != i {
                    toggle(j);
                }
            }
            KnapsackMove::IntervalFlip(i, j) => (i..=j).for_each(toggle),
            KnapsackMove::IntervalInversion(i, j) => {
                for (a, b) in mirrored_pairs(i, j) {
                    if flags[a] != flags[b] {
                        toggle(a);
                        toggle(b);
                    }
                }
            }
        }
    }
}

/// Pairs `(i, j), (i + 1, j - 1), ...` up to the middle of `[i, j]`.
fn mirrored_pairs(i: usize, j: usize) -> impl Iterator<Item = (usize, usize)> {
    (i..=j).zip((i..=j).rev()).take_while(|&(a, b)| a < b)
}

impl Move<KnapsackEvaluator> for KnapsackMove {
    fn apply(&self, evaluator: &KnapsackEvaluator, solution: &mut KnapsackSolution) {
        let evaluator = Some(evaluator);
        match *self {
            KnapsackMove::TwoFlip(i, j) => {
                solution.flip(i, evaluator);
                if j != i {
                    solution.flip(j, evaluator);
                }
            }
            KnapsackMove::IntervalFlip(i, j) => {
                for k in i..=j {
                    solution.flip(k, evaluator);
                }
            }
            KnapsackMove::IntervalInversion(i, j) => {
                // pairs are disjoint, so each swap reads flags no earlier
                // swap touched
                for (a, b) in mirrored_pairs(i, j) {
                    if solution.get(a) != solution.get(b) {
                        solution.flip(a, evaluator);
                        solution.flip(b, evaluator);
                    }
                }
            }
        }
    }

    fn score_after(&self, evaluator: &KnapsackEvaluator, solution: &KnapsackSolution) -> Score {
        let flags = solution.flags();
        let mut totals = solution
            .cached_totals()
            .unwrap_or_else(|| evaluator.totals(solution));
        self.for_each_toggle(flags, |k| {
            totals = totals.toggled(evaluator, k, flags[k]);
        });
        evaluator.score_of(totals)
    }
}

/// Enumerates one move family over an instance of fixed size.
///
/// # Examples
///
/// ```
/// use u_localsearch::knapsack::{KnapsackEvaluator, KnapsackMove, KnapsackMoveGenerator, MoveKind};
/// use u_localsearch::model::MoveGenerator;
///
/// let evaluator = KnapsackEvaluator::new(3, 5, vec![1, 2, 3], vec![1, 2, 3]).unwrap();
/// let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
///
/// assert_eq!(generator.neighborhood_size(), 6);
/// assert_eq!(generator.next_move(), Some(KnapsackMove::TwoFlip(0, 0)));
/// assert_eq!(generator.next_move(), Some(KnapsackMove::TwoFlip(0, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct KnapsackMoveGenerator {
    kind: MoveKind,
    n: usize,
    cursor: (usize, usize),
}

impl KnapsackMoveGenerator {
    pub fn new(kind: MoveKind, evaluator: &KnapsackEvaluator) -> Self {
        Self {
            kind,
            n: evaluator.item_count(),
            cursor: (0, 0),
        }
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }
}

impl MoveGenerator<KnapsackEvaluator> for KnapsackMoveGenerator {
    type Move = KnapsackMove;

    fn all_moves(&self, _solution: &KnapsackSolution) -> Vec<KnapsackMove> {
        let mut moves = Vec::with_capacity(self.neighborhood_size());
        for i in 0..self.n {
            for j in i..self.n {
                moves.push(self.kind.build(i, j));
            }
        }
        moves
    }

    fn random_move<R: Rng>(&self, rng: &mut R) -> Option<KnapsackMove> {
        if self.n == 0 {
            return None;
        }
        let a = rng.random_range(0..self.n);
        let b = rng.random_range(0..self.n);
        Some(self.kind.build(a.min(b), a.max(b)))
    }

    fn has_next(&self) -> bool {
        self.cursor.0 < self.n
    }

    fn next_move(&mut self) -> Option<KnapsackMove> {
        if !self.has_next() {
            return None;
        }
        let (i, j) = self.cursor;
        self.cursor = if j + 1 == self.n { (i + 1, i + 1) } else { (i, j + 1) };
        Some(self.kind.build(i, j))
    }

    fn reset(&mut self) {
        self.cursor = (0, 0);
    }

    fn neighborhood_size(&self) -> usize {
        self.n * (self.n + 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Evaluator;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> KnapsackEvaluator {
        KnapsackEvaluator::new(5, 10, vec![10, 40, 30, 50, 35], vec![2, 4, 6, 7, 5]).unwrap()
    }

    fn flags(bits: &str) -> KnapsackSolution {
        KnapsackSolution::from_flags(bits.chars().map(|c| c == '1').collect())
    }

    fn bits(solution: &KnapsackSolution) -> String {
        solution
            .flags()
            .iter()
            .map(|&b| if b { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_two_flip() {
        let evaluator = sample();
        let s = flags("10100");
        assert_eq!(bits(&KnapsackMove::TwoFlip(0, 3).moved(&evaluator, &s)), "00110");
        assert_eq!(bits(&KnapsackMove::TwoFlip(2, 2).moved(&evaluator, &s)), "10000");
    }

    #[test]
    fn test_interval_flip() {
        let evaluator = sample();
        let s = flags("10100");
        assert_eq!(
            bits(&KnapsackMove::IntervalFlip(1, 3).moved(&evaluator, &s)),
            "11010"
        );
        assert_eq!(
            bits(&KnapsackMove::IntervalFlip(4, 4).moved(&evaluator, &s)),
            "10101"
        );
    }

    #[test]
    fn test_interval_inversion_reverses() {
        let evaluator = sample();
        let s = flags("11010");
        assert_eq!(
            bits(&KnapsackMove::IntervalInversion(0, 4).moved(&evaluator, &s)),
            "01011"
        );
        assert_eq!(
            bits(&KnapsackMove::IntervalInversion(1, 3).moved(&evaluator, &s)),
            "11010"
        );
        assert_eq!(
            bits(&KnapsackMove::IntervalInversion(0, 1).moved(&evaluator, &flags("01000"))),
            "10000"
        );
    }

    #[test]
    fn test_moved_leaves_original_untouched() {
        let evaluator = sample();
        let s = flags("10100");
        let _ = KnapsackMove::IntervalFlip(0, 4).moved(&evaluator, &s);
        assert_eq!(bits(&s), "10100");
    }

    #[test]
    fn test_all_moves_row_major() {
        let evaluator = KnapsackEvaluator::new(3, 5, vec![1; 3], vec![1; 3]).unwrap();
        let generator = KnapsackMoveGenerator::new(MoveKind::IntervalFlip, &evaluator);
        let bounds: Vec<_> = generator
            .all_moves(&KnapsackSolution::empty(3))
            .iter()
            .map(KnapsackMove::bounds)
            .collect();
        assert_eq!(bounds, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_cursor_matches_all_moves_and_resets() {
        let evaluator = sample();
        for kind in MoveKind::ALL {
            let mut generator = KnapsackMoveGenerator::new(kind, &evaluator);
            let all = generator.all_moves(&KnapsackSolution::empty(5));

            let mut streamed = Vec::new();
            while generator.has_next() {
                streamed.extend(generator.next_move());
            }
            assert_eq!(streamed, all);
            assert_eq!(streamed.len(), generator.neighborhood_size());
            assert_eq!(generator.next_move(), None);

            generator.reset();
            assert_eq!(generator.next_move(), all.first().copied());
        }
    }

    #[test]
    fn test_empty_neighborhood() {
        let evaluator = KnapsackEvaluator::new(0, 0, vec![], vec![]).unwrap();
        let mut generator = KnapsackMoveGenerator::new(MoveKind::TwoFlip, &evaluator);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(generator.all_moves(&KnapsackSolution::empty(0)).is_empty());
        assert_eq!(generator.random_move(&mut rng), None);
        assert!(!generator.has_next());
        assert_eq!(generator.next_move(), None);
    }

    #[test]
    fn test_random_move_in_range_and_ordered() {
        let evaluator = sample();
        let generator = KnapsackMoveGenerator::new(MoveKind::IntervalInversion, &evaluator);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mv = generator.random_move(&mut rng).unwrap();
            let (i, j) = mv.bounds();
            assert!(i <= j && j < 5);
            assert_eq!(mv.kind(), MoveKind::IntervalInversion);
        }
    }

    proptest! {
        #[test]
        fn prop_score_after_matches_apply(
            raw in proptest::collection::vec(any::<bool>(), 5),
            a in 0usize..5,
            b in 0usize..5,
            kind_index in 0usize..3,
            cached in any::<bool>(),
        ) {
            let evaluator = sample();
            let mut solution = KnapsackSolution::from_flags(raw);
            if cached {
                evaluator.evaluation(&mut solution);
            }
            let mv = MoveKind::ALL[kind_index].build(a.min(b), a.max(b));

            let predicted = mv.score_after(&evaluator, &solution);
            let mut applied = mv.moved(&evaluator, &solution);

            prop_assert_eq!(predicted, evaluator.evaluate(&applied));
            prop_assert_eq!(predicted, evaluator.evaluation(&mut applied));
        }

        #[test]
        fn prop_apply_updates_cache_in_place(
            raw in proptest::collection::vec(any::<bool>(), 6),
            a in 0usize..6,
            b in 0usize..6,
            kind_index in 0usize..3,
        ) {
            let evaluator =
                KnapsackEvaluator::new(6, 20, vec![4, 9, 2, 7, 5, 8], vec![3, 6, 1, 8, 4, 5])
                    .unwrap();
            let mut solution = KnapsackSolution::from_flags(raw.clone());
            evaluator.evaluation(&mut solution);
            let (i, j) = (a.min(b), a.max(b));
            let mv = MoveKind::ALL[kind_index].build(i, j);

            mv.apply(&evaluator, &mut solution);

            let mut expected = raw;
            match mv {
                KnapsackMove::TwoFlip(i, j) => {
                    expected[i] = !expected[i];
                    if j != i {
                        expected[j] = !expected[j];
                    }
                }
                KnapsackMove::IntervalFlip(i, j) => {
                    expected[i..=j].iter_mut().for_each(|f| *f = !*f);
                }
                KnapsackMove::IntervalInversion(i, j) => expected[i..=j].reverse(),
            }
            prop_assert_eq!(solution.flags(), &expected[..]);
            prop_assert!(solution.is_evaluated());
            prop_assert_eq!(solution.cached_totals(), Some(evaluator.totals(&solution)));
        }
    }
}
