use log::debug;

use crate::error::SearchResult;
use crate::heuristic::Heuristic;
use crate::moves::next_states;
use crate::puzzle::PuzzleState;
use crate::visited::VisitedSet;

/// Candidate next states at one decision point, rebuilt from scratch after every choice.
#[derive(Debug, Clone)]
pub struct Frontier {
    candidates: Vec<PuzzleState>,
    depth: usize,
    ranked: bool,
}

impl Frontier {
    pub fn empty(depth: usize) -> Self {
        Self {
            candidates: Vec::new(),
            depth,
            ranked: false,
        }
    }

    /// Successors of `from` at `depth` that have not been committed yet.
    pub fn expand(from: &PuzzleState, depth: usize, visited: &VisitedSet) -> SearchResult<Self> {
        let candidates = next_states(from, depth)?
            .into_iter()
            .filter(|state| !visited.contains(state))
            .collect();

        Ok(Self {
            candidates,
            depth,
            ranked: false,
        })
    }

    /// Scores every candidate that has no cached score yet and sorts ascending by
    /// `depth + score`, ties going to the lower board in tile order.
    pub fn rank(&mut self, heuristic: &dyn Heuristic, goal: &PuzzleState) {
        for state in &self.candidates {
            state.score_or_compute(|| heuristic.score(state, goal));
        }
        self.candidates
            .sort_by(|a, b| priority(a).cmp(&priority(b)).then_with(|| a.cmp(b)));
        self.ranked = true;

        debug!(
            "ranked {} candidates at depth {} with {}: best priority {:?}",
            self.candidates.len(),
            self.depth,
            heuristic.name(),
            self.candidates.first().map(priority)
        );
    }

    pub fn is_ranked(&self) -> bool {
        self.ranked
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PuzzleState> {
        self.candidates.get(index)
    }

    pub fn position(&self, board: &PuzzleState) -> Option<usize> {
        self.candidates.iter().position(|state| state == board)
    }

    pub fn as_slice(&self) -> &[PuzzleState] {
        &self.candidates
    }
}

// Both heuristics already fold depth into the score, so depth counts twice here. Every
// candidate of one frontier shares a depth, which keeps the order unchanged.
pub fn priority(state: &PuzzleState) -> usize {
    state.depth() + state.score().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{PositionalTravelEstimate, TileDisplacementCount};
    use std::cell::Cell;

    fn board(text: &str) -> PuzzleState {
        text.parse().unwrap()
    }

    struct CountingHeuristic {
        calls: Cell<usize>,
    }

    impl Heuristic for CountingHeuristic {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn score(&self, _current: &PuzzleState, _goal: &PuzzleState) -> usize {
            self.calls.set(self.calls.get() + 1);
            0
        }
    }

    #[test]
    fn expansion_skips_visited_boards() {
        let from = board("1 2 3 4 0 5 6 7 8");
        let visited: VisitedSet = [board("1 0 3 4 2 5 6 7 8"), board("1 2 3 0 4 5 6 7 8")]
            .into_iter()
            .collect();

        let frontier = Frontier::expand(&from, 2, &visited).unwrap();
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.depth(), 2);
        assert!(frontier.as_slice().iter().all(|s| !visited.contains(s)));
        assert!(!frontier.is_ranked());
    }

    #[test]
    fn ranks_by_displacement() {
        let goal = board("1 2 3 4 5 6 7 8 0");
        let mut frontier =
            Frontier::expand(&board("2 4 3 1 0 6 7 5 8"), 1, &VisitedSet::new()).unwrap();
        frontier.rank(&TileDisplacementCount, &goal);

        let ranked: Vec<(&[u32], Option<usize>)> = frontier
            .as_slice()
            .iter()
            .map(|s| (s.tiles(), s.score()))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (&[2, 4, 3, 1, 5, 6, 7, 0, 8][..], Some(6)),
                (&[2, 0, 3, 1, 4, 6, 7, 5, 8][..], Some(7)),
                (&[2, 4, 3, 0, 1, 6, 7, 5, 8][..], Some(7)),
                (&[2, 4, 3, 1, 6, 0, 7, 5, 8][..], Some(8)),
            ]
        );
        assert!(frontier.is_ranked());
    }

    #[test]
    fn ties_go_to_lower_board() {
        let goal = board("1 2 3 4 5 6 7 8 0");
        let mut frontier =
            Frontier::expand(&board("2 4 3 1 0 6 7 5 8"), 1, &VisitedSet::new()).unwrap();
        frontier.rank(&PositionalTravelEstimate, &goal);

        assert_eq!(frontier.get(0).unwrap().tiles(), &[2, 0, 3, 1, 4, 6, 7, 5, 8]);
        assert_eq!(frontier.get(1).unwrap().tiles(), &[2, 4, 3, 1, 5, 6, 7, 0, 8]);
        assert_eq!(frontier.get(0).unwrap().score(), frontier.get(1).unwrap().score());
    }

    #[test]
    fn cached_scores_are_not_recomputed() {
        let goal = board("1 2 3 4 5 6 7 8 0");
        let mut frontier =
            Frontier::expand(&board("1 2 3 4 0 5 6 7 8"), 1, &VisitedSet::new()).unwrap();
        frontier.get(0).unwrap().set_score(40);

        let counting = CountingHeuristic { calls: Cell::new(0) };
        frontier.rank(&counting, &goal);
        frontier.rank(&counting, &goal);

        assert_eq!(counting.calls.get(), 3);
        assert_eq!(frontier.get(3).unwrap().score(), Some(40));
        assert_eq!(frontier.position(&board("1 0 3 4 2 5 6 7 8")), Some(3));
    }
}
