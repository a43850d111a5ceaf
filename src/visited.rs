use std::collections::BTreeSet;

use crate::puzzle::PuzzleState;

/// Committed states in the order they were chosen. Once the goal is reached this is the
/// solution trace.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    order: Vec<PuzzleState>,
    seen: BTreeSet<Vec<u32>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends `state` unless an equal board was already committed.
    pub fn push(&mut self, state: PuzzleState) -> bool {
        if !self.seen.insert(state.tiles().to_vec()) {
            return false;
        }
        self.order.push(state);
        true
    }

    /// Cuts the committed order back so it ends at `state`, returning that entry. Boards
    /// after it leave the order but stay members. `None` if `state` is not in the order.
    pub fn rewind_to(&mut self, state: &PuzzleState) -> Option<&PuzzleState> {
        let index = self.order.iter().position(|s| s == state)?;
        self.order.truncate(index + 1);
        self.order.last()
    }

    /// Whether `state` was ever committed, including boards cut off by `rewind_to`.
    pub fn contains(&self, state: &PuzzleState) -> bool {
        self.seen.contains(state.tiles())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn last(&self) -> Option<&PuzzleState> {
        self.order.last()
    }

    pub fn as_slice(&self) -> &[PuzzleState] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<PuzzleState> {
        self.order
    }
}

impl FromIterator<PuzzleState> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = PuzzleState>>(iter: I) -> Self {
        let mut visited = VisitedSet::new();
        for state in iter {
            visited.push(state);
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_commit_order_without_duplicates() {
        let a: PuzzleState = "1 2 3 0".parse().unwrap();
        let b: PuzzleState = "1 2 0 3".parse().unwrap();
        let a_again = PuzzleState::new(vec![1, 2, 3, 0], 5).unwrap();

        let mut visited = VisitedSet::new();
        assert!(visited.push(a.clone()));
        assert!(visited.push(b.clone()));
        assert!(!visited.push(a_again));

        assert_eq!(visited.len(), 2);
        assert_eq!(visited.as_slice(), &[a.clone(), b.clone()]);
        assert_eq!(visited.last(), Some(&b));
        assert_eq!(visited.as_slice()[0].depth(), 0);
        assert!(visited.contains(&a));
        assert!(!visited.contains(&"0 2 3 1".parse().unwrap()));
    }

    #[test]
    fn rewind_keeps_cut_boards_closed() {
        let mut visited: VisitedSet = ["1 2 3 0", "1 2 0 3", "0 2 1 3"]
            .iter()
            .enumerate()
            .map(|(depth, text)| {
                let tiles = text.parse::<PuzzleState>().unwrap().tiles().to_vec();
                PuzzleState::new(tiles, depth).unwrap()
            })
            .collect();

        let back_to: PuzzleState = "1 2 0 3".parse().unwrap();
        let entry = visited.rewind_to(&back_to).unwrap();
        assert_eq!(entry.depth(), 1);

        assert_eq!(visited.len(), 2);
        assert_eq!(visited.last(), Some(&back_to));
        assert!(visited.contains(&"0 2 1 3".parse().unwrap()));
        assert!(!visited.push("0 2 1 3".parse().unwrap()));
        assert!(visited.rewind_to(&"0 2 1 3".parse().unwrap()).is_none());
    }

    #[test]
    fn collects_from_iterator() {
        let visited: VisitedSet = ["1 2 3 0", "1 2 0 3", "1 2 3 0"]
            .iter()
            .map(|text| text.parse::<PuzzleState>().unwrap())
            .collect();
        assert_eq!(visited.len(), 2);
        assert!(!visited.is_empty());
        assert_eq!(visited.into_vec().len(), 2);
    }
}
