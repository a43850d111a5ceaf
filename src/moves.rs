use log::trace;

use crate::error::SearchResult;
use crate::puzzle::{Move, PuzzleState};

/// Every board one slide of the blank away from `state`, each at `new_depth`.
///
/// A corner blank yields 2 boards, an edge blank 3 and an interior blank 4. `state` itself
/// is never returned and no board appears twice.
pub fn next_states(state: &PuzzleState, new_depth: usize) -> SearchResult<Vec<PuzzleState>> {
    let blank = state.blank_position()?;
    let side = state.side();

    let mut next: Vec<PuzzleState> = Vec::with_capacity(Move::ALL.len());
    for dir in Move::ALL {
        if let Some(target) = dir.target(blank, side) {
            let candidate = slide(state, blank, target, new_depth);
            if candidate != *state && !next.contains(&candidate) {
                next.push(candidate);
            }
        }
    }

    trace!(
        "blank at {} on {}x{} board: {} successors at depth {}",
        blank,
        side,
        side,
        next.len(),
        new_depth
    );
    Ok(next)
}

fn slide(state: &PuzzleState, blank: usize, target: usize, depth: usize) -> PuzzleState {
    let mut tiles = state.tiles().to_vec();
    tiles.swap(blank, target);
    PuzzleState::from_valid(tiles, state.side(), depth)
}
