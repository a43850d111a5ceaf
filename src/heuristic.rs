use std::fmt;

use crate::puzzle::PuzzleState;

/// Estimate of the remaining work from `current` to `goal`. Both boards must be the same
/// size. Implementations are pure: the same pair always scores the same.
pub trait Heuristic {
    fn name(&self) -> &'static str;
    fn score(&self, current: &PuzzleState, goal: &PuzzleState) -> usize;
}

/// Number of cells (blank included) holding a different tile than the goal, plus depth.
#[derive(Debug, Default, Clone, Copy)]
pub struct TileDisplacementCount;

impl Heuristic for TileDisplacementCount {
    fn name(&self) -> &'static str {
        "tile displacement count"
    }

    fn score(&self, current: &PuzzleState, goal: &PuzzleState) -> usize {
        let misplaced = current
            .tiles()
            .iter()
            .zip(goal.tiles())
            .filter(|(c, g)| c != g)
            .count();
        misplaced + current.depth()
    }
}

/// Rough row plus column travel of the misplaced tiles, measured in both directions, plus
/// depth.
///
/// Travel is taken from the linear distance between a tile and the next cell after it
/// where the other board holds the same tile, split as `d / side + d % side`. Tiles whose
/// counterpart sits earlier in the array add nothing. This is not Manhattan distance.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalTravelEstimate;

impl Heuristic for PositionalTravelEstimate {
    fn name(&self) -> &'static str {
        "positional travel estimate"
    }

    fn score(&self, current: &PuzzleState, goal: &PuzzleState) -> usize {
        let side = current.side();
        forward_travel(current.tiles(), goal.tiles(), side)
            + forward_travel(goal.tiles(), current.tiles(), side)
            + current.depth()
    }
}

fn forward_travel(from: &[u32], to: &[u32], side: usize) -> usize {
    let mut total = 0;

    for (i, &tile) in from.iter().enumerate() {
        if tile == 0 || to.get(i) == Some(&tile) {
            continue;
        }
        let ahead = to.get(i + 1..).unwrap_or(&[]);
        if let Some(offset) = ahead.iter().position(|&t| t == tile) {
            let distance = offset + 1;
            total += distance / side + distance % side;
        }
    }
    total
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ArgEnum)]
pub enum HeuristicKind {
    Displacement,
    Travel,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Displacement => Box::new(TileDisplacementCount),
            HeuristicKind::Travel => Box::new(PositionalTravelEstimate),
        }
    }
}

impl Default for HeuristicKind {
    fn default() -> Self {
        HeuristicKind::Travel
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.build().name())
    }
}
