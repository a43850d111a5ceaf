use rand::{seq::SliceRandom, Rng};
use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{SearchError, SearchResult};

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    North,
    East,
    West,
    South,
}

impl Move {
    // Generation order of successors.
    pub const ALL: [Move; 4] = [Move::North, Move::East, Move::West, Move::South];

    /// Index the blank at `blank` lands on after this move, or `None` if the move would
    /// push it off a board of the given side length.
    pub fn target(&self, blank: usize, side: usize) -> Option<usize> {
        match self {
            Move::North => blank.checked_sub(side),
            Move::East => (blank % side + 1 < side).then(|| blank + 1),
            Move::West => (blank % side >= 1).then(|| blank - 1),
            Move::South => (blank + side < side * side).then(|| blank + side),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::North => "North",
            Move::East => "East",
            Move::West => "West",
            Move::South => "South",
        };
        write!(f, "{}", s)
    }
}

/// One board configuration and the depth it was reached at.
///
/// Identity is the tile sequence alone: two states holding the same tiles are equal and
/// order the same no matter their depth or cached score.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    tiles: Vec<u32>,
    side: usize,
    depth: usize,
    score: OnceCell<usize>,
}

impl PuzzleState {
    pub fn new(tiles: Vec<u32>, depth: usize) -> SearchResult<Self> {
        let side = check_tiles(&tiles)?;
        Ok(Self::from_valid(tiles, side, depth))
    }

    // Caller guarantees `tiles` is a permutation of `0..side * side`.
    pub(crate) fn from_valid(tiles: Vec<u32>, side: usize, depth: usize) -> Self {
        Self {
            tiles,
            side,
            depth,
            score: OnceCell::new(),
        }
    }

    /// The board with tiles `1..L-1` in reading order and the blank last.
    pub fn ordered(side: usize) -> SearchResult<Self> {
        if side == 0 {
            return Err(SearchError::InvariantViolation(
                "a board needs at least one cell".to_string(),
            ));
        }
        let len = side * side;
        let tiles = (1..len as u32).chain(std::iter::once(0)).collect();
        Ok(Self::from_valid(tiles, side, 0))
    }

    /// A random start at depth 0 from which `goal` is reachable.
    pub fn shuffled_towards<R: Rng + ?Sized>(goal: &PuzzleState, rng: &mut R) -> Self {
        let mut tiles = goal.tiles.clone();

        loop {
            tiles.shuffle(rng);
            let candidate = Self::from_valid(tiles.clone(), goal.side, 0);
            if candidate.is_solvable_towards(goal) {
                return candidate;
            }
        }
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn blank_position(&self) -> SearchResult<usize> {
        self.tiles.iter().position(|&t| t == 0).ok_or_else(|| {
            SearchError::InvariantViolation(format!("no blank tile in {:?}", self.tiles))
        })
    }

    pub fn score(&self) -> Option<usize> {
        self.score.get().copied()
    }

    /// Commits `score` if none is cached yet. Returns whether it was committed.
    pub fn set_score(&self, score: usize) -> bool {
        self.score.set(score).is_ok()
    }

    pub fn score_or_compute<F: FnOnce() -> usize>(&self, compute: F) -> usize {
        *self.score.get_or_init(compute)
    }

    /// Direction the blank slid to turn `self` into `next`, if they are one move apart.
    pub fn move_towards(&self, next: &PuzzleState) -> Option<Move> {
        if self.side != next.side {
            return None;
        }
        let from = self.blank_position().ok()?;
        let to = next.blank_position().ok()?;

        let mut tiles = self.tiles.clone();
        tiles.swap(from, to);
        if tiles != next.tiles {
            return None;
        }
        Move::ALL
            .into_iter()
            .find(|dir| dir.target(from, self.side) == Some(to))
    }

    pub fn is_solvable_towards(&self, goal: &PuzzleState) -> bool {
        if self.side != goal.side {
            return false;
        }
        match (self.parity(), goal.parity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    // Inversion parity, plus the blank row on even sides. Sliding never changes it.
    fn parity(&self) -> Option<usize> {
        let inversions = count_inversions(&self.tiles);

        if self.side % 2 == 1 {
            Some(inversions % 2)
        } else {
            let blank_row = self.blank_position().ok()? / self.side;
            Some((inversions + blank_row) % 2)
        }
    }
}

fn count_inversions(tiles: &[u32]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

fn exact_side(len: usize) -> Option<usize> {
    let side = (len as f64).sqrt().round() as usize;
    (side > 0 && side * side == len).then(|| side)
}

fn check_tiles(tiles: &[u32]) -> SearchResult<usize> {
    let side = exact_side(tiles.len()).ok_or_else(|| {
        SearchError::InvariantViolation(format!(
            "{} tiles do not form a square board",
            tiles.len()
        ))
    })?;

    let mut seen = vec![false; tiles.len()];
    for &tile in tiles {
        match seen.get_mut(tile as usize) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(SearchError::InvariantViolation(format!(
                    "tile {} appears more than once",
                    tile
                )))
            }
            None => {
                return Err(SearchError::InvariantViolation(format!(
                    "tile {} is out of range for a {}x{} board",
                    tile, side, side
                )))
            }
        }
    }
    Ok(side)
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for PuzzleState {}

impl Hash for PuzzleState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tiles.hash(state);
    }
}

impl PartialOrd for PuzzleState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PuzzleState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tiles.cmp(&other.tiles)
    }
}

impl FromStr for PuzzleState {
    type Err = SearchError;

    /// Parses whitespace or comma separated tile numbers into a depth 0 board.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u32>().map_err(|_| {
                    SearchError::InvariantViolation(format!("'{}' is not a tile number", token))
                })
            })
            .collect::<SearchResult<Vec<u32>>>()?;

        Self::new(tiles, 0)
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len().saturating_sub(1)).to_string().len();

        for (row_index, row) in self.tiles.chunks(self.side.max(1)).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for &val in row {
                write!(f, " {:>width$} |", val, width = width)?;
            }
        }
        Ok(())
    }
}
