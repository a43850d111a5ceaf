pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod moves;
pub mod puzzle;
pub mod render;
pub mod search;
pub mod select;
pub mod visited;

pub use error::{SearchError, SearchResult};
pub use heuristic::{Heuristic, HeuristicKind, PositionalTravelEstimate, TileDisplacementCount};
pub use puzzle::{Move, PuzzleState};
pub use search::{SearchDriver, SearchOptions, SearchOutcome, SearchStatus};
pub use select::{AutoSelector, ScriptedSelector, Selection, Selector, StepView, TerminalSelector};
