use log::{debug, info, warn};

use crate::error::{SearchError, SearchResult};
use crate::frontier::Frontier;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::puzzle::PuzzleState;
use crate::select::{AutoSelector, Selection, Selector, StepView, TerminalSelector};
use crate::visited::VisitedSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Frontier generated but not ranked yet.
    AwaitingSelection,
    /// Every candidate scored and sorted, ready for a choice.
    Scored,
    GoalReached,
    /// The last committed state had no unvisited successor.
    DeadEnd,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::GoalReached | SearchStatus::DeadEnd)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every committed board from the start to the goal, in order.
    GoalReached { trace: Vec<PuzzleState> },
    DeadEnd {
        depth: usize,
        visited: Vec<PuzzleState>,
    },
    /// The caller stopped stepping before a terminal state.
    Stopped {
        depth: usize,
        visited: Vec<PuzzleState>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub automated: bool,
    pub heuristic: HeuristicKind,
    pub max_steps: Option<usize>,
}

impl SearchOptions {
    /// The greedy picker in automated mode, otherwise a prompt on the terminal.
    pub fn selector(&self) -> Box<dyn Selector> {
        if self.automated {
            Box::new(AutoSelector)
        } else {
            Box::new(TerminalSelector::stdio())
        }
    }
}

/// Greedy one-ply search from a start board towards a goal.
///
/// Each step ranks the frontier, commits one candidate to the visited set, and rebuilds the
/// frontier from the committed board. A board is never committed twice.
pub struct SearchDriver {
    goal: PuzzleState,
    heuristic: Box<dyn Heuristic>,
    frontier: Frontier,
    visited: VisitedSet,
    status: SearchStatus,
}

impl SearchDriver {
    pub fn new(
        start: PuzzleState,
        goal: PuzzleState,
        heuristic: Box<dyn Heuristic>,
    ) -> SearchResult<Self> {
        Self::with_visited(start, goal, heuristic, VisitedSet::new())
    }

    /// Starts from `start` treating every board in `visited` as already committed. This is
    /// how a caller retries from an earlier board after a dead end.
    ///
    /// If `start` is on the committed path, the path is cut back to it and the search goes on
    /// from that entry and its depth. The boards cut off stay closed, so they are not offered
    /// again, but they leave the trace. A board that was cut off by an earlier retry cannot
    /// be resumed from.
    pub fn with_visited(
        start: PuzzleState,
        goal: PuzzleState,
        heuristic: Box<dyn Heuristic>,
        mut visited: VisitedSet,
    ) -> SearchResult<Self> {
        let len = goal.tiles().len();
        if let Some(bad) = std::iter::once(&start)
            .chain(visited.as_slice())
            .find(|state| state.tiles().len() != len)
        {
            return Err(SearchError::InvariantViolation(format!(
                "board {:?} does not match the {}x{} goal",
                bad.tiles(),
                goal.side(),
                goal.side()
            )));
        }
        start.blank_position()?;
        goal.blank_position()?;

        info!(
            "searching from {:?} to {:?} with {}",
            start.tiles(),
            goal.tiles(),
            heuristic.name()
        );

        let start = if visited.contains(&start) {
            visited.rewind_to(&start).cloned().ok_or_else(|| {
                SearchError::InvalidSelection(format!(
                    "board {:?} was abandoned by an earlier retry",
                    start.tiles()
                ))
            })?
        } else {
            visited.push(start.clone());
            start
        };
        let mut driver = Self {
            goal,
            heuristic,
            frontier: Frontier::empty(start.depth() + 1),
            visited,
            status: SearchStatus::AwaitingSelection,
        };

        if start == driver.goal {
            info!("start board is already the goal");
            driver.status = SearchStatus::GoalReached;
        } else {
            driver.advance_from(&start)?;
        }
        Ok(driver)
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Depth of the boards in the current frontier.
    pub fn depth(&self) -> usize {
        self.frontier.depth()
    }

    pub fn goal(&self) -> &PuzzleState {
        &self.goal
    }

    pub fn heuristic(&self) -> &dyn Heuristic {
        self.heuristic.as_ref()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// The most recently committed board.
    pub fn current(&self) -> Option<&PuzzleState> {
        self.visited.last()
    }

    /// Scores and sorts the frontier if that has not happened yet this step.
    pub fn score_frontier(&mut self) -> &Frontier {
        if self.status == SearchStatus::AwaitingSelection {
            self.frontier.rank(self.heuristic.as_ref(), &self.goal);
            self.status = SearchStatus::Scored;
        }
        &self.frontier
    }

    /// Commits the selected candidate of the ranked frontier and moves to the next step.
    ///
    /// A selection outside the offered frontier fails with `InvalidSelection` and leaves the
    /// search where it was.
    pub fn choose(&mut self, selection: Selection) -> SearchResult<SearchStatus> {
        if self.status.is_terminal() {
            return Err(SearchError::InvalidSelection(format!(
                "{} offered after the search finished",
                selection
            )));
        }
        self.score_frontier();

        let index = match &selection {
            Selection::Index(index) => Some(*index).filter(|&i| i < self.frontier.len()),
            Selection::Board(board) => self.frontier.position(board),
        };
        let chosen = index
            .and_then(|i| self.frontier.get(i))
            .cloned()
            .ok_or_else(|| {
                SearchError::InvalidSelection(format!(
                    "{} is not among the {} offered at depth {}",
                    selection,
                    self.frontier.len(),
                    self.frontier.depth()
                ))
            })?;

        debug!(
            "depth {}: committing {:?} (score {:?})",
            chosen.depth(),
            chosen.tiles(),
            chosen.score()
        );
        self.visited.push(chosen.clone());

        if chosen == self.goal {
            info!(
                "goal reached at depth {} after {} boards",
                chosen.depth(),
                self.visited.len()
            );
            self.frontier = Frontier::empty(chosen.depth() + 1);
            self.status = SearchStatus::GoalReached;
        } else {
            self.advance_from(&chosen)?;
        }
        Ok(self.status)
    }

    /// One greedy step: commit the best ranked candidate.
    pub fn step_automated(&mut self) -> SearchResult<SearchStatus> {
        self.choose(Selection::Index(0))
    }

    /// Steps until the search ends, the selector gives up, or it has been asked `max_steps`
    /// times. Rejected selections are logged and asked for again, and count towards the
    /// limit.
    pub fn run(
        &mut self,
        selector: &mut dyn Selector,
        max_steps: Option<usize>,
    ) -> SearchResult<SearchOutcome> {
        let mut attempts = 0;

        while !self.status.is_terminal() {
            if max_steps.map_or(false, |limit| attempts >= limit) {
                warn!("stopping after {} selections at depth {}", attempts, self.depth());
                return Ok(self.stopped());
            }
            self.score_frontier();

            let selection = match self.current() {
                Some(current) => selector.select(&StepView {
                    current,
                    goal: &self.goal,
                    depth: self.frontier.depth(),
                    heuristic: self.heuristic.name(),
                    candidates: self.frontier.as_slice(),
                })?,
                None => None,
            };
            let Some(selection) = selection else {
                info!("selection abandoned at depth {}", self.depth());
                return Ok(self.stopped());
            };

            attempts += 1;
            match self.choose(selection) {
                Ok(_) => {}
                Err(SearchError::InvalidSelection(reason)) => warn!("{}", reason),
                Err(e) => return Err(e),
            }
        }

        Ok(self.outcome().unwrap_or_else(|| self.stopped()))
    }

    /// The terminal result, once there is one.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.status {
            SearchStatus::GoalReached => Some(SearchOutcome::GoalReached {
                trace: self.visited.as_slice().to_vec(),
            }),
            SearchStatus::DeadEnd => Some(SearchOutcome::DeadEnd {
                depth: self.depth(),
                visited: self.visited.as_slice().to_vec(),
            }),
            SearchStatus::AwaitingSelection | SearchStatus::Scored => None,
        }
    }

    fn stopped(&self) -> SearchOutcome {
        SearchOutcome::Stopped {
            depth: self.depth(),
            visited: self.visited.as_slice().to_vec(),
        }
    }

    fn advance_from(&mut self, from: &PuzzleState) -> SearchResult<()> {
        let depth = from.depth() + 1;
        self.frontier = Frontier::expand(from, depth, &self.visited)?;

        if self.frontier.is_empty() {
            info!(
                "dead end at depth {}: every successor of {:?} already visited",
                depth,
                from.tiles()
            );
            self.status = SearchStatus::DeadEnd;
        } else {
            self.status = SearchStatus::AwaitingSelection;
        }
        Ok(())
    }
}
