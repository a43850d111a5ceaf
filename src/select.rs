use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};

use crate::error::SearchResult;
use crate::puzzle::PuzzleState;
use crate::render;

/// What the collaborator picked from the offered frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the ranked candidates.
    Index(usize),
    Board(PuzzleState),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Index(index) => write!(f, "candidate #{}", index + 1),
            Selection::Board(board) => write!(f, "board {:?}", board.tiles()),
        }
    }
}

/// Everything a collaborator is shown before choosing.
#[derive(Debug, Clone, Copy)]
pub struct StepView<'a> {
    pub current: &'a PuzzleState,
    pub goal: &'a PuzzleState,
    pub depth: usize,
    pub heuristic: &'static str,
    pub candidates: &'a [PuzzleState],
}

pub trait Selector {
    /// Picks the next state. `None` means the collaborator gives up on this search.
    fn select(&mut self, view: &StepView<'_>) -> SearchResult<Option<Selection>>;
}

/// Always takes the best ranked candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoSelector;

impl Selector for AutoSelector {
    fn select(&mut self, _view: &StepView<'_>) -> SearchResult<Option<Selection>> {
        Ok(Some(Selection::Index(0)))
    }
}

/// Replays a fixed list of choices, then gives up.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSelector {
    choices: VecDeque<Selection>,
}

impl ScriptedSelector {
    pub fn new<I: IntoIterator<Item = Selection>>(choices: I) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.choices.len()
    }
}

impl Selector for ScriptedSelector {
    fn select(&mut self, _view: &StepView<'_>) -> SearchResult<Option<Selection>> {
        Ok(self.choices.pop_front())
    }
}

/// Shows the frontier on `output` and reads the answer from `input`: a 1-based candidate
/// number, a full board, or `q` to quit.
pub struct TerminalSelector<R, W> {
    input: R,
    output: W,
}

impl TerminalSelector<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, count: usize) -> io::Result<()> {
        queue!(
            self.output,
            PrintStyledContent(format!("Choose next state [1-{}], a board, or q: ", count).bold())
        )?;
        self.output.flush()
    }

    fn complain(&mut self, message: &str) -> io::Result<()> {
        queue!(
            self.output,
            PrintStyledContent(message.red()),
            Print("\n")
        )?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Selector for TerminalSelector<R, W> {
    fn select(&mut self, view: &StepView<'_>) -> SearchResult<Option<Selection>> {
        render::write_step(&mut self.output, view)?;

        loop {
            self.prompt(view.candidates.len())?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let answer = line.trim();

            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            if answer.split_whitespace().count() > 1 {
                match answer.parse::<PuzzleState>() {
                    Ok(board) => return Ok(Some(Selection::Board(board))),
                    Err(e) => self.complain(&e.to_string())?,
                }
                continue;
            }
            match answer.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) => return Ok(Some(Selection::Index(index))),
                None => self.complain(&format!("'{}' is not a candidate number", answer))?,
            }
        }
    }
}
