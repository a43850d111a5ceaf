use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};

use crate::puzzle::PuzzleState;
use crate::search::SearchOutcome;
use crate::select::StepView;

pub fn write_step<W: Write>(out: &mut W, view: &StepView<'_>) -> io::Result<()> {
    queue!(
        out,
        PrintStyledContent("Your state".bold()),
        Print(format!("\n{}\n", view.current)),
        PrintStyledContent("End state".bold()),
        Print(format!("\n{}\n", view.goal))
    )?;

    for (index, state) in view.candidates.iter().enumerate() {
        let score = state
            .score()
            .map_or_else(|| "?".to_string(), |score| score.to_string());
        let header = format!("\n---------------(LEVEL {})---------------", view.depth);
        queue!(
            out,
            PrintStyledContent(header.dim()),
            Print(format!("\n{})\n{}\n", index + 1, state)),
            PrintStyledContent(format!("h={}", score).green()),
            Print(format!(" ({})\n", view.heuristic))
        )?;
    }
    out.flush()
}

pub fn write_trace<W: Write>(out: &mut W, trace: &[PuzzleState]) -> io::Result<()> {
    let mut previous: Option<&PuzzleState> = None;

    for state in trace {
        let label = match previous.and_then(|p| p.move_towards(state)) {
            Some(dir) => format!("depth {}: blank moves {}", state.depth(), dir),
            None => format!("depth {}", state.depth()),
        };
        queue!(
            out,
            PrintStyledContent("*****************".dim()),
            Print(format!("\n{}\n{}\n\n", label, state))
        )?;
        previous = Some(state);
    }
    out.flush()
}

pub fn write_outcome<W: Write>(out: &mut W, outcome: &SearchOutcome) -> io::Result<()> {
    match outcome {
        SearchOutcome::GoalReached { trace } => {
            queue!(
                out,
                PrintStyledContent(
                    format!("Goal reached in {} moves", trace.len().saturating_sub(1))
                        .green()
                        .bold()
                ),
                Print("\n")
            )?;
            write_trace(out, trace)
        }
        SearchOutcome::DeadEnd { depth, visited } => {
            queue!(
                out,
                PrintStyledContent(
                    format!(
                        "Dead end: no unvisited successor at depth {} after {} boards",
                        depth,
                        visited.len()
                    )
                    .red()
                    .bold()
                ),
                Print("\n")
            )?;
            out.flush()
        }
        SearchOutcome::Stopped { depth, visited } => {
            queue!(
                out,
                PrintStyledContent(
                    format!("Stopped at depth {} after {} boards", depth, visited.len()).yellow()
                ),
                Print("\n")
            )?;
            out.flush()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str, depth: usize) -> PuzzleState {
        PuzzleState::new(text.parse::<PuzzleState>().unwrap().tiles().to_vec(), depth).unwrap()
    }

    #[test]
    fn trace_labels_each_slide() {
        let trace = vec![
            board("1 2 3 4 5 6 7 0 8", 0),
            board("1 2 3 4 5 6 7 8 0", 1),
        ];
        let mut out = Vec::new();
        write_trace(&mut out, &trace).unwrap();

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("depth 0\n| 1 | 2 | 3 |"));
        assert!(shown.contains("depth 1: blank moves East"));
    }

    #[test]
    fn outcome_headline() {
        let visited = vec![board("1 2 3 0", 0)];
        let mut out = Vec::new();
        write_outcome(&mut out, &SearchOutcome::DeadEnd { depth: 1, visited }).unwrap();

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("no unvisited successor at depth 1 after 1 boards"));
    }
}
