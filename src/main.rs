use std::io;

use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};
use rand::thread_rng;

use slider_search::{render, HeuristicKind, PuzzleState, SearchDriver, SearchOptions};

#[derive(Parser, Debug)]
#[clap(name = "slider-search")]
struct Opts {
    /// Start board, tiles in reading order with 0 as the blank.
    #[clap(long, default_value = "0 1 3 4 5 2 6 8 9 10 7 11 13 14 15 12")]
    start: String,

    /// Goal board. Defaults to 1..L-1 followed by the blank.
    #[clap(long)]
    goal: Option<String>,

    /// Ignore --start and shuffle a random start that can reach the goal.
    #[clap(long)]
    shuffle: bool,

    /// Side length of the shuffled board. The goal fixes the size when given.
    #[clap(short = 'n', long, requires = "shuffle", conflicts_with = "goal")]
    size: Option<usize>,

    #[clap(long, arg_enum, default_value = "travel")]
    heuristic: HeuristicKind,

    /// Always take the best ranked state instead of asking.
    #[clap(long)]
    auto: bool,

    #[clap(long, default_value = "10000")]
    max_steps: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    let (start, goal) = boards(&opts)?;
    if !start.is_solvable_towards(&goal) {
        warn!("goal cannot be reached from this start; expect a dead end");
    }

    let options = SearchOptions {
        automated: opts.auto,
        heuristic: opts.heuristic,
        max_steps: Some(opts.max_steps),
    };
    let mode = if options.automated { "automated" } else { "interactive" };
    info!("using {} in {} mode", options.heuristic, mode);

    let mut driver = SearchDriver::new(start, goal, options.heuristic.build())?;
    let outcome = driver.run(options.selector().as_mut(), options.max_steps)?;

    render::write_outcome(&mut io::stdout(), &outcome)?;
    Ok(())
}

fn boards(opts: &Opts) -> anyhow::Result<(PuzzleState, PuzzleState)> {
    let given_goal = opts
        .goal
        .as_deref()
        .map(|text| text.parse::<PuzzleState>().context("invalid goal board"))
        .transpose()?;

    if opts.shuffle {
        let goal = match given_goal {
            Some(goal) => goal,
            None => PuzzleState::ordered(opts.size.unwrap_or(4))?,
        };
        let start = PuzzleState::shuffled_towards(&goal, &mut thread_rng());
        println!("Shuffled start:\n{}\n", start);
        return Ok((start, goal));
    }

    let start: PuzzleState = opts.start.parse().context("invalid start board")?;
    let goal = match given_goal {
        Some(goal) => goal,
        None => PuzzleState::ordered(start.side())?,
    };
    if start.tiles().len() != goal.tiles().len() {
        bail!(
            "board sizes don't match: start has {} tiles, goal has {}",
            start.tiles().len(),
            goal.tiles().len()
        );
    }
    Ok((start, goal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Opts, clap::Error> {
        Opts::try_parse_from(["slider-search"].iter().chain(args))
    }

    #[test]
    fn size_only_goes_with_a_shuffle_and_no_goal() {
        assert!(parse(&["--shuffle", "--goal", "1 2 3 0", "-n", "3"]).is_err());
        assert!(parse(&["-n", "3"]).is_err());

        let opts = parse(&["--shuffle", "-n", "3"]).unwrap();
        let (start, goal) = boards(&opts).unwrap();
        assert_eq!(goal, PuzzleState::ordered(3).unwrap());
        assert!(start.is_solvable_towards(&goal));

        let opts = parse(&["--shuffle", "--goal", "1 2 3 0"]).unwrap();
        let (start, goal) = boards(&opts).unwrap();
        assert_eq!(start.side(), 2);
        assert_eq!(goal.tiles(), &[1, 2, 3, 0]);
    }
}
