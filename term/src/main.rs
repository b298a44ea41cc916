use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{Coord, CellCount, Difficulty, GameConfig, Placement};
use tracing_subscriber::filter::LevelFilter;

use crate::command::{Command, HELP};
use crate::render::Screen;
use crate::session::{Reply, Session};

mod command;
mod render;
mod session;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum DifficultyArg {
    /// 9x9, 10 mines
    Beginner,
    /// 16x16, 40 mines
    Intermediate,
    /// 16x30, 99 mines
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum PlacementArg {
    /// Mines are laid out before the first move
    Eager,
    /// The first reveal always opens an empty area
    SafeFirstClick,
}

impl From<PlacementArg> for Placement {
    fn from(value: PlacementArg) -> Self {
        match value {
            PlacementArg::Eager => Placement::Eager,
            PlacementArg::SafeFirstClick => Placement::SafeFirstClick,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Preset board, ignored when a custom size is given
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Beginner)]
    difficulty: DifficultyArg,

    /// Custom board rows (1-24)
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns (1-30)
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count, clamped to what the placement policy can fit
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// When mines get placed
    #[arg(short, long, value_enum, default_value_t = PlacementArg::SafeFirstClick)]
    placement: PlacementArg,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => {
                GameConfig::custom(rows, cols, mines, self.placement.into())
            }
            _ => Difficulty::from(self.difficulty).config(),
        }
    }
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = args.game_config();
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Starting {}x{} board with {} mines (seed: {})",
        config.rows(),
        config.cols(),
        config.mines,
        seed
    );

    let mut session = Session::new(config, args.placement.into(), seed)
        .context("Could not set up the board")?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", Screen::new(session.board(), session.elapsed()))?;
    writeln!(stdout, "Type `h` for help.")?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => match session.apply(command)? {
                Reply::Redraw => write!(stdout, "{}", Screen::new(session.board(), session.elapsed()))?,
                Reply::Unchanged => writeln!(stdout, "Nothing happened.")?,
                Reply::Help => writeln!(stdout, "{HELP}")?,
                Reply::Quit => break,
            },
            Err(err) => writeln!(stdout, "{err}")?,
        }
        stdout.flush()?;
    }

    Ok(())
}
