use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use minegrid_core::{
    CellCount, Coord, MarkOutcome, Placement, RandomGenerator, RevealOutcome, Session, Settings,
};

mod clock;
mod command;
mod render;
mod store;

use clock::Stopwatch;
use command::{Command, HELP};
use store::FileStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    fn settings(self) -> Settings {
        match self {
            Self::Beginner => Settings::beginner(),
            Self::Intermediate => Settings::intermediate(),
            Self::Expert => Settings::expert(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PlacementArg {
    Rejection,
    Shuffle,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Rejection => Placement::Rejection,
            PlacementArg::Shuffle => Placement::Shuffle,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, individual values can be overridden below
    #[arg(short, long, value_enum, default_value_t = Difficulty::Beginner)]
    difficulty: Difficulty,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    columns: Option<Coord>,

    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How mines are placed on the board
    #[arg(long, value_enum, default_value_t = PlacementArg::Rejection)]
    placement: PlacementArg,

    /// Keep the game in this file and resume it on the next start
    #[arg(long)]
    save: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> minegrid_core::Result<Settings> {
        let preset = self.difficulty.settings();
        Settings::new(
            self.rows.unwrap_or(preset.rows()),
            self.columns.unwrap_or(preset.columns()),
            self.mines.unwrap_or(preset.mines()),
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = args.settings()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);
    let generator = RandomGenerator::with_placement(seed, args.placement.into());

    let mut session = match &args.save {
        Some(path) => Session::resume(settings, generator, Box::new(FileStore::new(path))),
        None => Session::new(settings, generator),
    };

    println!(
        "Minesweeper {}x{} with {} mines (seed {})",
        settings.columns(),
        settings.rows(),
        settings.mines(),
        seed
    );
    println!("{HELP}");

    play(&mut session, io::stdin().lock(), io::stdout())
}

fn play(session: &mut Session, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    let mut stopwatch = Stopwatch::default();
    stopwatch.sync(&session.summary());
    let mut lines = input.lines();

    loop {
        let summary = session.summary();
        writeln!(output, "\n{}", render::render_grid(session))?;
        writeln!(output, "{}", render::render_status(&summary, &stopwatch.display()))?;
        if summary.status.is_finished() {
            writeln!(output, "Type 'n' for a new game or 'q' to quit.")?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match command::parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "{}", err)?;
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::NewGame => {
                session.new_game();
                stopwatch.reset();
                continue;
            }
            Command::Reveal(coords) => session.reveal(coords).map(RevealOutcome::has_update),
            Command::Flag(coords) => session.toggle_flag(coords).map(MarkOutcome::has_update),
        };

        match result {
            Ok(updated) => log::trace!("{:?} changed board: {}", command, updated),
            Err(err) => writeln!(output, "{}", err)?,
        }
        stopwatch.sync(&session.summary());
    }

    Ok(())
}
