mod config;
mod error;
mod grid;
mod input;
mod life;
mod settings;
mod sim;
mod source;
mod terminal;

use clap::Parser;
use config::{CliArgs, LifeConfig};
use error::LifeError;
use input::{InputController, TerminalKeys};
use settings::Settings;
use sim::{RenderLoop, SimulationState, StopReason};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::Terminal;

#[derive(Parser)]
#[command(name = "termlife")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Conway's Game of Life in the terminal ('+' faster, '-' slower, 'q' quit)", long_about = None)]
struct Cli {
    /// Load the starting grid from this file (rows of 0 and 1)
    #[arg(short, long, conflicts_with = "random")]
    file: Option<PathBuf>,

    /// Start from a random grid instead of asking
    #[arg(short, long)]
    random: bool,

    /// Rows of the random grid
    #[arg(long, value_parser = parse_dimension)]
    rows: Option<usize>,

    /// Columns of the random grid
    #[arg(long, value_parser = parse_dimension)]
    cols: Option<usize>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory searched for .txt grids in file mode
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Initial delay between generations in milliseconds (minimum 100)
    #[arg(short = 't', long = "delay")]
    delay_ms: Option<u64>,

    /// Character for live cells
    #[arg(long)]
    alive: Option<char>,

    /// Character for dead cells
    #[arg(long)]
    dead: Option<char>,
}

/// Grid dimension: a positive count that fits in `usize`
fn parse_dimension(arg: &str) -> Result<usize, String> {
    let n: u64 = arg.parse().map_err(|e| format!("{}", e))?;
    let n = usize::try_from(n).map_err(|_| format!("{} is too large", n))?;
    if n == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(n)
}

impl From<Cli> for CliArgs {
    fn from(cli: Cli) -> Self {
        Self {
            file: cli.file,
            random: cli.random,
            rows: cli.rows,
            cols: cli.cols,
            seed: cli.seed,
            dir: cli.dir,
            delay_ms: cli.delay_ms,
            alive: cli.alive,
            dead: cli.dead,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = LifeConfig::resolve(cli.into(), &Settings::load());

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: LifeConfig) -> Result<(), LifeError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let source = match config.source {
        Some(source) => source,
        None => source::choose_source(&mut input, &mut stdout, &config.dir)?,
    };
    let grid = source.load(&mut input, &mut stdout)?;
    drop(input);

    let mut state = SimulationState::new(grid, config.initial_delay);

    terminal::install_signal_handlers();
    let term = Terminal::enter()?;
    let outcome = RenderLoop::new(io::stdout(), InputController::new(TerminalKeys), config.glyphs)
        .run(&mut state);

    // Restore before reporting anything, and keep going if that fails
    terminal::report_restore(term.restore());

    let reason = outcome?;
    if reason == StopReason::Shutdown {
        log::info!("stopped by signal");
    }
    writeln!(
        stdout,
        "Ran {} generations; final population {}.",
        state.generation,
        state.grid.population()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_parse_to_usize() {
        let cli = Cli::try_parse_from(["termlife", "--random", "--rows", "12", "--cols", "34"]).unwrap();
        let args = CliArgs::from(cli);
        assert_eq!((args.rows, args.cols), (Some(12), Some(34)));
    }

    #[test]
    fn zero_or_garbage_dimensions_are_rejected() {
        assert!(Cli::try_parse_from(["termlife", "--rows", "0"]).is_err());
        assert!(Cli::try_parse_from(["termlife", "--cols", "-3"]).is_err());
        assert!(Cli::try_parse_from(["termlife", "--cols", "wide"]).is_err());
    }

    #[test]
    fn dimension_parser_reports_reason() {
        assert_eq!(parse_dimension("7"), Ok(7));
        assert_eq!(parse_dimension("0"), Err("must be at least 1".to_string()));
        #[cfg(target_pointer_width = "32")]
        assert!(parse_dimension("4294967296").is_err());
    }
}
