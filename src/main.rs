// befx: Befunge-93 interpreter with an animated terminal view

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use befx::driver::run_to_exit;
use befx::grid::Grid;
use befx::interpreter::constants::DEFAULT_FRAMERATE;
use befx::interpreter::io::{LinePrompt, RandomHeadings};
use befx::interpreter::{create_initial_state, load_program, StepOutcome, Stepper, StepperConfig};
use befx::ui::App;

/// Run a Befunge-93 program, animated or headless
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the program to execute
    path: PathBuf,

    /// Animation framerate (steps per second)
    #[arg(short, long, default_value_t = DEFAULT_FRAMERATE)]
    framerate: u32,

    /// Only print the program's output
    #[arg(short = 'H', long)]
    headless: bool,

    /// Fault after this many invalid answers to `&`/`~` (default: keep asking)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_input_attempts: Option<u64>,

    /// Seed for `?` so runs are reproducible
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn stepper_config(&self) -> StepperConfig {
        StepperConfig {
            max_input_attempts: self.max_input_attempts.map(|n| n as usize),
        }
    }

    fn headings(&self) -> RandomHeadings {
        match self.seed {
            Some(seed) => RandomHeadings::seeded(seed),
            None => RandomHeadings::thread(),
        }
    }
}

fn report(outcome: &StepOutcome) -> ExitCode {
    match outcome {
        StepOutcome::Faulted(fault) => {
            eprintln!("Runtime fault: {}", fault);
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}

fn run_headless(cli: &Cli, grid: Grid) -> Result<ExitCode> {
    let mut state = create_initial_state(grid);
    let mut stepper =
        Stepper::new(LinePrompt::stdio(), cli.headings()).with_config(cli.stepper_config());
    let outcome = run_to_exit(&mut stepper, &mut state, &mut io::stdout())
        .context("failed to write program output")?;
    Ok(report(&outcome))
}

fn run_framed(cli: &Cli, grid: Grid) -> Result<ExitCode> {
    let state = create_initial_state(grid);
    let mut app = App::new(state, cli.headings(), cli.stepper_config(), cli.framerate);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")?;

    // Whatever the program printed survives leaving the alternate screen
    println!("{}", app.transcript());
    Ok(app.outcome().map(report).unwrap_or(ExitCode::SUCCESS))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;

    let grid = load_program(&source);
    eprintln!(
        "Loaded {}: {}x{} grid",
        cli.path.display(),
        grid.width(),
        grid.height()
    );

    if cli.headless {
        run_headless(&cli, grid)
    } else {
        run_framed(&cli, grid)
    }
}
