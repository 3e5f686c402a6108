//! Terminal block game runner (default binary).
//!
//! Parses options, sets up file logging, acquires the terminal once, runs the
//! loop and releases the terminal on the way out.

use std::fs::File;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use tui_blocks::core::GameState;
use tui_blocks::engine::GameLoop;
use tui_blocks::term::TerminalDisplay;
use tui_blocks::types::POLL_TIMEOUT_MS;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for shapes and colors. The same seed replays the same pieces.
    /// Defaults to a time-based seed.
    #[arg(short, long, env = "TUI_BLOCKS_SEED")]
    seed: Option<u32>,
    /// Input poll timeout in milliseconds; one loop tick per poll.
    #[arg(
        long,
        env = "TUI_BLOCKS_POLL_MS",
        default_value_t = POLL_TIMEOUT_MS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    poll_ms: u32,
    /// Start with the landing preview hidden (toggle in game with `a`).
    #[arg(long)]
    no_ghost: bool,
    /// Write logs to this file. Nothing is logged otherwise, since the game
    /// owns the terminal. Filter with `TUI_BLOCKS_LOG` (default `info`).
    #[arg(long, env = "TUI_BLOCKS_LOG_FILE")]
    log_file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.log_file.as_deref() {
        init_logging(Path::new(path))?;
    }

    let seed = args.seed.unwrap_or_else(time_seed);

    let mut display = TerminalDisplay::default();
    if let Err(err) = display.enter() {
        error!("display init failed: {err:#}");
        let _ = display.exit();
        return Ok(());
    }

    // Restore the terminal before the panic message is printed, so it is not
    // lost to the alternate screen.
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::ExecutableCommand::execute(&mut io::stdout(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
        );
        eprint!("{panic_info}\n\n");
    }));

    let state = GameState::new(seed).with_ghost(!args.no_ghost);
    let mut game = GameLoop::with_poll_timeout(state, args.poll_ms);
    let result = game.run(&mut display);

    // Always try to restore terminal state.
    let _ = display.exit();

    if let Err(err) = &result {
        error!("game loop failed: {err:#}");
    }
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("TUI_BLOCKS_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
