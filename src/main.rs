//! Terminal Minesweeper runner (default binary).
//!
//! Frames are printed to stdout by the render thread while this thread reads
//! commands from stdin:
//!
//! ```text
//! d <x> <y>   dig
//! f <x> <y>   toggle flag
//! g <x> <y>   guess around a revealed number
//! q           quit
//! ```
//!
//! Board size, mines, frame interval and seed come from `MINESWEEPER_*`
//! environment variables. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::style::{style, Stylize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_minesweeper::input::{parse_command, Command};
use tui_minesweeper::term::{Error, GameConfig, Session};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::from_env();
    let session = Session::new(&config).context("failed to set up the game")?;
    session.start(io::stdout()).context("failed to start rendering")?;

    let result = play(&session);

    // Let the final board state reach the screen before stopping.
    thread::sleep(Duration::from_millis(config.frame_ms.saturating_mul(2)));
    session.shut();
    session.join().context("render loop failed")?;
    result
}

fn play(session: &Session) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_finished() {
        prompt()?;
        let Some(line) = lines.next() else {
            info!("input closed");
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Action { action, x, y }) => match session.apply(action, x, y) {
                Ok(_) => {}
                Err(Error::Board(err)) => report(&format!("Invalid pos: {err}")),
                Err(err) => return Err(err.into()),
            },
            Err(err) => report(&format!("Invalid input: {err}")),
        }
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    let mut out = io::stdout().lock();
    write!(out, ">> ")?;
    out.flush()
}

fn report(message: &str) {
    eprintln!("{}", style(message).red());
}
