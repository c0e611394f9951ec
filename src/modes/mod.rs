//! Runtime modes: keyboard play, headless training, watching the agent

pub mod human;
pub mod train;
pub mod watch;

pub use human::HumanMode;
pub use train::{TrainConfig, TrainMode};
pub use watch::WatchMode;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

type ModeTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Put the terminal into raw mode on an alternate screen, drawing to
/// stderr so stdout stays usable for shell pipelines.
fn setup_terminal() -> Result<ModeTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut out = stderr();
    execute!(out, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(out)).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Undo `setup_terminal`. Must run even when the mode loop errors, or
/// the shell is left in raw mode.
fn restore_terminal(terminal: &mut ModeTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
