//! Raw-mode terminal lifecycle for the TUI presenter.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{Result, TickerError};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode on the alternate screen. Raw mode is undone if a later
/// step fails. The caller decides beforehand whether stdout is a TTY.
///
/// # Errors
///
/// Returns [`TickerError::Io`] naming the step that failed.
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(|e| step_failed("enable raw mode", &e))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        step_failed("enter alternate screen", &e)
    })?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        step_failed("create terminal", &e)
    })
}

/// Leaves the alternate screen and shows the cursor again.
///
/// # Errors
///
/// Returns [`TickerError::Io`] naming the step that failed.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| step_failed("disable raw mode", &e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| step_failed("leave alternate screen", &e))?;
    terminal
        .show_cursor()
        .map_err(|e| step_failed("show cursor", &e))
}

fn step_failed(step: &str, e: &io::Error) -> TickerError {
    TickerError::Io(format!("failed to {step}: {e}"))
}
