//! Interactive menu screen.
//!
//! This module provides the terminal user interface of rust-menus: the
//! menu screen driven by shortcut keys and the value editor used to enter
//! argument values.
//!
//! # User Interface
//!
//! - Typing a key activates the entry it names, or narrows the highlight
//!   to entries starting with the typed input
//! - Tab completes the input when exactly one entry matches
//! - Backspace erases input, or goes back to the parent menu
//! - `ctrl+e` toggles edit mode, `ctrl+r` shows the output of previous runs
//! - Escape, `ctrl+q` or `ctrl+c` quits

use std::io::stdout;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, warn};
use rust_menus_core::error::Result;
use rust_menus_core::navigation::{Navigator, Outcome};

pub mod colors;
pub mod editor;
pub mod input;
pub mod types;
pub mod ui;

pub use editor::{EditorState, TerminalEditor};
pub use types::{SessionEnd, Status};

/// Puts the terminal in raw mode on the alternate screen until dropped.
pub struct ScreenGuard;

impl ScreenGuard {
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched.
    pub fn enter() -> Result<Self> {
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;
        enable_raw_mode()?;
        stdout.execute(Hide)?;
        Ok(ScreenGuard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(Show);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// Shows the main screen, with the output of earlier runs, until a key is
/// pressed.
fn show_results() -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(LeaveAlternateScreen)?;
    wait_for_key()?;
    stdout.execute(EnterAlternateScreen)?;
    Ok(())
}

/// The results view only exists once a command has run in place. Returns
/// the status to show instead when there is nothing to see.
#[must_use]
pub fn results_unavailable(has_results: bool) -> Option<Status> {
    if has_results {
        None
    } else {
        Some(Status::info("No output yet: results are shown after an in-place run."))
    }
}

/// Blocks until the next key press.
///
/// # Errors
///
/// Returns an error if terminal events cannot be read.
pub fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == event::KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

/// Runs the menu screen until a command is selected or the user quits.
///
/// The caller owns the [`ScreenGuard`]; recoverable errors are shown in
/// the status line and the session goes on. `has_results` tells whether a
/// command already ran in place, so its output can be shown.
///
/// # Errors
///
/// Returns terminal failures and errors that are not recoverable.
pub fn select_command(navigator: &mut Navigator, has_results: bool) -> Result<SessionEnd> {
    let mut editor = TerminalEditor;
    let mut status = Status::default();

    loop {
        ui::redraw(navigator, &status)?;

        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        let Some(key) = input::menu_key(&key_event) else {
            continue;
        };

        status = Status::default();
        match navigator.handle_key(key, &mut editor) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Execute(resolved)) => return Ok(SessionEnd::Execute(resolved)),
            Ok(Outcome::ShowResults) => match results_unavailable(has_results) {
                Some(unavailable) => status = unavailable,
                None => show_results()?,
            },
            Ok(Outcome::Cancelled) => {
                debug!("Menu session cancelled");
                return Ok(SessionEnd::Cancelled);
            }
            Err(e) if e.is_recoverable() => {
                warn!("{e}");
                status = Status::error(e.to_string());
            }
            Err(e) => return Err(e),
        }
    }
}

/// Waits for a key press outside the menu screen.
///
/// # Errors
///
/// Returns an error if the terminal mode cannot be switched.
pub fn pause() -> Result<()> {
    enable_raw_mode()?;
    let result = wait_for_key();
    disable_raw_mode()?;
    result
}
