//! Terminal acquisition for a shell run.
//!
//! A [`TerminalFactory`] hands out a [`TerminalHandle`] describing the device
//! together with the [`TerminalGuard`] that releases it.

mod guard;

use std::io::{self, IsTerminal, Write};

use crossterm::style::ResetColor;
use crossterm::terminal::{disable_raw_mode, is_raw_mode_enabled, size as terminal_size};
use crossterm::ExecutableCommand;

pub use guard::TerminalGuard;

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// What the session knows about its terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalHandle {
    width: u16,
}

impl TerminalHandle {
    pub fn new(width: u16) -> Self {
        Self { width }
    }

    /// Fixed-width terminal used when nothing is attached.
    pub fn dumb() -> Self {
        Self::new(DEFAULT_WIDTH)
    }

    /// Columns available for command output.
    pub fn width(&self) -> u16 {
        self.width
    }
}

/// Builds the terminal for a run.
pub trait TerminalFactory {
    fn build(&self, term: Option<String>) -> io::Result<(TerminalHandle, TerminalGuard)>;
}

/// Terminal backed by the process's own standard streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTerminalFactory;

impl TerminalFactory for SystemTerminalFactory {
    fn build(&self, term: Option<String>) -> io::Result<(TerminalHandle, TerminalGuard)> {
        let interactive = io::stdin().is_terminal();
        let styled = io::stdout().is_terminal() && term.as_deref() != Some("dumb");
        let (width, height) = terminal_size().unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        tracing::debug!(?term, width, height, interactive, "Terminal acquired");

        let guard = TerminalGuard::new(move || {
            if is_raw_mode_enabled().unwrap_or(false) {
                let _ = disable_raw_mode();
            }
            let mut stdout = io::stdout();
            if styled {
                let _ = stdout.execute(ResetColor);
            }
            let _ = stdout.flush();
            tracing::debug!("Terminal released");
        });
        guard.install_panic_hook();

        Ok((TerminalHandle::new(width), guard))
    }
}
