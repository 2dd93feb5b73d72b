//! Terminal management: raw mode RAII guard, ratatui backend, and panic hook.

use crossterm::{cursor, execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// RAII guard that restores terminal state on drop (even on panic).
pub struct TerminalGuard {
    _private: (), // prevent construction outside this module
}

impl TerminalGuard {
    /// Enter alternate screen, raw mode, and hide the cursor. Returns the guard.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(TerminalGuard { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
}

/// Install a custom panic hook that restores the terminal before printing
/// the panic message. Call this once at startup.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        default_hook(info);
    }));
}

/// Set up the terminal for the viewer. Keep the guard alive while drawing.
pub fn init() -> io::Result<(TerminalGuard, Tui)> {
    install_panic_hook();
    let guard = TerminalGuard::new()?;
    let mut term = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    term.clear()?;
    Ok((guard, term))
}
