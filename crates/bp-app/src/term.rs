//! Terminal setup and teardown for the frame loop.
//!
//! In raw mode Ctrl-C arrives as a key event, not SIGINT. The cursor and
//! cooked mode come back on drop, or from the panic hook when panics abort.

use std::io::{self, stdout};
use std::panic;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

/// Raw mode plus hidden cursor, undone when dropped.
pub struct TerminalGuard(());

impl TerminalGuard {
    /// # Errors
    /// Returns an error if raw mode cannot be enabled or the cursor hidden.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let guard = Self(());
        execute!(stdout(), cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(stdout(), cursor::Show);
}

/// Restaure le terminal AVANT d'afficher le message de panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore();
        original_hook(panic_info);
    }));
}

/// `q`, `Esc` or Ctrl-C.
#[must_use]
pub fn should_quit(event: &Event) -> bool {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = *event
    else {
        return false;
    };
    match code {
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Drain pending terminal events without blocking.
///
/// # Errors
/// Returns an error if the terminal event queue cannot be read.
pub fn quit_requested() -> io::Result<bool> {
    let mut quit = false;
    while event::poll(Duration::ZERO)? {
        quit |= should_quit(&event::read()?);
    }
    Ok(quit)
}
