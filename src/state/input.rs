//! Terminal Input - crossterm key events as remote events
//!
//! Lets a terminal stand in for a remote control:
//! - Arrow keys and `h`/`j`/`k`/`l` become directional events
//! - Enter is `select`, Escape is `back`, Space is `playPause`
//! - Ctrl+C is reported separately so the host can shut down
//! - Key releases are dropped; presses and repeats pass through
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::state::input::{poll_event, InputEvent};
//!
//! loop {
//!     match poll_event(Duration::from_millis(50))? {
//!         Some(InputEvent::Remote(event)) => { emitter.emit(&event); }
//!         Some(InputEvent::Interrupt) => break,
//!         _ => {}
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, poll, read,
};

use crate::types::{Direction, RemoteEvent};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Terminal events the navigation host cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key that maps to a remote button.
    Remote(RemoteEvent),
    /// Ctrl+C.
    Interrupt,
    /// Terminal resize (new width, height).
    Resize(u16, u16),
    /// Anything else.
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm key event into a remote event.
///
/// Returns `None` for releases and for keys with no remote equivalent.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<RemoteEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let event_type = match event.code {
        KeyCode::Left | KeyCode::Char('h') => Direction::Left.as_str(),
        KeyCode::Right | KeyCode::Char('l') => Direction::Right.as_str(),
        KeyCode::Up | KeyCode::Char('k') => Direction::Up.as_str(),
        KeyCode::Down | KeyCode::Char('j') => Direction::Down.as_str(),
        KeyCode::Enter => "select",
        KeyCode::Esc => "back",
        KeyCode::Char(' ') => "playPause",
        _ => return None,
    };

    Some(RemoteEvent::new(event_type))
}

fn is_interrupt(event: &CrosstermKeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL)
        && event.code == KeyCode::Char('c')
        && event.kind != KeyEventKind::Release
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) if is_interrupt(&key) => InputEvent::Interrupt,
        CrosstermEvent::Key(key) => match convert_key_event(key) {
            Some(remote) => InputEvent::Remote(remote),
            None => InputEvent::None,
        },
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

// =============================================================================
// TESTS
// =============================================================================
