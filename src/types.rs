//! Core types shared by the registry, the focus coordinator and the scroll
//! synchronizer.
//!
//! - [`Direction`] / [`RemoteEvent`] - directional signals from the remote
//! - [`Capabilities`] - static platform switches
//! - [`Focusable`] / [`ScrollContainer`] - the capabilities the host supplies

use std::fmt;
use std::rc::{Rc, Weak};

// =============================================================================
// Direction
// =============================================================================

/// A recognized directional signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Parse an event type string. Anything but the four arrows is `None`.
    pub fn parse(event_type: &str) -> Option<Self> {
        match event_type {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    /// Traversal step through the registration ring.
    ///
    /// Navigation is one-dimensional: up behaves like left, down like right.
    pub fn step(self) -> isize {
        match self {
            Self::Right | Self::Down => 1,
            Self::Left | Self::Up => -1,
        }
    }

    /// Event type string as delivered by the remote.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Remote Event
// =============================================================================

/// A hardware key event as delivered by the remote-control channel.
///
/// `event_type` is free-form: besides the arrows, remotes send things like
/// `"select"` or `"playPause"`, which navigation ignores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEvent {
    pub event_type: String,
}

impl RemoteEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }

    /// The directional signal carried by this event, if any.
    pub fn direction(&self) -> Option<Direction> {
        Direction::parse(&self.event_type)
    }
}

impl From<Direction> for RemoteEvent {
    fn from(direction: Direction) -> Self {
        Self::new(direction.as_str())
    }
}

// =============================================================================
// Capabilities (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Static platform capabilities, decided once by the host.
    ///
    /// Combine with bitwise OR: `Capabilities::REMOTE_CONTROL | Capabilities::NATIVE_PAGING`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// The runtime delivers remote-control directional events.
        const REMOTE_CONTROL = 1 << 0;
        /// The platform pages horizontal rows natively.
        const NATIVE_PAGING = 1 << 1;
    }
}

impl Capabilities {
    /// A remote-control display without native paging.
    pub fn tv() -> Self {
        Self::REMOTE_CONTROL
    }

    /// A remote-control display whose platform pages rows itself.
    pub fn android_tv() -> Self {
        Self::REMOTE_CONTROL | Self::NATIVE_PAGING
    }

    /// Pointer-driven runtime: navigation is disabled.
    pub fn none() -> Self {
        Self::empty()
    }

    pub fn is_remote_control(self) -> bool {
        self.contains(Self::REMOTE_CONTROL)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::tv()
    }
}

// =============================================================================
// Focusable
// =============================================================================

/// Anything that can receive input focus.
///
/// Activation is assumed idempotent and non-blocking.
pub trait Focusable {
    fn focus(&self);

    /// Whether the target still exists. Dead targets never take focus.
    fn is_alive(&self) -> bool {
        true
    }
}

impl<T: Focusable + ?Sized> Focusable for Rc<T> {
    fn focus(&self) {
        (**self).focus();
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }
}

impl<T: Focusable + ?Sized> Focusable for Box<T> {
    fn focus(&self) {
        (**self).focus();
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }
}

/// Non-owning handle. A target that is already gone is skipped.
impl<T: Focusable + ?Sized> Focusable for Weak<T> {
    fn focus(&self) {
        match self.upgrade() {
            Some(target) => target.focus(),
            None => tracing::warn!("focus requested on a dropped target"),
        }
    }

    fn is_alive(&self) -> bool {
        self.upgrade().is_some_and(|target| target.is_alive())
    }
}

/// Adapts a closure into a [`Focusable`].
#[derive(Clone)]
pub struct FocusFn<F>(pub F);

impl<F: Fn()> Focusable for FocusFn<F> {
    fn focus(&self) {
        (self.0)();
    }
}

impl<F> fmt::Debug for FocusFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FocusFn")
    }
}

// =============================================================================
// Scroll Container
// =============================================================================

/// A request to move a scroll container's visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub x: f64,
    pub animated: bool,
}

/// Host-side scroll container. Clamping to the content bounds is the
/// container's job.
pub trait ScrollContainer {
    fn scroll_to(&self, request: ScrollRequest);
}

impl<T: ScrollContainer + ?Sized> ScrollContainer for Rc<T> {
    fn scroll_to(&self, request: ScrollRequest) {
        (**self).scroll_to(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("left"), Some(Direction::Left));
        assert_eq!(Direction::parse("down"), Some(Direction::Down));
        assert_eq!(Direction::parse("select"), None);
        assert_eq!(Direction::parse("Left"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn test_direction_step_is_one_dimensional() {
        assert_eq!(Direction::Right.step(), Direction::Down.step());
        assert_eq!(Direction::Left.step(), Direction::Up.step());
        assert_eq!(Direction::Right.step(), -Direction::Left.step());
    }

    #[test]
    fn test_capabilities() {
        assert!(Capabilities::tv().is_remote_control());
        assert!(!Capabilities::tv().contains(Capabilities::NATIVE_PAGING));
        assert!(Capabilities::android_tv().contains(Capabilities::NATIVE_PAGING));
        assert!(!Capabilities::none().is_remote_control());
        assert_eq!(Capabilities::default(), Capabilities::tv());
    }

    #[test]
    fn test_weak_focusable_skips_dropped_target() {
        let count = Rc::new(Cell::new(0));
        let target = Rc::new(FocusFn({
            let count = count.clone();
            move || count.set(count.get() + 1)
        }));
        let weak = Rc::downgrade(&target);

        weak.focus();
        assert_eq!(count.get(), 1);

        assert!(weak.is_alive());
        drop(target);
        assert!(!weak.is_alive());
        weak.focus();
        assert_eq!(count.get(), 1);
    }
}
