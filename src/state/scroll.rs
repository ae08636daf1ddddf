//! Scroll Paging - maps directional signals onto a horizontal container
//!
//! Manages paging for one scroll container:
//! - Container width and offset (reported by the host, never inferred)
//! - `right` pages forward by one container width, `left` pages back
//! - Anything else is ignored
//!
//! Architecture:
//! - [`apply`] is the pure transition: `(state, event) -> (state, request)`
//! - [`ScrollSynchronizer`] holds the state and validates host reports
//! - Clamping to the content bounds is left to the container

use tracing::{debug, trace};

use crate::error::{Measurement, NavError, Result};
use crate::types::{Capabilities, Direction, RemoteEvent, ScrollRequest};

// =============================================================================
// SCROLL MODE
// =============================================================================

/// How a scroll container reacts to the remote, chosen once per container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Page by container width on left/right.
    Paged,
    /// The platform pages natively; render a plain row and stay out of the way.
    NativeRow,
    /// No remote control; a plain scroll view with no subscription.
    Plain,
}

impl ScrollMode {
    pub fn from_capabilities(capabilities: Capabilities) -> Self {
        if !capabilities.is_remote_control() {
            Self::Plain
        } else if capabilities.contains(Capabilities::NATIVE_PAGING) {
            Self::NativeRow
        } else {
            Self::Paged
        }
    }

    /// Whether this mode listens to directional signals.
    pub fn is_paged(self) -> bool {
        self == Self::Paged
    }
}

// =============================================================================
// STATE & TRANSITION
// =============================================================================

/// Last reported geometry of a scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub container_width: f64,
    pub offset: f64,
}

/// Input to the paging state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollEvent {
    Signal(RemoteEvent),
    WidthChanged(f64),
    OffsetChanged(f64),
}

impl From<Direction> for ScrollEvent {
    fn from(direction: Direction) -> Self {
        Self::Signal(direction.into())
    }
}

/// Result of [`apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTransition {
    pub state: ScrollState,
    pub request: Option<ScrollRequest>,
}

/// Compute the next scroll state and the paging request, if any.
///
/// Signals never change the state; only reports do.
pub fn apply(state: &ScrollState, event: &ScrollEvent) -> ScrollTransition {
    match event {
        ScrollEvent::Signal(remote) => {
            let target = match remote.direction() {
                Some(Direction::Right) => state.offset + state.container_width,
                Some(Direction::Left) => state.offset - state.container_width,
                _ => {
                    return ScrollTransition {
                        state: *state,
                        request: None,
                    };
                }
            };
            ScrollTransition {
                state: *state,
                request: Some(ScrollRequest {
                    x: target,
                    animated: true,
                }),
            }
        }
        ScrollEvent::WidthChanged(width) => ScrollTransition {
            state: ScrollState {
                container_width: *width,
                ..*state
            },
            request: None,
        },
        ScrollEvent::OffsetChanged(offset) => ScrollTransition {
            state: ScrollState {
                offset: *offset,
                ..*state
            },
            request: None,
        },
    }
}

// =============================================================================
// SYNCHRONIZER
// =============================================================================

/// Paging state for one container.
///
/// Returns requests instead of calling the container so the caller can
/// release any borrow before the container reacts.
#[derive(Debug, Clone, Default)]
pub struct ScrollSynchronizer {
    state: ScrollState,
}

impl ScrollSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Record a layout width report.
    pub fn report_width(&mut self, width: f64) -> Result<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(NavError::InvalidMeasurement {
                kind: Measurement::Width,
                value: width,
            });
        }
        self.step(ScrollEvent::WidthChanged(width));
        Ok(())
    }

    /// Record a scroll position report. Negative offsets are accepted; the
    /// container decides what it can show.
    pub fn report_offset(&mut self, offset: f64) -> Result<()> {
        if !offset.is_finite() {
            return Err(NavError::InvalidMeasurement {
                kind: Measurement::Offset,
                value: offset,
            });
        }
        self.step(ScrollEvent::OffsetChanged(offset));
        Ok(())
    }

    /// Map a remote event to a paging request.
    pub fn handle_event(&mut self, event: &RemoteEvent) -> Option<ScrollRequest> {
        let request = self.step(ScrollEvent::Signal(event.clone()));
        match request {
            Some(request) => {
                debug!(x = request.x, event = %event.event_type, "scroll page request")
            }
            None => trace!(event = %event.event_type, "scroll ignored signal"),
        }
        request
    }

    fn step(&mut self, event: ScrollEvent) -> Option<ScrollRequest> {
        let ScrollTransition { state, request } = apply(&self.state, &event);
        self.state = state;
        request
    }
}
