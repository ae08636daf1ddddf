//! Scroll View - a horizontally paged container driven by the remote.
//!
//! Binds a [`ScrollSynchronizer`] to a host [`ScrollContainer`]:
//! - `Paged`: subscribes to remote events and pages by container width
//! - `NativeRow`: the platform pages itself; no subscription
//! - `Plain`: no remote control; no subscription
//!
//! The host pushes layout and scroll reports through a [`MeasurementFeed`].

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::error::Result;
use crate::state::events::{EventChannel, EventHandler};
use crate::state::scroll::{ScrollMode, ScrollState, ScrollSynchronizer};
use crate::types::{Capabilities, RemoteEvent, ScrollContainer, ScrollRequest};

struct Shared<C> {
    sync: RefCell<ScrollSynchronizer>,
    container: C,
    mode: ScrollMode,
}

impl<C: ScrollContainer> Shared<C> {
    fn handle_event(&self, event: &RemoteEvent) -> Option<ScrollRequest> {
        if !self.mode.is_paged() {
            return None;
        }
        // Borrow ends before the container runs; it may report back synchronously
        let request = self.sync.borrow_mut().handle_event(event);
        if let Some(request) = request {
            self.container.scroll_to(request);
        }
        request
    }
}

// =============================================================================
// Scroll View
// =============================================================================

/// A mounted scroll container.
pub struct ScrollView<C: ScrollContainer + 'static> {
    shared: Rc<Shared<C>>,
    events: EventHandler,
}

impl<C: ScrollContainer + 'static> ScrollView<C> {
    /// Mount `container`, choosing its mode once from `capabilities`.
    pub fn mount(
        container: C,
        capabilities: Capabilities,
        channel: Option<&dyn EventChannel>,
    ) -> Self {
        let mode = ScrollMode::from_capabilities(capabilities);
        let shared = Rc::new(Shared {
            sync: RefCell::new(ScrollSynchronizer::new()),
            container,
            mode,
        });

        let mut events = EventHandler::new();
        if mode.is_paged() {
            let listener_shared = shared.clone();
            events.enable(channel, move |event: &RemoteEvent| {
                listener_shared.handle_event(event);
            });
        }

        debug!(?mode, listening = events.is_enabled(), "scroll view mounted");
        Self { shared, events }
    }

    pub fn mode(&self) -> ScrollMode {
        self.shared.mode
    }

    pub fn state(&self) -> ScrollState {
        self.shared.sync.borrow().state()
    }

    pub fn container(&self) -> &C {
        &self.shared.container
    }

    pub fn is_listening(&self) -> bool {
        self.events.is_enabled()
    }

    /// Handle for the host's layout and scroll callbacks.
    pub fn feed(&self) -> MeasurementFeed<C> {
        MeasurementFeed {
            shared: self.shared.clone(),
        }
    }

    pub fn report_width(&self, width: f64) -> Result<()> {
        self.shared.sync.borrow_mut().report_width(width)
    }

    pub fn report_offset(&self, offset: f64) -> Result<()> {
        self.shared.sync.borrow_mut().report_offset(offset)
    }

    /// Feed a remote event directly, bypassing the channel.
    ///
    /// Returns the request sent to the container, if any.
    pub fn handle_event(&self, event: &RemoteEvent) -> Option<ScrollRequest> {
        self.shared.handle_event(event)
    }

    pub fn unmount(mut self) {
        self.events.disable();
    }
}

impl<C: ScrollContainer + 'static> std::fmt::Debug for ScrollView<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollView")
            .field("mode", &self.mode())
            .field("state", &self.state())
            .field("listening", &self.is_listening())
            .finish()
    }
}

// =============================================================================
// Measurement Feed
// =============================================================================

/// Cloneable handle the host uses to push width and offset reports.
pub struct MeasurementFeed<C> {
    shared: Rc<Shared<C>>,
}

impl<C> Clone for MeasurementFeed<C> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<C: ScrollContainer> MeasurementFeed<C> {
    /// Layout callback: the container's visible width.
    pub fn report_width(&self, width: f64) -> Result<()> {
        self.shared.sync.borrow_mut().report_width(width)
    }

    /// Scroll callback: the container's horizontal content offset.
    pub fn report_offset(&self, offset: f64) -> Result<()> {
        self.shared.sync.borrow_mut().report_offset(offset)
    }
}
