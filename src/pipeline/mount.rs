//! Mount API - navigation root lifecycle.
//!
//! A [`NavigationRoot`] owns one focus coordinator for its whole lifetime:
//! it subscribes the coordinator to the remote event channel on mount and
//! detaches it on unmount (or drop).
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::{NavConfig, NavigationRoot, RemoteEmitter};
//!
//! let emitter = RemoteEmitter::new();
//! let root = NavigationRoot::mount(NavConfig::default(), Some(&emitter));
//!
//! // Hand the navigator to every region under this root
//! let navigator = root.navigator();
//! let _button = navigator.mount_node("play", play_button)?;
//!
//! emitter.emit(&RemoteEvent::new("right"));
//!
//! root.unmount();
//! ```

use tracing::{debug, warn};

use super::navigator::Navigator;
use crate::config::NavConfig;
use crate::state::events::{EventChannel, EventHandler};
use crate::types::{Focusable, RemoteEvent};

// =============================================================================
// Navigation Root
// =============================================================================

/// Owner of one navigator and its remote event subscription.
///
/// Holds:
/// - The shared navigator (cloned out to regions)
/// - The event handler keeping the subscription alive
pub struct NavigationRoot<H: Focusable + Clone + 'static> {
    navigator: Navigator<H>,
    events: EventHandler,
    config: NavConfig,
}

impl<H: Focusable + Clone + 'static> NavigationRoot<H> {
    /// Mount a root.
    ///
    /// On a runtime without `REMOTE_CONTROL` nothing is subscribed and the
    /// navigator is inert. With no channel the navigator still works for
    /// explicit requests but never sees directional events.
    pub fn mount(config: NavConfig, channel: Option<&dyn EventChannel>) -> Self {
        let navigator = Navigator::new(config);
        let mut events = EventHandler::new();

        if config.is_enabled() {
            let listener_nav = navigator.clone();
            events.enable(channel, move |event: &RemoteEvent| {
                if let Err(err) = listener_nav.handle_event(event) {
                    warn!(error = %err, "remote event after unmount");
                }
            });
        }

        debug!(
            enabled = config.is_enabled(),
            listening = events.is_enabled(),
            "navigation root mounted"
        );

        Self {
            navigator,
            events,
            config,
        }
    }

    /// A handle for regions under this root.
    pub fn navigator(&self) -> Navigator<H> {
        self.navigator.clone()
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Whether the root is subscribed to remote events.
    pub fn is_listening(&self) -> bool {
        self.events.is_enabled()
    }

    /// Detach from the channel and invalidate every navigator clone.
    pub fn unmount(self) {
        // Drop does the work
    }

    fn teardown(&mut self) {
        self.events.disable();
        if self.navigator.is_mounted() {
            self.navigator.detach();
            debug!("navigation root unmounted");
        }
    }
}

impl<H: Focusable + Clone + 'static> Drop for NavigationRoot<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H: Focusable + Clone + 'static> std::fmt::Debug for NavigationRoot<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationRoot")
            .field("navigator", &self.navigator)
            .field("listening", &self.is_listening())
            .finish()
    }
}
