//! # spark-nav
//!
//! Remote-control focus navigation for pointer-less displays.
//!
//! ## Architecture
//!
//! A navigation root owns an ordered registry of focusable regions and a focus
//! state machine. Directional signals from the remote move focus one step
//! around the registration ring; the same signals page any horizontally
//! scrolling container by one container width.
//!
//! ```text
//! region mount/unmount → Registry → FocusCoordinator → Focusable::focus()
//! remote event ─┬──────────────────────┘
//!               └→ ScrollSynchronizer → ScrollContainer::scroll_to()
//! ```
//!
//! Both state machines are plain values with pure `apply` transition
//! functions; the pipeline types subscribe them to a channel and run their
//! effects.
//!
//! ## Modules
//!
//! - [`types`] - Directions, remote events, capabilities, host traits
//! - [`engine`] - Focusable registry
//! - [`state`] - Focus and scroll state machines, event channel, terminal input
//! - [`pipeline`] - Navigation root, navigator handle, scroll view
//! - [`config`] - Root configuration
//! - [`error`] - Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::NavConfig;

pub use engine::Registry;

pub use error::{Measurement, NavError, Result};

pub use pipeline::{MeasurementFeed, NavigationRoot, Navigator, NodeGuard, ScrollView};

pub use state::{
    // Events
    EventChannel, EventHandler, Listener, RemoteEmitter, Subscription,
    // Focus
    Activation, FocusCoordinator, FocusEffect, FocusEvent, FocusState, Update,
    // Scroll
    ScrollEvent, ScrollMode, ScrollState, ScrollSynchronizer,
};
