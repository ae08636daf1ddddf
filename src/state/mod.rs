//! State Module - navigation state machines
//!
//! This module contains the state systems that power remote navigation:
//!
//! - **Focus** - focus state, auto-focus, ring traversal, explicit requests
//! - **Scroll** - container paging by width
//! - **Events** - remote event channel, subscriptions, enable/disable
//! - **Input** - crossterm keys as remote events

pub mod events;
pub mod focus;
pub mod input;
pub mod scroll;

pub use events::{EventChannel, EventHandler, Listener, RemoteEmitter, Subscription};
pub use focus::{Activation, FocusCoordinator, FocusEffect, FocusEvent, FocusState, Update};
pub use scroll::{ScrollEvent, ScrollMode, ScrollState, ScrollSynchronizer};
