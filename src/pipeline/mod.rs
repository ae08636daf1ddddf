//! Mounted Components
//!
//! This module connects the state machines to their hosts.
//!
//! # Architecture
//!
//! ```text
//! RemoteEmitter ─┬─> NavigationRoot ─> FocusCoordinator ─> Focusable::focus()
//!                └─> ScrollView ─────> ScrollSynchronizer ─> ScrollContainer::scroll_to()
//! ```
//!
//! ## Key Design Principles
//!
//! - **Explicit ownership**: the root owns its registry; regions get a `Navigator`
//! - **Scoped subscriptions**: subscribe on mount, detach on unmount or drop
//! - **Effects outside borrows**: hosts may call back synchronously

pub mod mount;
pub mod navigator;
pub mod scroll_view;

// Re-exports
pub use mount::NavigationRoot;
pub use navigator::{Navigator, NodeGuard};
pub use scroll_view::{MeasurementFeed, ScrollView};
