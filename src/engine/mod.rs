//! Navigation Engine - focusable registry.
//!
//! The engine holds the data the state machines walk:
//! - Registry: ordered id → handle mapping, insertion order = traversal order
//!
//! # Architecture
//!
//! ```text
//! Index 0: "play"     -> handle
//! Index 1: "episodes" -> handle
//! Index 2: "settings" -> handle
//! ```
//!
//! Directional navigation steps through these positions and wraps around.

mod registry;

pub use registry::*;
