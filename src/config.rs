//! Navigation root configuration.
//!
//! ```ignore
//! use spark_nav::{Capabilities, NavConfig};
//!
//! let config = NavConfig {
//!     capabilities: Capabilities::android_tv(),
//!     ..Default::default()
//! };
//! ```

use crate::types::Capabilities;

/// Settings fixed for the lifetime of a navigation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavConfig {
    /// Platform switches. Without `REMOTE_CONTROL` the root is inert.
    pub capabilities: Capabilities,
    /// Focus the first registered node when the registry stops being empty.
    pub auto_focus: bool,
}

impl NavConfig {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    pub fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    /// Whether directional navigation runs at all.
    pub fn is_enabled(&self) -> bool {
        self.capabilities.is_remote_control()
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::default(),
            auto_focus: true,
        }
    }
}
