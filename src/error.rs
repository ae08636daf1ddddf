//! Error types.
//!
//! Expected no-ops (unknown ids, signals with no effect, unregistering an
//! absent id) are not errors. These variants cover wiring mistakes and bad
//! measurement reports.

use thiserror::Error;

/// Which measurement a scroll container reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Width,
    Offset,
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Offset => f.write_str("offset"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavError {
    /// The navigator was used after its root unmounted.
    #[error("{operation} called outside a mounted navigation root")]
    NotMounted { operation: &'static str },

    #[error("invalid {kind} report: {value}")]
    InvalidMeasurement { kind: Measurement, value: f64 },
}

pub type Result<T> = std::result::Result<T, NavError>;
