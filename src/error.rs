//! Error types for boundary retrieval, geometry validation and configuration

use std::fmt;

/// Errors raised while acquiring or validating a play-area boundary
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// The VR runtime could not provide boundary data
    Unavailable {
        /// Backend that was queried
        backend: &'static str,
        /// Human-readable cause
        reason: String,
    },

    /// Fewer points than a closed polygon needs
    TooFewPoints {
        /// Number of points received
        count: usize,
    },

    /// Two consecutive points coincide (edge `index` → `index + 1` has zero length)
    ZeroLengthEdge {
        /// Index of the edge start point
        index: usize,
    },

    /// A point contains NaN or infinity
    NonFinitePoint {
        /// Index of the offending point
        index: usize,
    },

    /// A configuration value is out of range
    InvalidConfig {
        /// Field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration could not be parsed
    ConfigParse(String),

    /// Configuration file could not be read
    Io(String),

    /// A wait loop was cancelled before its condition was met
    Cancelled,
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { backend, reason } => {
                write!(f, "play area boundary unavailable from {}: {}", backend, reason)
            }
            Self::TooFewPoints { count } => {
                write!(f, "boundary needs at least 3 points, got {}", count)
            }
            Self::ZeroLengthEdge { index } => {
                write!(f, "boundary edge {} has zero length (duplicate consecutive points)", index)
            }
            Self::NonFinitePoint { index } => {
                write!(f, "boundary point {} is not finite", index)
            }
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config field `{}`: {}", field, reason)
            }
            Self::ConfigParse(msg) => write!(f, "failed to parse config: {}", msg),
            Self::Io(msg) => write!(f, "failed to read config: {}", msg),
            Self::Cancelled => write!(f, "wait cancelled"),
        }
    }
}

impl std::error::Error for BoundaryError {}

impl From<serde_json::Error> for BoundaryError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

impl From<std::io::Error> for BoundaryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
