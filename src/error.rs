//! Error types for duration parsing, manual entry and tracking sessions.

use crate::session::SessionState;

/// Duration text that is not `MM:SS` or `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration {input:?}: use MM:SS or HH:MM:SS")]
pub struct FormatError {
    pub input: String,
}

impl FormatError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Rejections from the manual logging path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("Please fill in both distance and duration.")]
    MissingField,

    #[error("Please enter a valid positive number for distance.")]
    InvalidDistance,

    #[error("Please use a valid duration format (e.g., MM:SS or HH:MM:SS).")]
    InvalidDuration(#[from] FormatError),
}

/// Failures reported by the location source. They end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("Location access was denied. Please enable it in your browser settings to track activities.")]
    PermissionDenied,

    #[error("Could not get location. Please ensure GPS is enabled.")]
    Timeout,

    #[error("Geolocation is not supported by your browser.")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} a session in state {from:?}")]
    InvalidTransition {
        from: SessionState,
        action: &'static str,
    },

    #[error("tracking stopped: {0}")]
    Sensor(#[from] SensorError),
}
