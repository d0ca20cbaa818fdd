//! Error types for the animation core

use serde::{Deserialize, Serialize};

/// Error type for animation engine operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Easing family/mode pair with no defined curve
    #[error("Unsupported easing: {function} with mode {mode}")]
    UnsupportedEasing { function: String, mode: String },

    /// Operation a layout strategy refuses to perform
    #[error("Unsupported operation on layout {layout}: {operation}")]
    UnsupportedOperation { layout: String, operation: String },

    /// Container dimensions that cannot drive a layout
    #[error("Invalid dimensions: {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// Invalid value (non-finite numbers, negative durations, bad parameters)
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// Element id registered twice under the reject policy
    #[error("Duplicate element id: {id}")]
    DuplicateId { id: String },

    /// Group name not registered
    #[error("Group not found: {name}")]
    GroupNotFound { name: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Generic animation error
    #[error("Animation error: {message}")]
    Generic { message: String },
}

impl AnimationError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Check if the caller can retry after fixing input, as opposed to a
    /// configuration that will never be accepted.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. }
                | Self::InvalidValue { .. }
                | Self::DuplicateId { .. }
                | Self::GroupNotFound { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedEasing { .. } | Self::UnsupportedOperation { .. } => "configuration",
            Self::InvalidDimensions { .. } | Self::InvalidValue { .. } => "validation",
            Self::DuplicateId { .. } | Self::GroupNotFound { .. } => "registry",
            Self::Serialization { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = AnimationError::UnsupportedEasing {
            function: "exponential_in".into(),
            mode: "out".into(),
        };
        assert_eq!(err.category(), "configuration");
        assert!(!err.is_recoverable());

        let err = AnimationError::InvalidDimensions {
            width: -1.0,
            height: 10.0,
        };
        assert_eq!(err.category(), "validation");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_serialization() {
        let error = AnimationError::new("test");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: AnimationError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
