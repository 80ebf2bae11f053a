//! Error handling for the PlanKit model layer.
//!
//! The model performs no I/O; errors come from parsing user input
//! (lengths, unit names) and from preference snapshots.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Model error type
#[derive(Error, Debug)]
pub enum ModelError {
    /// Unknown measurement unit name
    #[error("Unknown length unit: {value}")]
    UnknownUnit {
        /// The unit name that was not recognized.
        value: String,
    },

    /// A length could not be parsed from user input
    #[error("Invalid length '{input}': {reason}")]
    InvalidLength {
        /// The raw input text.
        input: String,
        /// The reason the input was rejected.
        reason: String,
    },

    /// A preference value is out of its legal range
    #[error("Invalid preference {name}: {reason}")]
    InvalidPreference {
        /// The preference field name.
        name: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// Preferences snapshot could not be encoded or decoded
    #[error("Preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
