//! Error types for value generation and route registration

use thiserror::Error;

/// Errors raised while generating a single field value.
///
/// These surface to HTTP clients as a `500` response carrying the message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    /// Passthrough method name that has no registered generator
    #[error("Unknown faker method: '{0}'")]
    UnknownMethod(String),

    /// Constraint that the generator cannot work with
    #[error("Invalid constraint '{field}': {reason}")]
    InvalidConstraint { field: String, reason: String },
}

impl GenerationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning a route definition into a binding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("Unsupported HTTP method: '{0}'")]
    InvalidMethod(String),

    #[error("Invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Route {path} must have a count between 1 and {max}")]
    InvalidCount { path: String, max: usize },

    #[error("Unknown preset: '{0}'")]
    UnknownPreset(String),

    #[error("Route {method} {path} is already registered")]
    Duplicate { method: String, path: String },

    #[error("Route path '{path}' conflicts with '{existing}'")]
    PathConflict { path: String, existing: String },
}

impl RouteError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
