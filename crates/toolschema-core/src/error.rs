//! Error types for schema flattening.

use thiserror::Error;

/// Errors surfaced by [`flatten`](crate::flatten).
///
/// Only producer-side contract breaks are fatal. Malformed references,
/// recursive cycles, and unions with no concrete branch are recovered in
/// place and never reach the caller.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// A node does not match any schema shape the flattener understands,
    /// e.g. a `properties` value that is not a JSON object.
    #[error("Shape violation at {path}: {message}")]
    ShapeViolation { path: String, message: String },

    /// JSON serialization failed while generating a schema from a typed
    /// model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
