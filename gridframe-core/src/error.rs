//! Error types for schema operations.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur on the fallible surface of the engine.
///
/// Normalization and validation are total and never return these; only
/// parsing and by-name lookups do.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Breakpoint not declared in the schema.
    #[error("Breakpoint not found: {0}")]
    BreakpointNotFound(String),

    /// Component not declared in the schema.
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Schema serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
