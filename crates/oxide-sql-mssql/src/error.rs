//! Error types for DDL generation.

/// Errors that can occur while turning a table diff into DDL.
#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    /// A column's logical type has no SQL Server representation.
    #[error("Cannot render type '{type_name}' for column '{column}'")]
    UnrenderableType {
        /// The column being rendered.
        column: String,
        /// The logical type name that failed to render.
        type_name: String,
    },

    /// A default value cannot be rendered as a SQL literal.
    #[error("Cannot render default value for column '{column}': {reason}")]
    UnresolvableDefault {
        /// The column carrying the default.
        column: String,
        /// Why the literal could not be produced.
        reason: String,
    },

    /// A server version string could not be parsed.
    #[error("Invalid server version: {0}")]
    InvalidVersion(String),

    /// IO error (reading configuration or diff files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for DDL generation.
pub type Result<T> = std::result::Result<T, DdlError>;
