//! Portable error taxonomy surfaced to catalog callers.

/// Errors raised by schema and table operations, independent of dialect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Schema already exists: {0}")]
    SchemaAlreadyExists(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table already exists: {0}")]
    TableAlreadyExists(String),

    #[error("Schema {0} is not empty, the value of cascade should be true")]
    NonEmptySchema(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Unsupported index: {0}")]
    UnsupportedIndex(String),

    #[error("Not a supported column default value: {0}")]
    UnsupportedDefaultValue(String),

    /// Backend failure with no portable counterpart; carries the native code.
    #[error("Backend error {code}: {message}")]
    Backend { code: i32, message: String },
}

impl CatalogError {
    /// Whether this error was raised before any SQL reached the backend.
    pub fn is_synthesis_error(&self) -> bool {
        matches!(
            self,
            CatalogError::UnsupportedOperation(_)
                | CatalogError::InvalidSchema(_)
                | CatalogError::UnsupportedType(_)
                | CatalogError::UnsupportedIndex(_)
                | CatalogError::UnsupportedDefaultValue(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
