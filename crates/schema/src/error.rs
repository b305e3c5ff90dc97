//! Error types for schema definition and validation.

use thiserror::Error;

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur while defining or validating a schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Configuration contains a field the schema does not declare.
    #[error("Unknown field '{0}' in configuration")]
    UnknownField(String),

    /// A datasource lookup key names a field missing from the source schema.
    #[error("Lookup key '{0}' does not exist in the resource schema")]
    UnknownKey(String),

    /// A required field is absent from the configuration.
    #[error("Required field '{0}' is missing from configuration")]
    MissingRequired(String),

    /// A configured value does not match the field's declared type.
    #[error("Type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// A field definition has contradictory or incomplete flags.
    #[error("Invalid definition for field '{field}': {reason}")]
    InvalidDefinition { field: String, reason: String },

    /// A computed-only field was supplied in the configuration.
    #[error("Field '{0}' is computed and cannot be set in configuration")]
    ComputedField(String),

    /// A field name is not lowercase snake_case.
    #[error("Invalid field name '{0}': names must be lowercase snake_case")]
    InvalidFieldName(String),

    /// A list or set exceeds its declared maximum length.
    #[error("Field '{field}' has {found} items, maximum is {max}")]
    TooManyItems {
        field: String,
        max: usize,
        found: usize,
    },

    /// The schema declares no fields at all.
    #[error("Schema has no fields")]
    EmptySchema,
}
