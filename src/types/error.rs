use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Type '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Invalid type name '{name}'")]
    InvalidTypeName { name: String },

    #[error("Type name '{name}' is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    #[error("Type declares {count} fields (max: {max})")]
    TooManyFields { count: usize, max: usize },

    #[error("Field name '{name}' is longer than {max} characters")]
    FieldNameTooLong { name: String, max: usize },

    #[error("Field '{name}' is declared more than once")]
    DuplicateFieldName { name: String },

    #[error("Primary key ordinal {ordinal} does not reference one of {field_count} fields")]
    InvalidPrimaryKey { ordinal: usize, field_count: usize },

    #[error("Type '{name}' not found")]
    UnknownType { name: String },

    #[error("Type '{type_name}' expects {expected} values, got {actual}")]
    ArityMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate primary key '{key}' in type '{type_name}'")]
    DuplicateKey { type_name: String, key: String },

    #[error("No record with primary key '{key}' in type '{type_name}'")]
    NotFound { type_name: String, key: String },

    #[error("Serialization/deserialization error: {details}")]
    SerializationError { details: String },

    #[error("Corrupted schema for type '{type_name}': {reason}")]
    CorruptedSchema { type_name: String, reason: String },

    #[error("Bad checksum for type '{type_name}': expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        type_name: String,
        expected: u32,
        actual: u32,
    },

    #[error("Parse error on line {line}: {details}")]
    ParseError { line: usize, details: String },
}

impl DatabaseError {
    /// Expected outcomes of a well-formed operation against the current state.
    /// These are reported as `failure` and processing continues.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            DatabaseError::AlreadyExists { .. }
                | DatabaseError::InvalidTypeName { .. }
                | DatabaseError::NameTooLong { .. }
                | DatabaseError::TooManyFields { .. }
                | DatabaseError::FieldNameTooLong { .. }
                | DatabaseError::DuplicateFieldName { .. }
                | DatabaseError::InvalidPrimaryKey { .. }
                | DatabaseError::UnknownType { .. }
                | DatabaseError::ArityMismatch { .. }
                | DatabaseError::DuplicateKey { .. }
                | DatabaseError::NotFound { .. }
                | DatabaseError::ParseError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
