//! Errors that abort a generation run.

use std::path::PathBuf;

use crate::UnsupportedReason;

/// A fatal code generation error.
///
/// Every variant aborts the whole run; no partial output is written.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A referenced type is not declared in the catalog.
    #[error("failed to lookup '{name}' referenced by field {owner}.{field}")]
    Lookup {
        name: String,
        owner: String,
        field: String,
    },

    /// A requested root type is unknown.
    #[error("failed to lookup '{0}'")]
    UnknownType(String),

    /// A requested root type exists but is not a record type.
    #[error("'{0}' is not a struct type")]
    NotARecord(String),

    /// No strategy applies to a field.
    #[error("unsupported type: {type_name} for field {owner}.{field}: {reason}")]
    UnsupportedField {
        owner: String,
        field: String,
        type_name: String,
        reason: UnsupportedReason,
    },

    /// A coder was reserved but never completed before finalizing.
    #[error("coder for '{0}' was started but never completed")]
    IncompleteCoder(String),

    /// The destination could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
