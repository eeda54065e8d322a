//! Errors raised while building or querying a catalog.

use std::path::PathBuf;

/// A failure to build a [`TypeCatalog`](crate::TypeCatalog).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The manifest file could not be read.
    #[error("failed to read manifest '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or does not match the expected shape.
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two types share a name.
    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    /// A type or field name is empty.
    #[error("empty name in {0}")]
    EmptyName(String),

    /// A declared type string could not be decoded.
    #[error("invalid type '{text}': {reason}")]
    InvalidType { text: String, reason: &'static str },
}

/// A referenced type name is not present in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("type '{name}' is not declared in the catalog")]
pub struct MissingType {
    pub name: String,
}
