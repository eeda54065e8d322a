//! Package manifest: the serialized output of the type-info provider.
//!
//! ```json
//! { "package": "model",
//!   "types": [
//!     { "name": "User", "kind": "struct",
//!       "fields": [ { "name": "ID", "type": "int", "tag": "json:\"id\"" } ] },
//!     { "name": "Level", "kind": "alias", "derives": "int32" },
//!     { "name": "Levels", "kind": "slice", "component": "Level" } ] }
//! ```
//!
//! Type names are decoded into [`TypeRef`] while building the catalog, so a
//! malformed type string is reported before any generation starts.

use std::path::Path;

use serde::Deserialize;

use crate::{CatalogError, FieldDecl, TypeCatalog, TypeDef, TypeKind, TypeRef};

/// Top-level manifest document.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageManifest {
    /// Target package name.
    pub package: String,
    /// Named types of the package.
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// One named type.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeEntry {
    Struct {
        name: String,
        #[serde(default)]
        fields: Vec<FieldEntry>,
    },
    Alias {
        name: String,
        derives: String,
    },
    Slice {
        name: String,
        component: String,
    },
}

/// One record field.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub anonymous: bool,
}

impl PackageManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build the catalog, decoding every type string.
    pub fn into_catalog(self) -> Result<TypeCatalog, CatalogError> {
        if self.package.is_empty() {
            return Err(CatalogError::EmptyName("package clause".to_string()));
        }
        let mut catalog = TypeCatalog::new(self.package);
        for entry in self.types {
            catalog.insert(entry.into_def()?)?;
        }
        Ok(catalog)
    }
}

impl TypeEntry {
    fn into_def(self) -> Result<TypeDef, CatalogError> {
        match self {
            TypeEntry::Struct { name, fields } => {
                let fields = fields
                    .into_iter()
                    .map(|field| field.into_decl(&name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDef {
                    name,
                    kind: TypeKind::Record(fields),
                })
            }
            TypeEntry::Alias { name, derives } => {
                let target = TypeRef::parse(&derives)?;
                if target.pointer {
                    return Err(CatalogError::InvalidType {
                        text: derives,
                        reason: "named pointer types are not supported",
                    });
                }
                // `type Levels []Level` is reported by some providers as an alias.
                let kind = if target.slice {
                    TypeKind::Slice {
                        component: target.name,
                        pointer_component: target.pointer_component,
                    }
                } else {
                    TypeKind::Alias {
                        derives: target.name,
                    }
                };
                Ok(TypeDef { name, kind })
            }
            TypeEntry::Slice { name, component } => {
                let element = TypeRef::parse(&component)?;
                if element.slice || element.pointer_component {
                    return Err(CatalogError::InvalidType {
                        text: component,
                        reason: "nested slices are not supported",
                    });
                }
                Ok(TypeDef {
                    name,
                    kind: TypeKind::Slice {
                        component: element.name,
                        pointer_component: element.pointer,
                    },
                })
            }
        }
    }
}

impl FieldEntry {
    fn into_decl(self, owner: &str) -> Result<FieldDecl, CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::EmptyName(format!("field of '{owner}'")));
        }
        Ok(FieldDecl {
            name: self.name,
            ty: TypeRef::parse(&self.type_name)?,
            tag: self.tag,
            anonymous: self.anonymous,
        })
    }
}
