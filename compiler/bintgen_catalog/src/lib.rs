//! Type catalog for bintgen.
//!
//! This crate is the boundary between the external type-info provider and
//! the code generator. It owns:
//!
//! - [`TypeRef`]: a field's declared type, decoded once from the textual
//!   `*T` / `[]T` / `[]*T` convention into structured flags
//! - [`Primitive`]: the closed set of wire-representable base types
//! - [`TypeCatalog`]: read-only lookup of record types, primitive aliases and
//!   slice types for one package
//! - [`PackageManifest`]: the JSON form a catalog is loaded from
//!
//! # Architecture
//!
//! ```text
//! manifest.json
//!      ↓
//! PackageManifest  (serde, textual type names)
//!      ↓
//!  TypeCatalog     (structured TypeRef, validated)
//!      ↓
//! bintgen_codegen
//! ```

mod catalog;
mod error;
mod manifest;
mod primitive;
mod type_ref;

pub use catalog::{AliasResolution, FieldDecl, TypeCatalog, TypeDef, TypeKind};
pub use error::{CatalogError, MissingType};
pub use manifest::{FieldEntry, PackageManifest, TypeEntry};
pub use primitive::Primitive;
pub use type_ref::TypeRef;
