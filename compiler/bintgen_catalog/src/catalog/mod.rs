//! Catalog of the named types of one target package.
//!
//! The `TypeCatalog` stores every record type, primitive alias and named
//! slice type the type-info provider reported, and answers the questions the
//! field classifier needs: "is this a record", "what are its fields", and
//! "does this alias resolve to a primitive".
//!
//! # Design
//!
//! - `FxHashMap` for O(1) lookup by name
//! - A separate declaration-order list so iteration is deterministic
//! - Read-only once built; the generator never mutates it

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{CatalogError, MissingType, Primitive, TypeRef};

/// Read-only view over the named types of a package.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    /// Package the types belong to.
    package: String,

    /// Types indexed by name.
    types: FxHashMap<String, TypeDef>,

    /// Type names in declaration order.
    order: Vec<String>,
}

/// A named type definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
}

/// The shape of a named type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    /// A record with ordered fields.
    Record(Vec<FieldDecl>),

    /// A named type derived from another named or primitive type
    /// (`type Level int32`, `type Priority Level`).
    Alias {
        /// The type this one is declared in terms of.
        derives: String,
    },

    /// A named slice type (`type Levels []Level`).
    Slice {
        /// Element type name.
        component: String,
        /// Elements are pointers.
        pointer_component: bool,
    },
}

/// A field of a record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Declared type, decoded.
    pub ty: TypeRef,
    /// Raw tag text (`json:"id,omitempty"`).
    pub tag: String,
    /// Embedded field.
    pub anonymous: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            anonymous: false,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

/// Outcome of following an alias chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AliasResolution {
    /// The chain ends in a primitive.
    Primitive(Primitive),
    /// The chain ends in a type that is not a primitive (a record, a slice,
    /// or the starting type was not an alias at all).
    Unresolved,
    /// The chain revisits a type. Holds the chain in visit order, ending with
    /// the repeated name.
    Cycle(Vec<String>),
}

impl TypeKind {
    #[inline]
    pub fn is_record(&self) -> bool {
        matches!(self, TypeKind::Record(_))
    }
}

impl TypeCatalog {
    /// Create an empty catalog for `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            types: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Name of the package the catalog describes.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Add a type definition.
    pub fn insert(&mut self, def: TypeDef) -> Result<(), CatalogError> {
        if def.name.is_empty() {
            return Err(CatalogError::EmptyName("type declaration".to_string()));
        }
        if self.types.contains_key(&def.name) {
            return Err(CatalogError::DuplicateType(def.name));
        }
        self.order.push(def.name.clone());
        self.types.insert(def.name.clone(), def);
        Ok(())
    }

    /// Register a record type.
    pub fn insert_record(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDecl>,
    ) -> Result<(), CatalogError> {
        self.insert(TypeDef {
            name: name.into(),
            kind: TypeKind::Record(fields),
        })
    }

    /// Register a derived type.
    pub fn insert_alias(
        &mut self,
        name: impl Into<String>,
        derives: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.insert(TypeDef {
            name: name.into(),
            kind: TypeKind::Alias {
                derives: derives.into(),
            },
        })
    }

    /// Register a named slice type.
    pub fn insert_slice(
        &mut self,
        name: impl Into<String>,
        component: impl Into<String>,
        pointer_component: bool,
    ) -> Result<(), CatalogError> {
        self.insert(TypeDef {
            name: name.into(),
            kind: TypeKind::Slice {
                component: component.into(),
                pointer_component,
            },
        })
    }

    /// Look up a type by name.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Fields of a record type, in declaration order.
    pub fn record(&self, name: &str) -> Option<&[FieldDecl]> {
        match &self.types.get(name)?.kind {
            TypeKind::Record(fields) => Some(fields),
            TypeKind::Alias { .. } | TypeKind::Slice { .. } => None,
        }
    }

    #[inline]
    pub fn is_record(&self, name: &str) -> bool {
        self.record(name).is_some()
    }

    /// Check whether `name` is a known primitive.
    #[inline]
    pub fn is_primitive(name: &str) -> bool {
        Primitive::from_name(name).is_some()
    }

    /// Follow the alias chain starting at `name` until a primitive is reached.
    ///
    /// `name` itself must be declared in the catalog; so must every link of
    /// the chain that is not a primitive. A chain that revisits a type is
    /// reported as [`AliasResolution::Cycle`].
    pub fn resolve_alias(&self, name: &str) -> Result<AliasResolution, MissingType> {
        let mut visited = FxHashSet::default();
        let mut chain = Vec::new();
        let mut current = name;

        loop {
            if !visited.insert(current) {
                chain.push(current.to_string());
                return Ok(AliasResolution::Cycle(chain));
            }
            chain.push(current.to_string());

            let def = self.types.get(current).ok_or_else(|| MissingType {
                name: current.to_string(),
            })?;
            let TypeKind::Alias { derives } = &def.kind else {
                return Ok(AliasResolution::Unresolved);
            };
            if let Some(prim) = Primitive::from_name(derives) {
                return Ok(AliasResolution::Primitive(prim));
            }
            current = derives;
        }
    }

    /// Iterate over all types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
