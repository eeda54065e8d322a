//! Field classification.
//!
//! Maps a field declaration to the one [`FieldStrategy`] that codes it. The
//! rules are checked in a fixed priority order and the first match wins:
//!
//! 1. primitive, by value or pointer → `BaseType`
//! 2. alias chain ending in a primitive → `DerivedBaseType`
//! 3. slice of primitives → `BaseSliceType`
//! 4. slice of primitive aliases → `DerivedSliceType`
//! 5. record, not a slice → `StructType`
//! 6. slice of records → `StructSliceType`
//! 7. anything else → `Unsupported`
//!
//! Classification is pure. Requesting coders for nested records is the
//! assembler's job.

use bintgen_catalog::{
    AliasResolution, FieldDecl, MissingType, Primitive, TypeCatalog, TypeDef, TypeKind,
};

use crate::{FieldStrategy, UnsupportedReason};

/// Classify `field` against `catalog`.
///
/// Returns `Err` only when a referenced name is missing from the catalog.
pub fn classify(field: &FieldDecl, catalog: &TypeCatalog) -> Result<FieldStrategy, MissingType> {
    let ty = &field.ty;
    let unsupported = |reason| FieldStrategy::Unsupported {
        type_name: ty.to_string(),
        field: field.name.clone(),
        reason,
    };

    // Rule 1: primitive by value or pointer.
    if !ty.slice {
        if let Some(base) = Primitive::from_name(&ty.name) {
            return Ok(FieldStrategy::BaseType { base });
        }
    }

    // Settle the slice shape: inline `[]T`, or a named slice type.
    let (element, pointer_element) = if ty.slice {
        (ty.name.as_str(), ty.pointer_component)
    } else {
        let def = lookup(catalog, &ty.name)?;
        match &def.kind {
            // Rule 2
            TypeKind::Alias { .. } => {
                return Ok(match catalog.resolve_alias(&ty.name)? {
                    AliasResolution::Primitive(base) => FieldStrategy::DerivedBaseType {
                        alias: ty.name.clone(),
                        base,
                    },
                    AliasResolution::Cycle(chain) => {
                        unsupported(UnsupportedReason::AliasCycle(chain))
                    }
                    AliasResolution::Unresolved => unsupported(UnsupportedReason::NoStrategy),
                });
            }
            // Rule 5
            TypeKind::Record(_) => {
                return Ok(FieldStrategy::StructType {
                    record: ty.name.clone(),
                });
            }
            TypeKind::Slice {
                component,
                pointer_component,
            } => (component.as_str(), *pointer_component),
        }
    };

    if ty.pointer {
        return Ok(unsupported(UnsupportedReason::PointerToSlice));
    }

    // Rule 3
    if let Some(element) = Primitive::from_name(element) {
        if pointer_element {
            return Ok(unsupported(UnsupportedReason::PointerElements));
        }
        return Ok(FieldStrategy::BaseSliceType { element });
    }

    let def = lookup(catalog, element)?;
    let strategy = match &def.kind {
        // Rule 4
        TypeKind::Alias { .. } => match catalog.resolve_alias(element)? {
            AliasResolution::Primitive(_) if pointer_element => {
                unsupported(UnsupportedReason::PointerElements)
            }
            AliasResolution::Primitive(base) => FieldStrategy::DerivedSliceType {
                element: element.to_string(),
                base,
            },
            AliasResolution::Cycle(chain) => unsupported(UnsupportedReason::AliasCycle(chain)),
            AliasResolution::Unresolved => unsupported(UnsupportedReason::NoStrategy),
        },
        // Rule 6
        TypeKind::Record(_) => FieldStrategy::StructSliceType {
            record: element.to_string(),
            pointer_element,
        },
        // Rule 7: slices of slices.
        TypeKind::Slice { .. } => unsupported(UnsupportedReason::NoStrategy),
    };
    Ok(strategy)
}

fn lookup<'c>(catalog: &'c TypeCatalog, name: &str) -> Result<&'c TypeDef, MissingType> {
    catalog.lookup(name).ok_or_else(|| MissingType {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests;
