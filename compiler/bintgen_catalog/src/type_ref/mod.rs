//! Structured form of a declared field type.
//!
//! The type-info provider reports declared types as text, with pointer and
//! slice markers folded into the name (`*T`, `[]T`, `[]*T`, `*[]T`). The text
//! is decoded exactly once, here; everything downstream reads the flags.

use std::fmt;

use crate::CatalogError;

/// A declared type with its pointer and slice shape made explicit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Type name with every marker removed (the element name for slices).
    pub name: String,
    /// The field itself is a pointer (`*T`, `*[]T`).
    pub pointer: bool,
    /// The field is a slice (`[]T`).
    pub slice: bool,
    /// Slice elements are pointers (`[]*T`). Always `false` when not a slice.
    pub pointer_component: bool,
}

impl TypeRef {
    /// A plain named type: not a pointer, not a slice.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointer: false,
            slice: false,
            pointer_component: false,
        }
    }

    /// A pointer to a named type.
    pub fn pointer_to(name: impl Into<String>) -> Self {
        Self {
            pointer: true,
            ..Self::named(name)
        }
    }

    /// A slice of a named type, optionally of pointers.
    pub fn slice_of(name: impl Into<String>, pointer_component: bool) -> Self {
        Self {
            slice: true,
            pointer_component,
            ..Self::named(name)
        }
    }

    /// Decode the textual convention.
    ///
    /// Accepted shapes: `T`, `*T`, `[]T`, `[]*T`, `*[]T`, `*[]*T`. Anything
    /// left after the markers is kept verbatim as the name, so unknown
    /// spellings (maps, arrays) surface later as lookup failures.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let invalid = |reason| CatalogError::InvalidType {
            text: text.to_string(),
            reason,
        };

        let trimmed = text.trim();
        let (pointer, rest) = match trimmed.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (slice, rest) = match rest.strip_prefix("[]") {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let (pointer_component, rest) = match rest.strip_prefix('*') {
            Some(rest) if slice => (true, rest),
            Some(_) => return Err(invalid("pointer to pointer is not supported")),
            None => (false, rest),
        };

        if rest.is_empty() {
            return Err(invalid("missing type name"));
        }
        if rest.starts_with('*') {
            return Err(invalid("pointer to pointer is not supported"));
        }

        Ok(Self {
            name: rest.to_string(),
            pointer,
            slice,
            pointer_component,
        })
    }

    /// Element type name for slices.
    pub fn component(&self) -> Option<&str> {
        self.slice.then_some(self.name.as_str())
    }

    /// The element type as written, e.g. `*Item` for `[]*Item`.
    pub fn component_text(&self) -> Option<String> {
        self.component().map(|name| {
            if self.pointer_component {
                format!("*{name}")
            } else {
                name.to_string()
            }
        })
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer {
            f.write_str("*")?;
        }
        if self.slice {
            f.write_str("[]")?;
        }
        if self.pointer_component {
            f.write_str("*")?;
        }
        f.write_str(&self.name)
    }
}
