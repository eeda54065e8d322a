//! Field strategies: how one field travels over the wire.

use std::fmt;

use bintgen_catalog::Primitive;

/// The classification result for one field.
///
/// Exactly one variant applies to a field. `Unsupported` is a terminal
/// failure and is turned into an error by the assembler.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldStrategy {
    /// A primitive by value or by pointer.
    BaseType { base: Primitive },

    /// A named alias whose chain ends in a primitive.
    DerivedBaseType { alias: String, base: Primitive },

    /// A slice of primitives, inline (`[]int`) or named (`type Ints []int`).
    BaseSliceType { element: Primitive },

    /// A slice whose element is an alias of a primitive.
    DerivedSliceType { element: String, base: Primitive },

    /// A record by value or by pointer.
    StructType { record: String },

    /// A slice of records.
    StructSliceType {
        record: String,
        /// Elements are pointers (`[]*T`).
        pointer_element: bool,
    },

    /// No strategy applies.
    Unsupported {
        type_name: String,
        field: String,
        reason: UnsupportedReason,
    },
}

/// Why a field could not be classified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnsupportedReason {
    /// None of the strategies match the declared type.
    NoStrategy,
    /// The alias chain loops back on itself.
    AliasCycle(Vec<String>),
    /// Pointers to slices have no wire operation.
    PointerToSlice,
    /// Slices of pointers to primitives have no wire operation.
    PointerElements,
}

impl FieldStrategy {
    /// Name of the strategy, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldStrategy::BaseType { .. } => "BaseType",
            FieldStrategy::DerivedBaseType { .. } => "DerivedBaseType",
            FieldStrategy::BaseSliceType { .. } => "BaseSliceType",
            FieldStrategy::DerivedSliceType { .. } => "DerivedSliceType",
            FieldStrategy::StructType { .. } => "StructType",
            FieldStrategy::StructSliceType { .. } => "StructSliceType",
            FieldStrategy::Unsupported { .. } => "Unsupported",
        }
    }

    /// The strategy encodes a slice value.
    pub fn is_slice(&self) -> bool {
        matches!(
            self,
            FieldStrategy::BaseSliceType { .. }
                | FieldStrategy::DerivedSliceType { .. }
                | FieldStrategy::StructSliceType { .. }
        )
    }

    /// The record type this strategy needs a coder for, if any.
    pub fn nested_record(&self) -> Option<&str> {
        match self {
            FieldStrategy::StructType { record }
            | FieldStrategy::StructSliceType { record, .. } => Some(record),
            FieldStrategy::BaseType { .. }
            | FieldStrategy::DerivedBaseType { .. }
            | FieldStrategy::BaseSliceType { .. }
            | FieldStrategy::DerivedSliceType { .. }
            | FieldStrategy::Unsupported { .. } => None,
        }
    }
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::NoStrategy => f.write_str("no coding strategy applies"),
            UnsupportedReason::AliasCycle(chain) => {
                write!(f, "circular alias chain {}", chain.join(" -> "))
            }
            UnsupportedReason::PointerToSlice => f.write_str("pointer to slice"),
            UnsupportedReason::PointerElements => {
                f.write_str("slice of pointers to primitive values")
            }
        }
    }
}
