//! Primitive (base) types understood by the wire library.

use std::fmt;

/// A wire-representable base type.
///
/// The wire library has a read/write operation for each of these, by value,
/// by pointer and as a slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Bool,
    /// `time.Time`
    Time,
}

impl Primitive {
    /// Every primitive, in declaration order.
    pub const ALL: [Primitive; 15] = [
        Primitive::Int,
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::Uint,
        Primitive::Uint8,
        Primitive::Uint16,
        Primitive::Uint32,
        Primitive::Uint64,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::String,
        Primitive::Bool,
        Primitive::Time,
    ];

    /// Look up a primitive by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        let prim = match name {
            "int" => Primitive::Int,
            "int8" => Primitive::Int8,
            "int16" => Primitive::Int16,
            "int32" => Primitive::Int32,
            "int64" => Primitive::Int64,
            "uint" => Primitive::Uint,
            "uint8" => Primitive::Uint8,
            "uint16" => Primitive::Uint16,
            "uint32" => Primitive::Uint32,
            "uint64" => Primitive::Uint64,
            "float32" => Primitive::Float32,
            "float64" => Primitive::Float64,
            "string" => Primitive::String,
            "bool" => Primitive::Bool,
            "time.Time" => Primitive::Time,
            _ => return None,
        };
        Some(prim)
    }

    /// Source name of the primitive, as it appears in declarations.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Uint => "uint",
            Primitive::Uint8 => "uint8",
            Primitive::Uint16 => "uint16",
            Primitive::Uint32 => "uint32",
            Primitive::Uint64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::Time => "time.Time",
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Primitive::Int
                | Primitive::Int8
                | Primitive::Int16
                | Primitive::Int32
                | Primitive::Int64
                | Primitive::Uint
                | Primitive::Uint8
                | Primitive::Uint16
                | Primitive::Uint32
                | Primitive::Uint64
        )
    }

    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, Primitive::Float32 | Primitive::Float64)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for prim in Primitive::ALL {
            assert_eq!(Primitive::from_name(prim.name()), Some(prim));
        }
    }

    #[test]
    fn unknown_names_are_not_primitive() {
        assert_eq!(Primitive::from_name("Time"), None);
        assert_eq!(Primitive::from_name("byte"), None);
        assert_eq!(Primitive::from_name("[]int"), None);
        assert_eq!(Primitive::from_name("*int"), None);
    }

    #[test]
    fn numeric_categories() {
        assert!(Primitive::Uint16.is_integer());
        assert!(!Primitive::Uint16.is_float());
        assert!(Primitive::Float64.is_float());
        assert!(!Primitive::Time.is_integer());
        assert!(!Primitive::String.is_float());
    }
}
