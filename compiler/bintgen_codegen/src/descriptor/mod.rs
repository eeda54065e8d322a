//! Field descriptors.
//!
//! A `FieldDescriptor` gathers everything the snippets need to emit one
//! field: how to reach it, which modifiers its encode/decode calls need, what
//! it resets to, and which pooled instances it releases. Descriptors are built
//! once per field while assembling a coder and dropped afterwards.

mod tag;

pub use tag::{parse_tag, TagInfo};

use bintgen_catalog::{FieldDecl, Primitive};

use crate::naming::{loop_index, pool_name, LocalScope};
use crate::FieldStrategy;

const DEREFERENCE: &str = "*";
const ADDRESS_OF: &str = "&";
const ABSENT: &str = "nil";

/// Derived emission data for one classified field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Access path, `receiver.Field`.
    pub accessor: String,
    /// Local variable used by multi-statement snippets.
    pub transient: String,
    /// Declared type as written (`[]*Item`).
    pub type_text: String,
    /// `*` when the field is a pointer.
    pub dereference: Option<&'static str>,
    /// `&` when the field is not a pointer.
    pub address_of: Option<&'static str>,
    /// `*` when slice elements are pointers.
    pub component_dereference: Option<&'static str>,
    /// `&` when slice elements are values.
    pub component_address_of: Option<&'static str>,
    /// Literal assigned on reset.
    pub reset: String,
    /// Statement returning pooled instances before reset.
    pub release: Option<String>,
    /// The tag asks for the field to be omitted when empty.
    pub omit_empty: bool,
    /// Wire key: tag-provided, else the field name.
    pub key: String,
    /// Embedded field.
    pub anonymous: bool,
}

impl FieldDescriptor {
    /// Build the descriptor for a lone field, owned by a record whose methods
    /// use `receiver`, classified as `strategy`.
    pub fn build(
        receiver: &str,
        field: &FieldDecl,
        strategy: &FieldStrategy,
        tag_name: &str,
    ) -> Self {
        Self::build_in(&mut LocalScope::new(receiver), field, strategy, tag_name)
    }

    /// Build the descriptor for one field of a coder, claiming its transient
    /// local from `scope`.
    pub fn build_in(
        scope: &mut LocalScope,
        field: &FieldDecl,
        strategy: &FieldStrategy,
        tag_name: &str,
    ) -> Self {
        let transient = scope.claim(&field.name);
        let receiver = scope.receiver();
        let ty = &field.ty;
        let accessor = format!("{receiver}.{}", field.name);
        let tag = parse_tag(&field.tag, tag_name);

        // Named slice types carry their element shape in the strategy.
        let pointer_component = match strategy {
            FieldStrategy::StructSliceType {
                pointer_element, ..
            } => *pointer_element,
            _ => ty.pointer_component,
        };

        let release = release_fragment(strategy, ty.pointer, &accessor, receiver);

        Self {
            name: field.name.clone(),
            transient,
            type_text: ty.to_string(),
            dereference: ty.pointer.then_some(DEREFERENCE),
            address_of: (!ty.pointer).then_some(ADDRESS_OF),
            component_dereference: pointer_component.then_some(DEREFERENCE),
            component_address_of: (!pointer_component).then_some(ADDRESS_OF),
            reset: reset_literal(strategy, ty.pointer || ty.slice),
            release,
            omit_empty: tag.omit_empty,
            key: tag.key.unwrap_or_else(|| field.name.clone()),
            anonymous: field.anonymous,
            accessor,
        }
    }
}

/// Zero value to assign on reset.
///
/// Pointers and slices always reset to `nil` so a reset never allocates.
fn reset_literal(strategy: &FieldStrategy, indirect: bool) -> String {
    if indirect || strategy.is_slice() {
        return ABSENT.to_string();
    }
    match strategy {
        FieldStrategy::BaseType { base } => primitive_zero(*base).to_string(),
        // Untyped constants convert implicitly; a struct literal does not.
        FieldStrategy::DerivedBaseType {
            alias,
            base: Primitive::Time,
        } => format!("{alias}{{}}"),
        FieldStrategy::DerivedBaseType { base, .. } => primitive_zero(*base).to_string(),
        FieldStrategy::StructType { record } => format!("{record}{{}}"),
        FieldStrategy::BaseSliceType { .. }
        | FieldStrategy::DerivedSliceType { .. }
        | FieldStrategy::StructSliceType { .. }
        | FieldStrategy::Unsupported { .. } => ABSENT.to_string(),
    }
}

fn primitive_zero(base: Primitive) -> &'static str {
    match base {
        Primitive::Int
        | Primitive::Int8
        | Primitive::Int16
        | Primitive::Int32
        | Primitive::Int64
        | Primitive::Uint
        | Primitive::Uint8
        | Primitive::Uint16
        | Primitive::Uint32
        | Primitive::Uint64 => "0",
        Primitive::Float32 | Primitive::Float64 => "0.0",
        Primitive::String => r#""""#,
        Primitive::Bool => "false",
        Primitive::Time => "time.Time{}",
    }
}

/// Pool release for heap-allocated records reachable from the field.
///
/// Only pointer-to-record fields and slices of records release anything.
/// The element modifier comes from the element shape, not the field's own
/// pointer flag.
fn release_fragment(
    strategy: &FieldStrategy,
    pointer: bool,
    accessor: &str,
    receiver: &str,
) -> Option<String> {
    match strategy {
        FieldStrategy::StructType { record } if pointer => {
            let pool = pool_name(record);
            Some(format!(
                "\tif {accessor} != nil {{\n\t\t{pool}.Put({accessor})\n\t}}"
            ))
        }
        FieldStrategy::StructSliceType {
            record,
            pointer_element,
        } => {
            let pool = pool_name(record);
            let index = loop_index(receiver);
            let modifier = if *pointer_element { "" } else { ADDRESS_OF };
            Some(format!(
                "\tfor {index} := range {accessor} {{\n\t\t{pool}.Put({modifier}{accessor}[{index}])\n\t}}"
            ))
        }
        _ => None,
    }
}
