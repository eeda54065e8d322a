//! Code snippets for the `bintly` wire library.
//!
//! Every function here stamps out Go source text from already-decided
//! parameters; no classification happens in this module. Field snippets are
//! indented one tab, ready to be placed inside a method body.

use std::fmt::Write as _;

use bintgen_catalog::{FieldDecl, Primitive};

use crate::naming::{coding_method, loop_index, pool_name, slice_coding_method};
use crate::{FieldDescriptor, FieldStrategy};

/// Header placed at the top of every generated file.
pub(crate) const GENERATED_HEADER: &str = "// Code generated by bintgen. DO NOT EDIT.";

/// Operation used for nested records.
const CODER_METHOD: &str = "Coder";

fn error_check(call: &str, indent: &str) -> String {
    format!("{indent}if err := {call}; err != nil {{\n{indent}\treturn err\n{indent}}}")
}

/// Encode statement(s) for one field. `None` for unsupported strategies.
pub(crate) fn encode(
    field: &FieldDecl,
    strategy: &FieldStrategy,
    desc: &FieldDescriptor,
    receiver: &str,
) -> Option<String> {
    let acc = &desc.accessor;
    let pointer = field.ty.pointer;
    let code = match strategy {
        FieldStrategy::BaseType { base } => {
            let method = coding_method(base.name(), pointer);
            format!("\tcoder.{method}({acc})")
        }
        FieldStrategy::DerivedBaseType { base, .. } => {
            let method = coding_method(base.name(), pointer);
            let deref = desc.dereference.unwrap_or_default();
            if pointer {
                format!("\tcoder.{method}(({deref}{base})({acc}))")
            } else {
                format!("\tcoder.{method}({base}({acc}))")
            }
        }
        FieldStrategy::BaseSliceType { element } => {
            let method = slice_coding_method(element.name());
            format!("\tcoder.{method}({acc})")
        }
        FieldStrategy::DerivedSliceType { base, .. } => {
            let method = slice_coding_method(base.name());
            format!("\tcoder.{method}(*(*[]{base})(unsafe.Pointer(&{acc})))")
        }
        FieldStrategy::StructType { .. } => {
            let addr = desc.address_of.unwrap_or_default();
            error_check(&format!("coder.{CODER_METHOD}({addr}{acc})"), "\t")
        }
        FieldStrategy::StructSliceType { .. } => {
            let size = &desc.transient;
            let i = loop_index(receiver);
            let addr = desc.component_address_of.unwrap_or_default();
            let mut code = String::new();
            let _ = writeln!(code, "\tvar {size} = len({acc})");
            let _ = writeln!(code, "\tcoder.Alloc(int32({size}))");
            let _ = writeln!(code, "\tfor {i} := 0; {i} < {size}; {i}++ {{");
            let _ = writeln!(
                code,
                "{}",
                error_check(&format!("coder.{CODER_METHOD}({addr}{acc}[{i}])"), "\t\t")
            );
            code.push_str("\t}");
            code
        }
        FieldStrategy::Unsupported { .. } => return None,
    };
    Some(code)
}

/// Decode statement(s) for one field, mirroring [`encode`]. `None` for
/// unsupported strategies.
pub(crate) fn decode(
    field: &FieldDecl,
    strategy: &FieldStrategy,
    desc: &FieldDescriptor,
    receiver: &str,
) -> Option<String> {
    let acc = &desc.accessor;
    let pointer = field.ty.pointer;
    let code = match strategy {
        FieldStrategy::BaseType { base } => {
            let method = coding_method(base.name(), pointer);
            format!("\tcoder.{method}(&{acc})")
        }
        FieldStrategy::DerivedBaseType { alias, base } => {
            let method = coding_method(base.name(), pointer);
            let var = &desc.transient;
            let deref = desc.dereference.unwrap_or_default();
            let assign = if pointer {
                format!("({deref}{alias})({var})")
            } else {
                format!("{alias}({var})")
            };
            format!("\tvar {var} {deref}{base}\n\tcoder.{method}(&{var})\n\t{acc} = {assign}")
        }
        FieldStrategy::BaseSliceType { element } => {
            let method = slice_coding_method(element.name());
            if field.ty.slice {
                format!("\tcoder.{method}(&{acc})")
            } else {
                // Named slice type: same underlying type, different name.
                format!("\tcoder.{method}((*[]{element})(&{acc}))")
            }
        }
        FieldStrategy::DerivedSliceType { base, .. } => {
            let method = slice_coding_method(base.name());
            format!("\tcoder.{method}((*[]{base})(unsafe.Pointer(&{acc})))")
        }
        FieldStrategy::StructType { record } => {
            let addr = desc.address_of.unwrap_or_default();
            let call = error_check(&format!("coder.{CODER_METHOD}({addr}{acc})"), "\t");
            if pointer {
                format!("\t{acc} = &{record}{{}}\n{call}")
            } else {
                call
            }
        }
        FieldStrategy::StructSliceType {
            record,
            pointer_element,
        } => {
            let size = &desc.transient;
            let i = loop_index(receiver);
            let addr = desc.component_address_of.unwrap_or_default();
            let slice_type = &desc.type_text;
            let mut code = String::new();
            let _ = writeln!(code, "\tvar {size} = int(coder.Alloc())");
            let _ = writeln!(code, "\t{acc} = make({slice_type}, {size})");
            let _ = writeln!(code, "\tfor {i} := 0; {i} < {size}; {i}++ {{");
            if *pointer_element {
                let _ = writeln!(code, "\t\t{acc}[{i}] = &{record}{{}}");
            }
            let _ = writeln!(
                code,
                "{}",
                error_check(&format!("coder.{CODER_METHOD}({addr}{acc}[{i}])"), "\t\t")
            );
            code.push_str("\t}");
            code
        }
        FieldStrategy::Unsupported { .. } => return None,
    };
    Some(code)
}

/// Packages the field's statements refer to, besides the wire library.
pub(crate) fn imports(field: &FieldDecl, strategy: &FieldStrategy) -> Vec<&'static str> {
    let mut imports = Vec::new();
    match strategy {
        FieldStrategy::DerivedSliceType { base, .. } => {
            imports.push("unsafe");
            if *base == Primitive::Time {
                imports.push("time");
            }
        }
        FieldStrategy::DerivedBaseType {
            base: Primitive::Time,
            ..
        } => imports.push("time"),
        // Named slices convert through `*[]time.Time`.
        FieldStrategy::BaseSliceType {
            element: Primitive::Time,
        } if !field.ty.slice => imports.push("time"),
        _ => {}
    }
    imports
}

/// Reset statement(s) for one field: pool release first, then the zero value.
pub(crate) fn reset(desc: &FieldDescriptor) -> String {
    let assign = format!("\t{} = {}", desc.accessor, desc.reset);
    match &desc.release {
        Some(release) => format!("{release}\n{assign}"),
        None => assign,
    }
}

/// The `EncodeBinary`/`DecodeBinary` method pair.
pub(crate) fn coder_methods(
    type_name: &str,
    receiver: &str,
    encodings: &[String],
    decodings: &[String],
) -> String {
    let mut code = String::new();
    let _ = writeln!(
        code,
        "func ({receiver} *{type_name}) EncodeBinary(coder *bintly.Writer) error {{"
    );
    for encoding in encodings {
        let _ = writeln!(code, "{encoding}");
    }
    code.push_str("\treturn nil\n}\n\n");

    let _ = writeln!(
        code,
        "func ({receiver} *{type_name}) DecodeBinary(coder *bintly.Reader) error {{"
    );
    for decoding in decodings {
        let _ = writeln!(code, "{decoding}");
    }
    code.push_str("\treturn nil\n}\n");
    code
}

/// The `Reset` method.
pub(crate) fn reset_method(type_name: &str, receiver: &str, resets: &[String]) -> String {
    let mut code = String::new();
    let _ = writeln!(code, "func ({receiver} *{type_name}) Reset() {{");
    for reset in resets {
        let _ = writeln!(code, "{reset}");
    }
    code.push_str("}\n");
    code
}

/// Instance pool for a record type.
pub(crate) fn pool_declaration(type_name: &str) -> String {
    let pool = pool_name(type_name);
    format!(
        "var {pool} = sync.Pool{{\n\tNew: func() interface{{}} {{\n\t\treturn &{type_name}{{}}\n\t}},\n}}\n"
    )
}

/// File prologue: header, package clause and import block.
pub(crate) fn file_prologue<'a>(package: &str, imports: impl Iterator<Item = &'a str>) -> String {
    let mut code = String::new();
    let _ = writeln!(code, "{GENERATED_HEADER}\n");
    let _ = writeln!(code, "package {package}\n");
    code.push_str("import (\n");
    for import in imports {
        let _ = writeln!(code, "\t\"{import}\"");
    }
    code.push_str(")\n");
    code
}
