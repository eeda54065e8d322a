//! Identifier derivation for generated code.
//!
//! The wire library names its operations after the Go type they code, so
//! these rules must stay bit-exact: `int32` → `Int32`, `*int32` → `Int32Ptr`,
//! `[]int32` → `Int32s`, `time.Time` → `Time`.

use bintgen_catalog::Primitive;
use heck::ToLowerCamelCase;
use rustc_hash::FxHashSet;

/// Go keywords and predeclared names that generated locals must not shadow.
const RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "coder", "err", "i", "j", "nil",
    "len", "make", "unsafe", "time", "byte", "rune", "error", "true", "false", "new",
    "append", "cap", "copy",
];

const TIME_QUALIFIER: &str = "time.";

/// Uppercase the first letter of every word, where a word starts after any
/// character that is not a letter, digit or underscore.
pub fn titlecase(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    result
}

/// Wire operation for a scalar of type `base`.
pub fn coding_method(base: &str, pointer: bool) -> String {
    let mut method = titlecase(base.strip_prefix(TIME_QUALIFIER).unwrap_or(base));
    if pointer {
        method.push_str("Ptr");
    }
    method
}

/// Wire operation for a slice of `element`.
///
/// Titlecases the `[]element` spelling, drops the two-character slice prefix
/// and pluralizes.
pub fn slice_coding_method(element: &str) -> String {
    let element = element.strip_prefix(TIME_QUALIFIER).unwrap_or(element);
    let spelled = titlecase(&format!("[]{element}"));
    let mut method: String = spelled.chars().skip(2).collect();
    method.push('s');
    method
}

/// Receiver variable for a record's methods: its first letter, lowercased.
pub fn receiver_alias(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "r".to_string())
}

/// Local identifiers in use within one coder's methods.
///
/// A local must not shadow the receiver, a Go keyword or predeclared name,
/// another local, or any type name the coder refers to.
#[derive(Clone, Debug)]
pub struct LocalScope {
    receiver: String,
    taken: FxHashSet<String>,
}

impl LocalScope {
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            taken: FxHashSet::default(),
        }
    }

    /// Receiver variable of the coder's methods.
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Keep `name` free of locals, typically a type referenced by the coder.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    /// Claim a fresh local derived from a field name.
    ///
    /// Tries the lower-camel field name, then `<name>Value`, then
    /// `<name>Value2`, `<name>Value3` and so on.
    pub fn claim(&mut self, field: &str) -> String {
        let name = field.to_lower_camel_case();
        let mut candidate = name.clone();
        let mut suffix = 1;
        while !self.is_free(&candidate) {
            candidate = if suffix == 1 {
                format!("{name}Value")
            } else {
                format!("{name}Value{suffix}")
            };
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    fn is_free(&self, candidate: &str) -> bool {
        !candidate.is_empty()
            && candidate != self.receiver
            && !RESERVED.contains(&candidate)
            && Primitive::from_name(candidate).is_none()
            && !self.taken.contains(candidate)
    }
}

/// Loop index that does not collide with the receiver.
pub(crate) fn loop_index(receiver: &str) -> &'static str {
    if receiver == "i" {
        "j"
    } else {
        "i"
    }
}

/// Name of the instance pool for a record type.
pub(crate) fn pool_name(record: &str) -> String {
    format!("{}Pool", record.to_lower_camel_case())
}
