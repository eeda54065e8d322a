//! Generation session state.
//!
//! The `GenerationSession` holds everything one generation run accumulates:
//! which record types already have a coder (or are being built), the coder
//! text in first-discovered order, and the imports the emitted code needs.
//! It is owned by the run and passed explicitly to every recursive call.
//!
//! # Slots
//!
//! A type is reserved the moment its construction begins, not when it
//! finishes. The reservation is a slot in the output list, so a type
//! referenced again while still under construction is already "emitted" and
//! the output keeps first-discovered order even though nested coders finish
//! first.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::snippet::file_prologue;
use crate::CodegenError;

/// Import path of the wire library every coder depends on.
pub const WIRE_LIBRARY: &str = "github.com/viant/bintly";

/// Handle to a reserved output slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

#[derive(Clone, Debug)]
enum Slot {
    Pending { type_name: String },
    Done(String),
}

/// Per-run accumulator of coders, imports and memo state.
#[derive(Clone, Debug)]
pub struct GenerationSession {
    /// Package clause of the output.
    package: String,
    /// Type name → its output slot.
    memo: FxHashMap<String, SlotId>,
    /// Output fragments, in first-discovered order.
    slots: Vec<Slot>,
    /// Required imports (sorted on output).
    imports: BTreeSet<String>,
}

impl GenerationSession {
    /// Create a session for `package`. The wire library is always imported.
    pub fn new(package: impl Into<String>) -> Self {
        let mut imports = BTreeSet::new();
        imports.insert(WIRE_LIBRARY.to_string());
        Self {
            package: package.into(),
            memo: FxHashMap::default(),
            slots: Vec::new(),
            imports,
        }
    }

    /// Check whether a coder for `type_name` exists or is being built.
    #[inline]
    pub fn is_emitted(&self, type_name: &str) -> bool {
        self.memo.contains_key(type_name)
    }

    /// Reserve the output slot for `type_name`, marking it emitted.
    ///
    /// Returns `None` if the type was already reserved.
    pub fn begin(&mut self, type_name: &str) -> Option<SlotId> {
        if self.is_emitted(type_name) {
            return None;
        }
        let slot = SlotId(self.slots.len());
        self.slots.push(Slot::Pending {
            type_name: type_name.to_string(),
        });
        self.memo.insert(type_name.to_string(), slot);
        Some(slot)
    }

    /// Fill a reserved slot with the finished coder text.
    pub fn complete(&mut self, slot: SlotId, code: String) {
        debug_assert!(
            matches!(self.slots.get(slot.0), Some(Slot::Pending { .. })),
            "slot completed twice"
        );
        if let Some(entry) = self.slots.get_mut(slot.0) {
            *entry = Slot::Done(code);
        }
    }

    /// Require an import in the output.
    pub fn add_import(&mut self, path: impl Into<String>) {
        self.imports.insert(path.into());
    }

    /// Required imports, sorted.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// Reserved type names in first-discovered order.
    pub fn emitted_types(&self) -> impl Iterator<Item = &str> {
        let mut ordered: Vec<_> = self.memo.iter().collect();
        ordered.sort_by_key(|(_, slot)| slot.0);
        ordered.into_iter().map(|(name, _)| name.as_str())
    }

    /// Number of reserved coders.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Concatenate prologue and coders into one output unit.
    ///
    /// Fails if a reserved slot was never completed.
    pub fn finalize(self) -> Result<String, CodegenError> {
        let mut output = file_prologue(&self.package, self.imports());
        for slot in self.slots {
            match slot {
                Slot::Done(code) => {
                    output.push('\n');
                    output.push_str(&code);
                }
                Slot::Pending { type_name } => {
                    return Err(CodegenError::IncompleteCoder(type_name));
                }
            }
        }
        Ok(output)
    }
}
