//! Binary coder generation for bintgen.
//!
//! Given a [`TypeCatalog`](bintgen_catalog::TypeCatalog) and a list of root
//! record types, this crate decides per field which wire strategy applies and
//! assembles one `EncodeBinary`/`DecodeBinary` pair per reachable record
//! type, targeting the `github.com/viant/bintly` wire library.
//!
//! # Architecture
//!
//! ```text
//!  TypeCatalog + root types
//!          ↓
//!   CoderAssembler::ensure_coder   (recursive, memoized per type)
//!     ├─ classify                  (FieldDecl → FieldStrategy)
//!     ├─ FieldDescriptor::build    (modifiers, reset, pool release)
//!     └─ snippet                   (strategy → encode/decode text)
//!          ↓
//!   GenerationSession::finalize    (package + imports + coders)
//! ```

mod assemble;
mod classify;
mod descriptor;
mod error;
mod naming;
mod session;
mod sink;
mod snippet;
mod strategy;

pub use assemble::{generate, Coder, CoderAssembler, CoderConfig, FieldCoding};
pub use classify::classify;
pub use descriptor::{parse_tag, FieldDescriptor, TagInfo};
pub use error::CodegenError;
pub use naming::{coding_method, receiver_alias, slice_coding_method, titlecase, LocalScope};
pub use session::{GenerationSession, SlotId, WIRE_LIBRARY};
pub use sink::write_output;
pub use strategy::{FieldStrategy, UnsupportedReason};
