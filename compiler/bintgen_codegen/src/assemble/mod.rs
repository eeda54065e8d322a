//! Coder assembly.
//!
//! `CoderAssembler` turns one record type into its `EncodeBinary` /
//! `DecodeBinary` pair: every field is classified, described and rendered in
//! declaration order, and nested record types get their own coders first
//! through the same memoized entry point.
//!
//! # Ordering
//!
//! Encode and decode fragments are produced from the same field walk, so the
//! decoder always consumes fields in exactly the order the encoder wrote
//! them. That order is the wire contract.

use bintgen_catalog::{FieldDecl, TypeCatalog, TypeKind};

use crate::naming::{receiver_alias, LocalScope};
use crate::snippet;
use crate::{
    classify, CodegenError, FieldDescriptor, FieldStrategy, GenerationSession, UnsupportedReason,
};

/// Minimum stack space to keep available before recursing into a nested
/// record (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Generator settings that shape the emitted code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoderConfig {
    /// Package clause override; defaults to the catalog's package.
    pub package: Option<String>,
    /// Tag key read for the key and omit-empty annotations in
    /// [`FieldDescriptor`]. The emitted code is positional and ignores them.
    pub tag_name: String,
    /// Also emit `Reset` methods and instance pools.
    pub reset: bool,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            package: None,
            tag_name: "json".to_string(),
            reset: false,
        }
    }
}

/// One field's contribution to a coder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldCoding {
    pub strategy: FieldStrategy,
    pub descriptor: FieldDescriptor,
    pub encode: String,
    pub decode: String,
}

/// A fully assembled coder for one record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coder {
    pub type_name: String,
    pub receiver: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldCoding>,
}

impl Coder {
    /// Render the coder's Go source.
    pub fn render(&self, reset: bool) -> String {
        let encodings: Vec<_> = self.fields.iter().map(|f| f.encode.clone()).collect();
        let decodings: Vec<_> = self.fields.iter().map(|f| f.decode.clone()).collect();
        let methods =
            snippet::coder_methods(&self.type_name, &self.receiver, &encodings, &decodings);
        if !reset {
            return methods;
        }

        let resets: Vec<_> = self
            .fields
            .iter()
            .map(|f| snippet::reset(&f.descriptor))
            .collect();
        format!(
            "{}\n{methods}\n{}",
            snippet::pool_declaration(&self.type_name),
            snippet::reset_method(&self.type_name, &self.receiver, &resets)
        )
    }
}

/// Builds coders for record types of one catalog.
pub struct CoderAssembler<'a> {
    catalog: &'a TypeCatalog,
    config: &'a CoderConfig,
}

impl<'a> CoderAssembler<'a> {
    pub fn new(catalog: &'a TypeCatalog, config: &'a CoderConfig) -> Self {
        Self { catalog, config }
    }

    /// Make sure `type_name` has a coder in `session`.
    ///
    /// Idempotent: a type that is already emitted, or still being assembled
    /// further up the call stack, returns immediately. On error nothing is
    /// added for the failing type and the run must be abandoned.
    #[tracing::instrument(level = "debug", skip(self, session))]
    pub fn ensure_coder(
        &self,
        session: &mut GenerationSession,
        type_name: &str,
    ) -> Result<(), CodegenError> {
        if session.is_emitted(type_name) {
            tracing::trace!("coder already emitted");
            return Ok(());
        }
        let fields = self.record_fields(type_name)?;
        let Some(slot) = session.begin(type_name) else {
            return Ok(());
        };
        if self.config.reset {
            session.add_import("sync");
        }

        let coder = self.assemble(session, type_name, fields)?;
        session.complete(slot, coder.render(self.config.reset));
        tracing::debug!(fields = fields.len(), "coder assembled");
        Ok(())
    }

    fn record_fields(&self, type_name: &str) -> Result<&'a [FieldDecl], CodegenError> {
        if let Some(fields) = self.catalog.record(type_name) {
            return Ok(fields);
        }
        if self.catalog.contains(type_name) {
            Err(CodegenError::NotARecord(type_name.to_string()))
        } else {
            Err(CodegenError::UnknownType(type_name.to_string()))
        }
    }

    fn assemble(
        &self,
        session: &mut GenerationSession,
        type_name: &str,
        fields: &[FieldDecl],
    ) -> Result<Coder, CodegenError> {
        let receiver = receiver_alias(type_name);
        let mut scope = LocalScope::new(receiver.clone());
        scope.reserve(type_name);
        self.reserve_referenced_types(&mut scope, fields);

        let mut codings = Vec::with_capacity(fields.len());
        for field in fields {
            codings.push(self.assemble_field(session, &mut scope, type_name, field)?);
        }
        Ok(Coder {
            type_name: type_name.to_string(),
            receiver,
            fields: codings,
        })
    }

    /// Keep locals clear of the type names the coder's statements may
    /// mention: declared field types and the components of named slices.
    fn reserve_referenced_types(&self, scope: &mut LocalScope, fields: &[FieldDecl]) {
        for field in fields {
            scope.reserve(field.ty.name.as_str());
            if let Some(TypeKind::Slice { component, .. }) =
                self.catalog.lookup(&field.ty.name).map(|def| &def.kind)
            {
                scope.reserve(component.as_str());
            }
        }
    }

    fn assemble_field(
        &self,
        session: &mut GenerationSession,
        scope: &mut LocalScope,
        owner: &str,
        field: &FieldDecl,
    ) -> Result<FieldCoding, CodegenError> {
        let strategy = classify(field, self.catalog).map_err(|missing| CodegenError::Lookup {
            name: missing.name,
            owner: owner.to_string(),
            field: field.name.clone(),
        })?;
        tracing::trace!(field = %field.name, strategy = strategy.kind(), "classified");

        if let FieldStrategy::Unsupported {
            type_name,
            field: name,
            reason,
        } = strategy
        {
            return Err(CodegenError::UnsupportedField {
                owner: owner.to_string(),
                field: name,
                type_name,
                reason,
            });
        }
        if let Some(record) = strategy.nested_record() {
            ensure_sufficient_stack(|| self.ensure_coder(session, record))?;
        }
        for import in snippet::imports(field, &strategy) {
            session.add_import(import);
        }

        let descriptor =
            FieldDescriptor::build_in(scope, field, &strategy, &self.config.tag_name);
        if self.config.reset && descriptor.reset.starts_with("time.") {
            session.add_import("time");
        }

        let receiver = scope.receiver();
        let encode = snippet::encode(field, &strategy, &descriptor, receiver);
        let decode = snippet::decode(field, &strategy, &descriptor, receiver);
        let (Some(encode), Some(decode)) = (encode, decode) else {
            return Err(CodegenError::UnsupportedField {
                owner: owner.to_string(),
                field: field.name.clone(),
                type_name: field.ty.to_string(),
                reason: UnsupportedReason::NoStrategy,
            });
        };
        Ok(FieldCoding {
            strategy,
            descriptor,
            encode,
            decode,
        })
    }
}

/// Run `f`, growing the stack first if little of it is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Generate coders for `roots` and everything they reach.
///
/// Returns the complete output unit: header, package clause, imports and one
/// coder per reachable record type in first-discovered order.
#[tracing::instrument(level = "debug", skip_all, fields(
    package = catalog.package(),
    roots = roots.len(),
))]
pub fn generate<S: AsRef<str>>(
    catalog: &TypeCatalog,
    roots: &[S],
    config: &CoderConfig,
) -> Result<String, CodegenError> {
    let package = config.package.as_deref().unwrap_or(catalog.package());
    let mut session = GenerationSession::new(package);
    let assembler = CoderAssembler::new(catalog, config);

    for root in roots {
        assembler.ensure_coder(&mut session, root.as_ref())?;
    }
    tracing::debug!(coders = session.len(), "generation complete");
    session.finalize()
}
