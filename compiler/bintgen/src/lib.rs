//! bintgen: binary coder generator.
//!
//! Reads a package manifest describing Go record types and writes one
//! `EncodeBinary`/`DecodeBinary` pair per requested type (and every record
//! type it reaches) for the `github.com/viant/bintly` wire library.
//!
//! The binary is a thin wrapper around [`run`]; everything it does is
//! available here for embedding and tests.

use std::path::PathBuf;
use std::sync::Once;

use bintgen_catalog::{CatalogError, PackageManifest};
use bintgen_codegen::{generate, write_output, CodegenError, CoderConfig};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=bintgen_codegen=debug`
/// or `RUST_LOG=bintgen_codegen=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Command-line options.
#[derive(clap::Parser, Clone, Debug, PartialEq, Eq)]
#[command(name = "bintgen")]
#[command(about = "Generate bintly binary coders for Go record types.", long_about = None)]
pub struct Options {
    /// Package manifest (JSON) describing the source types.
    #[arg(long)]
    pub manifest: PathBuf,

    /// Root record type to generate a coder for. Repeatable.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Output file. Prints to stdout when omitted.
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Package clause of the output; defaults to the manifest's package.
    #[arg(long)]
    pub package: Option<String>,

    /// Tag key read for field keys and omit-empty options.
    ///
    /// The bintly encoding is positional, so this only changes the field
    /// metadata exposed to library callers, never the generated code.
    #[arg(long, default_value = "json")]
    pub tag: String,

    /// Also emit `Reset` methods and instance pools.
    #[arg(long, default_value_t = false)]
    pub reset: bool,
}

/// Invalid option combinations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("at least one --type is required")]
    NoTypes,

    #[error("manifest '{}' does not exist", .0.display())]
    MissingManifest(PathBuf),

    #[error("--tag must not be empty")]
    EmptyTag,

    #[error("'{0}' is not a valid package name")]
    InvalidPackage(String),
}

/// Anything that stops a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl Options {
    /// Check the options before any work is done.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.types.is_empty() {
            return Err(OptionsError::NoTypes);
        }
        if !self.manifest.is_file() {
            return Err(OptionsError::MissingManifest(self.manifest.clone()));
        }
        if self.tag.trim().is_empty() {
            return Err(OptionsError::EmptyTag);
        }
        if let Some(package) = &self.package {
            if !is_identifier(package) {
                return Err(OptionsError::InvalidPackage(package.clone()));
            }
        }
        Ok(())
    }

    /// Generator settings derived from the options.
    pub fn coder_config(&self) -> CoderConfig {
        CoderConfig {
            package: self.package.clone(),
            tag_name: self.tag.clone(),
            reset: self.reset,
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Generate the output unit for `options` without writing it.
#[tracing::instrument(level = "debug", skip_all, fields(manifest = %options.manifest.display()))]
pub fn render(options: &Options) -> Result<String, Error> {
    options.validate()?;
    let catalog = PackageManifest::load(&options.manifest)?.into_catalog()?;
    tracing::debug!(types = catalog.len(), package = catalog.package(), "catalog loaded");
    Ok(generate(&catalog, &options.types, &options.coder_config())?)
}

/// Generate and write the output unit for `options`.
///
/// Nothing is written if any step fails.
pub fn run(options: &Options) -> Result<(), Error> {
    let unit = render(options)?;
    write_output(&unit, options.dest.as_deref())?;
    Ok(())
}

#[cfg(test)]
mod tests;
