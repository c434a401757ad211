//! # weft-rsc
//!
//! Server/client reference resolution for React Server Components builds.
//!
//! For every module in the compilation's graph, this crate determines whether
//! it crosses a server/client boundary, which entry points own it, and keeps
//! including newly discovered boundary modules until the reference graph
//! reaches a fixed point. It plugs into a host bundler pipeline through the
//! [`Compilation`] trait and the hook methods on [`RscServerPlugin`]; it does
//! not bundle, transform, or write assets itself.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rustc_hash::FxHashMap;
//! use std::path::PathBuf;
//! use weft_rsc::{Compilation, RscServerPlugin, RscServerPluginOptions};
//!
//! # async fn run(compilation: &dyn Compilation) -> weft_rsc::Result<()> {
//! let mut entry_path_to_name = FxHashMap::default();
//! entry_path_to_name.insert(PathBuf::from("src/main.ts"), "main".to_string());
//!
//! let mut plugin = RscServerPlugin::new(RscServerPluginOptions {
//!     manifest_filename: None,
//!     entry_path_to_name,
//! })?;
//!
//! loop {
//!     plugin.finish_make(compilation).await?;
//!     plugin.module_ids_assigned(compilation);
//!     plugin.emit_assets(compilation)?;
//!     if !plugin.needs_additional_pass()? {
//!         break;
//!     }
//! }
//! plugin.build_complete();
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod entries;
mod include;
pub mod manifest;
pub mod pass;
pub mod pipeline;
pub mod plugin;
pub mod registry;
pub mod shared_data;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSeverity};
pub use entries::{EntryCache, EntryInfo, EntryOwnership};
pub use manifest::{DEFAULT_MANIFEST_FILENAME, ServerManifest, ServerManifestEntry};
pub use pass::{MAX_ADDITIONAL_PASSES, PassController};
pub use pipeline::{Compilation, IncludeError};
pub use plugin::{RscServerPlugin, RscServerPluginOptions};
pub use registry::ReferenceRegistry;
pub use shared_data::SharedData;

// Re-export the graph foundation for plugin hosts
pub use weft_graph::{
    BuildInfo, ClientReference, Layer, MemoryGraph, Module, ModuleGraph, ModuleId, SharedModule,
    find_root_issuer,
};

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
pub mod logging;

/// Error types for weft-rsc operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fixed-point loop did not converge within the pass cap.
    #[error("Reference resolution did not converge after {0} additional passes")]
    PassLimitExceeded(usize),

    /// Invalid configuration provided at construction.
    #[error("Invalid configuration: {0}")]
    InvalidOptions(String),

    /// Manifest serialization failed.
    #[error("Manifest serialization failed: {0}")]
    ManifestSerialization(#[from] serde_json::Error),

    /// Error from the graph foundation crate.
    #[error("Foundation error: {0}")]
    Foundation(#[from] weft_graph::Error),
}

/// Result type alias for weft-rsc operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::PassLimitExceeded(_) => "PASS_LIMIT_EXCEEDED",
            Error::InvalidOptions(_) => "INVALID_OPTIONS",
            Error::ManifestSerialization(_) => "MANIFEST_SERIALIZATION",
            Error::Foundation(_) => "FOUNDATION_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::PassLimitExceeded(max) => Some(Box::new(format!(
                "The server/client reference graph kept discovering new boundaries for {} passes.\nThis usually indicates boundary metadata that changes on every pass; inspect the build's diagnostics for evicted references.",
                max
            ))),
            Error::InvalidOptions(msg) => Some(Box::new(format!(
                "Check the plugin options supplied at construction.\nError: {}",
                msg
            ))),
            _ => None,
        }
    }
}
