//! Abstraction over the host compilation pipeline.
//!
//! The plugin is driven entirely by the pipeline's phase callbacks and never
//! spawns control flow of its own. This trait captures the operations those
//! callbacks need: entry enumeration, explicit include dependencies, export
//! usage marking, diagnostics, and asset emission.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use weft_graph::{Layer, ModuleGraph, SharedModule};

use crate::diagnostics::Diagnostic;

/// Error reported by the pipeline when an include dependency cannot be added.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IncludeError {
    /// The named entry does not exist in the compilation.
    #[error("unknown entry `{0}`")]
    UnknownEntry(String),

    /// The dependency add itself failed.
    #[error("failed to add include for {resource}: {message}")]
    AddFailed { resource: PathBuf, message: String },
}

/// Host compilation pipeline, as consumed by the plugin.
///
/// Implementations use interior mutability: hook callbacks run sequentially
/// on the compilation thread, so shared handles are mutated without locking
/// contention.
#[async_trait]
pub trait Compilation: Send + Sync {
    /// The compilation's module graph.
    fn graph(&self) -> &dyn ModuleGraph;

    /// Current entries as `(entry_name, entry_path)` pairs.
    fn entries(&self) -> Vec<(String, PathBuf)>;

    /// Add an explicit dependency from `entry_name` to `resource` under the
    /// given layer.
    ///
    /// Resolves to the produced module, `Ok(None)` when the pipeline completed
    /// without producing one, or an error when the dependency add failed.
    async fn add_include(
        &self,
        entry_name: &str,
        resource: &Path,
        layer: Layer,
    ) -> Result<Option<SharedModule>, IncludeError>;

    /// Mark all of a module's exports as used by `entry_name`, preventing
    /// dead-code elimination of boundary exports whose usage is only known at
    /// runtime.
    fn mark_exports_used(&self, module: &SharedModule, entry_name: &str);

    /// Push a diagnostic onto the compilation's collection.
    fn push_diagnostic(&self, diagnostic: Diagnostic);

    /// Emit a build output artifact.
    fn emit_asset(&self, filename: &str, contents: Vec<u8>);
}
