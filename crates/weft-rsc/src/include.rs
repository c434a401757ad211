//! Include scheduling: making every reference reachable from its owners.
//!
//! For each registered reference, the scheduler asks the pipeline to add an
//! explicit dependency edge from every owning entry to the resource, under
//! the reference's layer. All inclusions of a pass run concurrently and join
//! at a barrier; a single resource's failure does not block the others.

use std::path::PathBuf;

use futures::future::join_all;
use tracing::{debug, error};

use weft_graph::Layer;

use crate::diagnostics::Diagnostic;
use crate::pipeline::Compilation;

/// One resource to include under its owning entries.
#[derive(Debug, Clone)]
pub(crate) struct IncludeRequest {
    pub resource: PathBuf,
    pub entry_names: Vec<String>,
    pub layer: Layer,
}

/// Outcome of one pass's include barrier.
#[derive(Debug, Default)]
pub(crate) struct IncludeOutcome {
    /// Resources whose inclusion failed; the caller evicts them from the
    /// registry, which itself forces another pass.
    pub failed: Vec<PathBuf>,
    /// The compilation had no entries at all; the inclusion step could not
    /// proceed this pass.
    pub aborted: bool,
}

/// Run all include requests concurrently and wait for the barrier.
pub(crate) async fn include_all(
    compilation: &dyn Compilation,
    requests: Vec<IncludeRequest>,
) -> IncludeOutcome {
    if requests.is_empty() {
        return IncludeOutcome::default();
    }

    let known_entries: Vec<String> = compilation
        .entries()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    if known_entries.is_empty() {
        error!("no entries in the compilation; skipping reference inclusion");
        compilation.push_diagnostic(Diagnostic::no_entries());
        return IncludeOutcome {
            failed: Vec::new(),
            aborted: true,
        };
    }

    let results = join_all(
        requests
            .into_iter()
            .map(|request| include_one(compilation, &known_entries, request)),
    )
    .await;

    IncludeOutcome {
        failed: results.into_iter().flatten().collect(),
        aborted: false,
    }
}

/// Include one resource under every owning entry.
///
/// Returns the resource path on failure so the caller can evict it.
async fn include_one(
    compilation: &dyn Compilation,
    known_entries: &[String],
    request: IncludeRequest,
) -> Option<PathBuf> {
    let IncludeRequest {
        resource,
        entry_names,
        layer,
    } = request;

    let mut failed = false;
    for entry_name in entry_names
        .iter()
        .filter(|name| known_entries.contains(name))
    {
        match compilation
            .add_include(entry_name, &resource, layer)
            .await
        {
            Ok(Some(module)) => {
                module.write().record_including_entry(entry_name);
                compilation.mark_exports_used(&module, entry_name);
                debug!(
                    resource = %resource.display(),
                    entry = %entry_name,
                    layer = %layer,
                    "included reference"
                );
            }
            Ok(None) => {
                compilation.push_diagnostic(Diagnostic::module_not_added(&resource));
                failed = true;
            }
            Err(include_error) => {
                error!(
                    resource = %resource.display(),
                    entry = %entry_name,
                    error = %include_error,
                    "include dependency failed"
                );
                compilation.push_diagnostic(Diagnostic::include_failed(&resource, &include_error));
                failed = true;
            }
        }
    }

    failed.then_some(resource)
}
