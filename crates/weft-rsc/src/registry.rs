//! Persistent client/server reference registry.
//!
//! Two maps keyed by resource path that accumulate across compilation
//! passes. The registry is the single writer for the reference records it
//! holds: `ssr_id` patching goes through [`ReferenceRegistry::patch_ssr_id`]
//! rather than mutating shared object graphs from the outside.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use weft_graph::{BuildInfo, ClientReference, ModuleId};

/// Accumulated boundary references, keyed by resource path.
///
/// Invariants:
/// - a resource appears in at most one of the client/server maps (boundary
///   type is exclusive);
/// - insertion is idempotent: a resource already present is never silently
///   overwritten, and change is only flagged on first observation.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    client: FxHashMap<PathBuf, Vec<ClientReference>>,
    server: FxHashMap<PathBuf, Vec<String>>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a boundary observed during the graph scan.
    ///
    /// Returns true when the observation changed the registry (first
    /// observation of the resource). Observations that would violate the
    /// exclusivity invariant are rejected with a warning.
    pub fn observe(&mut self, build_info: &BuildInfo) -> bool {
        let resource = build_info.resource_path().to_path_buf();
        match build_info {
            BuildInfo::Client { references, .. } => {
                if self.server.contains_key(&resource) {
                    warn!(
                        resource = %resource.display(),
                        "ignoring client boundary for a resource already registered as server"
                    );
                    return false;
                }
                if self.client.contains_key(&resource) {
                    return false;
                }
                self.client.insert(resource, references.clone());
                true
            }
            BuildInfo::Server { export_names, .. } => {
                if self.client.contains_key(&resource) {
                    warn!(
                        resource = %resource.display(),
                        "ignoring server boundary for a resource already registered as client"
                    );
                    return false;
                }
                if self.server.contains_key(&resource) {
                    return false;
                }
                self.server.insert(resource, export_names.clone());
                true
            }
        }
    }

    /// Registered client reference resources.
    pub fn client_resources(&self) -> impl Iterator<Item = &PathBuf> {
        self.client.keys()
    }

    /// Registered server reference resources.
    pub fn server_resources(&self) -> impl Iterator<Item = &PathBuf> {
        self.server.keys()
    }

    pub fn contains_client(&self, resource: &Path) -> bool {
        self.client.contains_key(resource)
    }

    pub fn contains_server(&self, resource: &Path) -> bool {
        self.server.contains_key(resource)
    }

    /// Client references recorded for a resource.
    pub fn client_references(&self, resource: &Path) -> Option<&[ClientReference]> {
        self.client.get(resource).map(Vec::as_slice)
    }

    /// Server action export names recorded for a resource.
    pub fn server_exports(&self, resource: &Path) -> Option<&[String]> {
        self.server.get(resource).map(Vec::as_slice)
    }

    /// Remove a resource from whichever map holds it, after a failed
    /// inclusion. Returns true when something was evicted.
    pub fn evict(&mut self, resource: &Path) -> bool {
        self.client.remove(resource).is_some() || self.server.remove(resource).is_some()
    }

    /// Patch every client reference of `resource` with the server-side module
    /// id. Returns false when the resource has no registry entry.
    pub fn patch_ssr_id(&mut self, resource: &Path, id: &ModuleId) -> bool {
        let Some(references) = self.client.get_mut(resource) else {
            return false;
        };
        for reference in references {
            reference.ssr_id = Some(id.clone());
        }
        true
    }

    /// The set of all registered resource paths, for convergence diffing.
    pub fn snapshot(&self) -> FxHashSet<PathBuf> {
        self.client
            .keys()
            .chain(self.server.keys())
            .cloned()
            .collect()
    }

    /// Clone of the client map, for publication to the shared data store.
    pub fn client_map(&self) -> FxHashMap<PathBuf, Vec<ClientReference>> {
        self.client.clone()
    }

    /// Clone of the server map, for publication to the shared data store.
    pub fn server_map(&self) -> FxHashMap<PathBuf, Vec<String>> {
        self.server.clone()
    }

    /// Total number of registered references.
    pub fn len(&self) -> usize {
        self.client.len() + self.server.len()
    }

    pub fn is_empty(&self) -> bool {
        self.client.is_empty() && self.server.is_empty()
    }
}
