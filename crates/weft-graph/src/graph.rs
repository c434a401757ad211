//! Module graph provider trait and the in-memory implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{Error, Module, Result, SharedModule};

/// Read access to the host pipeline's module graph.
///
/// The graph is owned by the pipeline; this trait exposes the two queries the
/// boundary-resolution plugin needs: enumerating modules and walking
/// reverse-import (issuer) edges.
pub trait ModuleGraph: Send + Sync {
    /// All modules currently in the compilation.
    fn modules(&self) -> Vec<SharedModule>;

    /// Look up a module by resource path.
    fn module(&self, resource: &Path) -> Option<SharedModule>;

    /// The module that imported `resource`, if the graph recorded one.
    ///
    /// A `None` answer means the resource is a root: either an entry module
    /// or a module unreachable through import edges.
    fn issuer_of(&self, resource: &Path) -> Option<SharedModule>;
}

#[derive(Default)]
struct GraphInner {
    modules: FxHashMap<PathBuf, SharedModule>,
    // child resource -> importer resource, one issuer per module
    issuers: FxHashMap<PathBuf, PathBuf>,
}

/// HashMap-backed [`ModuleGraph`] for hosts and tests.
///
/// Fully in-memory and `Arc`-shared, so handles stay cheap to clone across
/// hook callbacks.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    inner: Arc<RwLock<GraphInner>>,
}

impl MemoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, keyed by its resource path.
    ///
    /// Replaces any previous module with the same resource. Modules without a
    /// resource path cannot be stored in the graph.
    pub fn add_module(&self, module: Module) -> Result<SharedModule> {
        let resource = module
            .resource_path()
            .cloned()
            .ok_or_else(|| Error::InvalidModule("module has no resource path".into()))?;
        let shared = module.into_shared();
        self.inner
            .write()
            .modules
            .insert(resource, Arc::clone(&shared));
        Ok(shared)
    }

    /// Record that `importer` imported `resource`.
    pub fn set_issuer(&self, resource: impl Into<PathBuf>, importer: impl Into<PathBuf>) {
        self.inner
            .write()
            .issuers
            .insert(resource.into(), importer.into());
    }

    /// Remove a module and its issuer edge, as the host does when a source
    /// edit drops the module from the compilation.
    pub fn remove_module(&self, resource: &Path) -> Option<SharedModule> {
        let mut inner = self.inner.write();
        inner.issuers.remove(resource);
        inner.modules.remove(resource)
    }

    /// Number of modules in the graph.
    pub fn len(&self) -> usize {
        self.inner.read().modules.len()
    }

    /// Returns true when the graph holds no modules.
    pub fn is_empty(&self) -> bool {
        self.inner.read().modules.is_empty()
    }
}

impl ModuleGraph for MemoryGraph {
    fn modules(&self) -> Vec<SharedModule> {
        self.inner.read().modules.values().cloned().collect()
    }

    fn module(&self, resource: &Path) -> Option<SharedModule> {
        self.inner.read().modules.get(resource).cloned()
    }

    fn issuer_of(&self, resource: &Path) -> Option<SharedModule> {
        let inner = self.inner.read();
        let importer = inner.issuers.get(resource)?;
        inner.modules.get(importer).cloned()
    }
}
