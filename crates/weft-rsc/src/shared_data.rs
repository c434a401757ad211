//! Cross-cutting data store shared with other pipeline stages.
//!
//! The server build publishes boundary build info, the final reference maps
//! and the collected stylesheet set here; the client build's plugins and the
//! SSR middleware read them. Mutated only from the compilation thread's
//! sequential callbacks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use weft_graph::{BuildInfo, ClientReference};

#[derive(Default)]
struct SharedDataInner {
    build_infos: FxHashMap<PathBuf, BuildInfo>,
    client_references: FxHashMap<PathBuf, Vec<ClientReference>>,
    server_references: FxHashMap<PathBuf, Vec<String>>,
    styles: FxHashSet<PathBuf>,
}

/// Cheap-to-clone handle to the shared store.
#[derive(Clone, Default)]
pub struct SharedData {
    inner: Arc<RwLock<SharedDataInner>>,
}

impl SharedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish boundary build info for a resource.
    pub fn publish_build_info(&self, resource: PathBuf, build_info: BuildInfo) {
        self.inner.write().build_infos.insert(resource, build_info);
    }

    /// Published build info for a resource.
    pub fn build_info(&self, resource: &Path) -> Option<BuildInfo> {
        self.inner.read().build_infos.get(resource).cloned()
    }

    /// Publish the final reference maps at the end of a build.
    pub fn publish_references(
        &self,
        client: FxHashMap<PathBuf, Vec<ClientReference>>,
        server: FxHashMap<PathBuf, Vec<String>>,
    ) {
        let mut inner = self.inner.write();
        inner.client_references = client;
        inner.server_references = server;
    }

    /// Published client references for a resource.
    pub fn client_references(&self, resource: &Path) -> Option<Vec<ClientReference>> {
        self.inner.read().client_references.get(resource).cloned()
    }

    /// Published server action exports for a resource.
    pub fn server_exports(&self, resource: &Path) -> Option<Vec<String>> {
        self.inner.read().server_references.get(resource).cloned()
    }

    /// Record a stylesheet resource seen during the graph scan.
    pub fn add_style(&self, resource: PathBuf) {
        self.inner.write().styles.insert(resource);
    }

    /// All stylesheet resources collected so far.
    pub fn styles(&self) -> Vec<PathBuf> {
        self.inner.read().styles.iter().cloned().collect()
    }
}
