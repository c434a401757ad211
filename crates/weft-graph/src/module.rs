//! Module handles shared between the host pipeline and the plugin.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{BuildInfo, Layer, ModuleId};

/// Shared handle to a pipeline-owned module.
///
/// The pipeline creates and destroys modules; the plugin only reads and
/// augments the metadata slots. All mutation happens from the compilation
/// thread's sequential hook callbacks.
pub type SharedModule = Arc<RwLock<Module>>;

/// A module in the compilation, as seen by the boundary-resolution plugin.
///
/// Carries the stable resource path, the layer the module was included under,
/// the bundler-assigned id (absent until chunk-graph finalization), the
/// boundary build metadata attached upstream, and the names of the entries
/// that explicitly included it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    resource_path: Option<PathBuf>,
    layer: Layer,
    id: Option<ModuleId>,
    build_info: Option<BuildInfo>,
    included_by: Vec<String>,
}

impl Module {
    /// Create a module handle for a resource in the default layer.
    pub fn new(resource_path: impl Into<PathBuf>) -> Self {
        Self {
            resource_path: Some(resource_path.into()),
            ..Self::default()
        }
    }

    /// Create a module with no resolvable resource (e.g. a synthetic module).
    pub fn synthetic() -> Self {
        Self::default()
    }

    /// Place the module in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Attach boundary build metadata.
    pub fn with_build_info(mut self, build_info: BuildInfo) -> Self {
        self.build_info = Some(build_info);
        self
    }

    /// Wrap the module in a shared handle.
    pub fn into_shared(self) -> SharedModule {
        Arc::new(RwLock::new(self))
    }

    /// Stable resource path, if the module has one.
    pub fn resource_path(&self) -> Option<&PathBuf> {
        self.resource_path.as_ref()
    }

    /// Layer the module was included under.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Bundler-assigned id, once the chunk graph is finalized.
    pub fn id(&self) -> Option<&ModuleId> {
        self.id.as_ref()
    }

    /// Record the bundler-assigned id.
    pub fn assign_id(&mut self, id: ModuleId) {
        self.id = Some(id);
    }

    /// Boundary build metadata, if attached upstream.
    pub fn build_info(&self) -> Option<&BuildInfo> {
        self.build_info.as_ref()
    }

    /// Attach or replace boundary build metadata.
    pub fn set_build_info(&mut self, build_info: BuildInfo) {
        self.build_info = Some(build_info);
    }

    /// Drop boundary build metadata (used by hosts when a source edit removes
    /// the boundary directive).
    pub fn clear_build_info(&mut self) {
        self.build_info = None;
    }

    /// Record the assigned id on server boundary metadata.
    ///
    /// No-op when the module carries no server build info.
    pub fn record_server_module_id(&mut self, id: ModuleId) {
        if let Some(BuildInfo::Server { module_id, .. }) = self.build_info.as_mut() {
            *module_id = Some(id);
        }
    }

    /// Tag the module with the entry that explicitly included it.
    pub fn record_including_entry(&mut self, entry_name: &str) {
        if !self.included_by.iter().any(|name| name == entry_name) {
            self.included_by.push(entry_name.to_string());
        }
    }

    /// Names of the entries that explicitly included this module.
    pub fn included_by(&self) -> &[String] {
        &self.included_by
    }

    /// Returns true when the resource is a stylesheet.
    pub fn is_style(&self) -> bool {
        fn is_style_path(path: &Path) -> bool {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("css" | "scss" | "sass" | "less")
            )
        }
        self.resource_path.as_deref().is_some_and(is_style_path)
    }
}
