//! Shared test utilities for weft-rsc tests
//!
//! Provides a mock compilation pipeline over the in-memory graph so tests
//! can drive the plugin's hooks without a real bundler.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use weft_rsc::{
    Compilation, Diagnostic, DiagnosticKind, IncludeError, Layer, MemoryGraph, Module,
    ModuleGraph, RscServerPlugin, RscServerPluginOptions, SharedModule,
};

/// A module that appears in the graph when another resource gets included,
/// modeling transitive boundary discovery.
pub struct Reveal {
    pub module: Module,
    pub issuer: PathBuf,
}

/// Mock compilation pipeline backed by a [`MemoryGraph`].
pub struct MockCompilation {
    graph: MemoryGraph,
    entries: Vec<(String, PathBuf)>,
    reveals: RwLock<FxHashMap<PathBuf, Vec<Reveal>>>,
    fail_includes: FxHashSet<PathBuf>,
    missing_modules: FxHashSet<PathBuf>,
    diagnostics: RwLock<Vec<Diagnostic>>,
    assets: RwLock<FxHashMap<String, Vec<u8>>>,
    used_exports: RwLock<Vec<(PathBuf, String)>>,
}

impl MockCompilation {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            graph: MemoryGraph::new(),
            entries: entries
                .iter()
                .map(|(name, path)| (name.to_string(), PathBuf::from(path)))
                .collect(),
            reveals: RwLock::new(FxHashMap::default()),
            fail_includes: FxHashSet::default(),
            missing_modules: FxHashSet::default(),
            diagnostics: RwLock::new(Vec::new()),
            assets: RwLock::new(FxHashMap::default()),
            used_exports: RwLock::new(Vec::new()),
        }
    }

    pub fn memory_graph(&self) -> &MemoryGraph {
        &self.graph
    }

    /// Register a module revealed when `resource` first gets included.
    pub fn reveal_on_include(&self, resource: &str, module: Module, issuer: &str) {
        self.reveals
            .write()
            .entry(PathBuf::from(resource))
            .or_default()
            .push(Reveal {
                module,
                issuer: PathBuf::from(issuer),
            });
    }

    /// Make includes of `resource` report a dependency-add error.
    pub fn fail_include(&mut self, resource: &str) {
        self.fail_includes.insert(PathBuf::from(resource));
    }

    /// Make includes of `resource` complete without producing a module.
    pub fn produce_no_module(&mut self, resource: &str) {
        self.missing_modules.insert(PathBuf::from(resource));
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.read().clone()
    }

    pub fn diagnostic_kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics.read().iter().map(|d| d.kind).collect()
    }

    pub fn asset(&self, filename: &str) -> Option<Vec<u8>> {
        self.assets.read().get(filename).cloned()
    }

    pub fn used_exports(&self) -> Vec<(PathBuf, String)> {
        self.used_exports.read().clone()
    }
}

#[async_trait]
impl Compilation for MockCompilation {
    fn graph(&self) -> &dyn ModuleGraph {
        &self.graph
    }

    fn entries(&self) -> Vec<(String, PathBuf)> {
        self.entries.clone()
    }

    async fn add_include(
        &self,
        _entry_name: &str,
        resource: &Path,
        layer: Layer,
    ) -> Result<Option<SharedModule>, IncludeError> {
        if self.fail_includes.contains(resource) {
            return Err(IncludeError::AddFailed {
                resource: resource.to_path_buf(),
                message: "simulated dependency failure".to_string(),
            });
        }
        if self.missing_modules.contains(resource) {
            return Ok(None);
        }

        let module = match self.graph.module(resource) {
            Some(module) => module,
            None => self
                .graph
                .add_module(Module::new(resource).with_layer(layer))
                .map_err(|error| IncludeError::AddFailed {
                    resource: resource.to_path_buf(),
                    message: error.to_string(),
                })?,
        };

        // Transitively reveal modules pulled in by this inclusion.
        if let Some(reveals) = self.reveals.write().remove(resource) {
            for reveal in reveals {
                let revealed_resource = reveal
                    .module
                    .resource_path()
                    .cloned()
                    .expect("revealed modules must have a resource path");
                self.graph
                    .add_module(reveal.module)
                    .expect("revealed module is valid");
                self.graph.set_issuer(revealed_resource, reveal.issuer);
            }
        }

        Ok(Some(module))
    }

    fn mark_exports_used(&self, module: &SharedModule, entry_name: &str) {
        if let Some(resource) = module.read().resource_path() {
            self.used_exports
                .write()
                .push((resource.clone(), entry_name.to_string()));
        }
    }

    fn push_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.write().push(diagnostic);
    }

    fn emit_asset(&self, filename: &str, contents: Vec<u8>) {
        self.assets.write().insert(filename.to_string(), contents);
    }
}

/// Build a plugin with the default manifest filename and the given
/// entry-path -> entry-name mapping.
pub fn test_plugin(entry_map: &[(&str, &str)]) -> RscServerPlugin {
    let entry_path_to_name = entry_map
        .iter()
        .map(|(path, name)| (PathBuf::from(path), name.to_string()))
        .collect();
    RscServerPlugin::new(RscServerPluginOptions {
        manifest_filename: None,
        entry_path_to_name,
    })
    .expect("valid plugin options")
}

/// Run one complete pass: finish-make, id assignment phase, asset emission.
/// Returns whether the controller requested another pass.
pub async fn run_pass(plugin: &mut RscServerPlugin, compilation: &MockCompilation) -> bool {
    plugin
        .finish_make(compilation)
        .await
        .expect("finish_make succeeds");
    plugin.module_ids_assigned(compilation);
    plugin.emit_assets(compilation).expect("emit_assets succeeds");
    plugin
        .needs_additional_pass()
        .expect("pass cap not exceeded")
}
