//! The RSC server plugin: hook-driven boundary resolution.
//!
//! Hook order per pass: [`RscServerPlugin::finish_make`] (include barrier,
//! graph scan, convergence check), then [`RscServerPlugin::module_ids_assigned`]
//! once the chunk graph fixes ids, then [`RscServerPlugin::emit_assets`] and
//! [`RscServerPlugin::build_complete`], and finally
//! [`RscServerPlugin::needs_additional_pass`] to decide whether the pipeline
//! re-runs the whole cycle.

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use weft_graph::{BuildInfo, Layer};

use crate::diagnostics::Diagnostic;
use crate::entries::EntryOwnership;
use crate::include::{IncludeRequest, include_all};
use crate::manifest::{DEFAULT_MANIFEST_FILENAME, ServerManifest};
use crate::pass::PassController;
use crate::pipeline::Compilation;
use crate::registry::ReferenceRegistry;
use crate::shared_data::SharedData;

/// Plugin construction options.
#[derive(Debug, Default)]
pub struct RscServerPluginOptions {
    /// Filename of the emitted manifest asset. Defaults to
    /// [`DEFAULT_MANIFEST_FILENAME`].
    pub manifest_filename: Option<String>,
    /// Declared entry path -> entry name mapping, supplied by the host.
    pub entry_path_to_name: FxHashMap<PathBuf, String>,
}

/// Resolves the server/client reference graph of an RSC build to a fixed
/// point across compilation passes.
pub struct RscServerPlugin {
    registry: ReferenceRegistry,
    ownership: EntryOwnership,
    manifest: ServerManifest,
    pass: PassController,
    shared_data: SharedData,
    manifest_filename: String,
}

impl RscServerPlugin {
    /// Construct the plugin, validating the configuration synchronously.
    pub fn new(options: RscServerPluginOptions) -> crate::Result<Self> {
        let manifest_filename = options
            .manifest_filename
            .unwrap_or_else(|| DEFAULT_MANIFEST_FILENAME.to_string());
        if manifest_filename.is_empty() {
            return Err(crate::Error::InvalidOptions(
                "manifest filename must not be empty".to_string(),
            ));
        }

        Ok(Self {
            registry: ReferenceRegistry::new(),
            ownership: EntryOwnership::new(options.entry_path_to_name),
            manifest: ServerManifest::new(),
            pass: PassController::new(),
            shared_data: SharedData::new(),
            manifest_filename,
        })
    }

    /// Handle to the cross-cutting data store other stages consume.
    pub fn shared_data(&self) -> SharedData {
        self.shared_data.clone()
    }

    /// The accumulated reference registry.
    pub fn registry(&self) -> &ReferenceRegistry {
        &self.registry
    }

    /// The manifest built during the current pass.
    pub fn manifest(&self) -> &ServerManifest {
        &self.manifest
    }

    /// Graph-finalized hook: include every known reference under its owning
    /// entries, re-scan the module graph, and flag a re-pass when the
    /// reference sets changed.
    pub async fn finish_make(&mut self, compilation: &dyn Compilation) -> crate::Result<()> {
        self.manifest.reset();

        let before = self.registry.snapshot();
        let requests = self.build_include_requests();

        let outcome = include_all(compilation, requests).await;
        let mut changed = false;
        for resource in &outcome.failed {
            self.registry.evict(resource);
            changed = true;
            // The eviction itself shrinks the reference set; resolve the
            // dropped boundary again on the next pass.
            self.pass.request();
        }

        changed |= self.scan_modules(compilation);

        let after = self.registry.snapshot();
        let grew = after.iter().any(|resource| !before.contains(resource));
        if before.len() != after.len() || (grew && changed) {
            debug!(
                before = before.len(),
                after = after.len(),
                "reference set changed; requesting additional pass"
            );
            self.pass.request();
        }

        Ok(())
    }

    /// Module-ids-assigned hook: patch client `ssr_id`s and build the server
    /// manifest from finalized ids.
    pub fn module_ids_assigned(&mut self, compilation: &dyn Compilation) {
        for module in compilation.graph().modules() {
            let (resource, id, layer) = {
                let module = module.read();
                (
                    module.resource_path().cloned(),
                    module.id().cloned(),
                    module.layer(),
                )
            };
            let (Some(resource), Some(id)) = (resource, id) else {
                continue;
            };

            if layer != Layer::ServerAction {
                let client_tagged = module
                    .read()
                    .build_info()
                    .is_some_and(BuildInfo::is_client);
                if self.registry.patch_ssr_id(&resource, &id) {
                    debug!(resource = %resource.display(), id = %id, "patched ssr id");
                } else if client_tagged {
                    compilation.push_diagnostic(Diagnostic::missing_client_reference(&resource));
                }
            } else {
                let export_names = match module.read().build_info() {
                    Some(BuildInfo::Server { export_names, .. }) => Some(export_names.clone()),
                    _ => None,
                };
                match export_names {
                    Some(export_names) => {
                        module.write().record_server_module_id(id.clone());
                        for export_name in &export_names {
                            self.manifest.insert(&id, export_name);
                        }
                    }
                    None => {
                        if self.registry.contains_server(&resource) {
                            compilation
                                .push_diagnostic(Diagnostic::missing_server_build_info(&resource));
                        }
                    }
                }
            }
        }
    }

    /// Asset-emission hook: write the manifest artifact. Runs every pass;
    /// only the last write persists.
    pub fn emit_assets(&self, compilation: &dyn Compilation) -> crate::Result<()> {
        compilation.emit_asset(&self.manifest_filename, self.manifest.to_json()?);
        Ok(())
    }

    /// Build-complete hook: publish the final registries and collected
    /// styles to the shared data store.
    pub fn build_complete(&self) {
        self.shared_data
            .publish_references(self.registry.client_map(), self.registry.server_map());
        info!(
            client_references = self.registry.client_map().len(),
            server_references = self.registry.server_map().len(),
            "published reference maps"
        );
    }

    /// Additional-pass query hook: consume the convergence flag.
    pub fn needs_additional_pass(&mut self) -> crate::Result<bool> {
        self.pass.take()
    }

    fn build_include_requests(&self) -> Vec<IncludeRequest> {
        let client = self.registry.client_resources().map(|resource| {
            IncludeRequest {
                resource: resource.clone(),
                entry_names: self.ownership.cached_entry_names(resource),
                layer: Layer::Default,
            }
        });
        let server = self.registry.server_resources().map(|resource| {
            IncludeRequest {
                resource: resource.clone(),
                entry_names: self.ownership.cached_entry_names(resource),
                layer: Layer::ServerAction,
            }
        });
        client.chain(server).collect()
    }

    /// Walk all modules: publish boundary build info, register newly observed
    /// references, and warm the entry-ownership cache. Returns true when the
    /// registry changed.
    fn scan_modules(&mut self, compilation: &dyn Compilation) -> bool {
        let graph = compilation.graph();
        let mut changed = false;

        for module in graph.modules() {
            let (layer, build_info, is_style, resource_path) = {
                let module = module.read();
                (
                    module.layer(),
                    module.build_info().cloned(),
                    module.is_style(),
                    module.resource_path().cloned(),
                )
            };

            if is_style && let Some(resource) = &resource_path {
                self.shared_data.add_style(resource.clone());
            }

            let Some(build_info) = build_info else {
                continue;
            };

            // Server boundaries count from the server-action layer, client
            // boundaries from the default layer; the mirror-universe copies
            // are not published.
            let publish = match &build_info {
                BuildInfo::Server { .. } => layer.is_server_action(),
                BuildInfo::Client { .. } => !layer.is_server_action(),
            };
            if publish {
                self.shared_data.publish_build_info(
                    build_info.resource_path().to_path_buf(),
                    build_info.clone(),
                );
            }

            changed |= self.registry.observe(&build_info);

            // Warm the ownership cache so the next pass's include step knows
            // each reference's owning entries.
            let _ = self.ownership.find_module_entries(graph, &module);
        }

        changed
    }
}
