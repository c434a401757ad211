//! Server manifest: action identifiers to bundler-assigned runtime ids.
//!
//! Rebuilt from scratch every pass; only the final pass's content is
//! meaningful. Serialized as a JSON asset consumed by the RSC server runtime
//! to resolve and invoke server actions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use weft_graph::ModuleId;

/// Default filename of the emitted manifest asset.
pub const DEFAULT_MANIFEST_FILENAME: &str = "react-server-manifest.json";

/// One manifest entry per exported server action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerManifestEntry {
    pub id: ModuleId,
    /// Always empty today: action modules are resolved by id, not chunk.
    pub chunks: Vec<String>,
    pub name: String,
}

/// Mapping of `"{moduleId}#{exportName}"` keys to manifest entries.
///
/// A `BTreeMap` keeps the serialized key order stable across passes, so the
/// emitted asset only changes when its content does.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ServerManifest {
    #[serde(flatten)]
    entries: BTreeMap<String, ServerManifestEntry>,
}

impl ServerManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all entries at the start of a pass.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Record a manifest entry for one exported action.
    pub fn insert(&mut self, id: &ModuleId, export_name: &str) {
        self.entries.insert(
            format!("{id}#{export_name}"),
            ServerManifestEntry {
                id: id.clone(),
                chunks: Vec::new(),
                name: export_name.to_string(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&ServerManifestEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize for asset emission, pretty-printed for inspectability.
    pub fn to_json(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
