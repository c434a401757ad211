//! Boundary build metadata attached to modules by upstream loader stages.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ModuleId;

/// One reference per named export of a client boundary module.
///
/// `ssr_id` is unknown until the server-side module id is assigned; the
/// reference registry patches it in once ids are finalized so server-rendered
/// HTML can name the exact module id the bundler will emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientReference {
    /// Name of the exported client component.
    pub export_name: String,
    /// Server-side module id used for SSR hydration matching.
    pub ssr_id: Option<ModuleId>,
}

impl ClientReference {
    /// Create a reference for a named export with no id assigned yet.
    pub fn new(export_name: impl Into<String>) -> Self {
        Self {
            export_name: export_name.into(),
            ssr_id: None,
        }
    }
}

/// Metadata recording which side of the server/client split a module belongs
/// to, attached by an upstream transform stage before the plugin runs.
///
/// The boundary type is exclusive: a module is either a client boundary or a
/// server boundary, never both, so this is a tagged variant rather than a
/// struct with an optional type field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildInfo {
    /// A client boundary module ("use client").
    Client {
        /// Canonical resource path of the boundary module.
        resource_path: PathBuf,
        /// One reference per named export.
        references: Vec<ClientReference>,
    },
    /// A server boundary module ("use server").
    Server {
        /// Canonical resource path of the boundary module.
        resource_path: PathBuf,
        /// Exported action names.
        export_names: Vec<String>,
        /// Bundler-assigned id, recorded once ids are finalized.
        module_id: Option<ModuleId>,
    },
}

impl BuildInfo {
    /// Build client boundary metadata from a list of export names.
    pub fn client<I, S>(resource_path: impl Into<PathBuf>, export_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BuildInfo::Client {
            resource_path: resource_path.into(),
            references: export_names.into_iter().map(ClientReference::new).collect(),
        }
    }

    /// Build server boundary metadata from a list of exported action names.
    pub fn server<I, S>(resource_path: impl Into<PathBuf>, export_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BuildInfo::Server {
            resource_path: resource_path.into(),
            export_names: export_names.into_iter().map(Into::into).collect(),
            module_id: None,
        }
    }

    /// Canonical resource path of the boundary module.
    pub fn resource_path(&self) -> &Path {
        match self {
            BuildInfo::Client { resource_path, .. } => resource_path,
            BuildInfo::Server { resource_path, .. } => resource_path,
        }
    }

    /// Returns true for client boundary metadata.
    pub fn is_client(&self) -> bool {
        matches!(self, BuildInfo::Client { .. })
    }

    /// Returns true for server boundary metadata.
    pub fn is_server(&self) -> bool {
        matches!(self, BuildInfo::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_references_start_unpatched() {
        let info = BuildInfo::client("src/widget.tsx", ["Widget", "Panel"]);
        let BuildInfo::Client { references, .. } = &info else {
            panic!("expected client build info");
        };
        assert_eq!(references.len(), 2);
        assert!(references.iter().all(|r| r.ssr_id.is_none()));
        assert!(info.is_client());
    }

    #[test]
    fn test_server_info_has_no_id_until_assigned() {
        let info = BuildInfo::server("src/actions.ts", ["save"]);
        let BuildInfo::Server { module_id, export_names, .. } = &info else {
            panic!("expected server build info");
        };
        assert!(module_id.is_none());
        assert_eq!(export_names, &["save".to_string()]);
        assert!(info.is_server());
    }
}
