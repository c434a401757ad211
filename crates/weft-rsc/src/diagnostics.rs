//! Structured diagnostics pushed onto the pipeline's collection.
//!
//! Boundary-resolution problems are reported, not thrown: the build keeps
//! going and surfaces every issue found in a pass through the host tool's
//! standard error reporting.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single boundary-resolution diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// Resource the diagnostic is about, when one is identifiable.
    pub file: Option<PathBuf>,
}

/// Diagnostic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The compilation has no entries to include references under.
    NoEntries,
    /// The pipeline reported an error adding an include dependency.
    IncludeFailed,
    /// The include succeeded but produced no module.
    ModuleNotAdded,
    /// A default-layer client boundary has no registry entry at patch time.
    MissingClientReference,
    /// A server-action-layer module has no server build info at manifest time.
    MissingServerBuildInfo,
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl Diagnostic {
    /// The compilation has no entries; inclusion cannot proceed this pass.
    pub fn no_entries() -> Self {
        Self {
            kind: DiagnosticKind::NoEntries,
            severity: DiagnosticSeverity::Error,
            message: "Could not find an entry in the compilation".to_string(),
            file: None,
        }
    }

    /// The pipeline rejected the include dependency for a resource.
    pub fn include_failed(resource: &Path, error: &impl std::fmt::Display) -> Self {
        Self {
            kind: DiagnosticKind::IncludeFailed,
            severity: DiagnosticSeverity::Error,
            message: format!("Failed to include {}: {}", resource.display(), error),
            file: Some(resource.to_path_buf()),
        }
    }

    /// The include completed without yielding a module.
    pub fn module_not_added(resource: &Path) -> Self {
        Self {
            kind: DiagnosticKind::ModuleNotAdded,
            severity: DiagnosticSeverity::Error,
            message: format!("Module not added for {}", resource.display()),
            file: Some(resource.to_path_buf()),
        }
    }

    /// A client boundary module is missing from the reference registry.
    pub fn missing_client_reference(resource: &Path) -> Self {
        Self {
            kind: DiagnosticKind::MissingClientReference,
            severity: DiagnosticSeverity::Error,
            message: format!(
                "Could not find client references for {} in the reference registry",
                resource.display()
            ),
            file: Some(resource.to_path_buf()),
        }
    }

    /// A server-action module has no server build info to build manifest
    /// entries from.
    pub fn missing_server_build_info(resource: &Path) -> Self {
        Self {
            kind: DiagnosticKind::MissingServerBuildInfo,
            severity: DiagnosticSeverity::Error,
            message: format!(
                "Could not find server build info for {}",
                resource.display()
            ),
            file: Some(resource.to_path_buf()),
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::NoEntries => write!(f, "NoEntries"),
            DiagnosticKind::IncludeFailed => write!(f, "IncludeFailed"),
            DiagnosticKind::ModuleNotAdded => write!(f, "ModuleNotAdded"),
            DiagnosticKind::MissingClientReference => write!(f, "MissingClientReference"),
            DiagnosticKind::MissingServerBuildInfo => write!(f, "MissingServerBuildInfo"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
