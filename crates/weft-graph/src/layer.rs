//! Layer tags partitioning the module universe.

use serde::{Deserialize, Serialize};

/// Bundler-level partition tag separating the server-only universe from the
/// default (client-includable) universe of modules.
///
/// A closed variant instead of a free-form layer string: the plugin only ever
/// distinguishes these two universes, and string comparison invites
/// typo-class bugs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// The default layer client-includable modules live in.
    #[default]
    Default,
    /// The reserved layer server-action modules are included under.
    ServerAction,
}

impl Layer {
    /// Returns true for the reserved server-action layer.
    pub fn is_server_action(self) -> bool {
        matches!(self, Layer::ServerAction)
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Default => write!(f, "default"),
            Layer::ServerAction => write!(f, "server-action"),
        }
    }
}
