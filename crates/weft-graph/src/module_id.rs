//! Bundler-assigned module identity.

use serde::{Deserialize, Serialize};

/// A module id assigned by the bundler after chunk-graph finalization.
///
/// Bundlers assign either numeric ids (production) or path-derived string ids
/// (development), so both shapes are representable. Serializes as the raw
/// number or string, matching what the runtime manifest consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
    /// Numeric id, typical for production builds.
    Number(u32),
    /// String id, typical for development builds.
    Named(String),
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleId::Number(id) => write!(f, "{}", id),
            ModuleId::Named(id) => write!(f, "{}", id),
        }
    }
}

impl From<u32> for ModuleId {
    fn from(id: u32) -> Self {
        ModuleId::Number(id)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        ModuleId::Named(id.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        ModuleId::Named(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ModuleId::from(7).to_string(), "7");
        assert_eq!(ModuleId::from("./src/actions.ts").to_string(), "./src/actions.ts");
    }

    #[test]
    fn test_serializes_as_raw_value() {
        assert_eq!(serde_json::to_string(&ModuleId::from(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&ModuleId::from("app")).unwrap(),
            "\"app\""
        );
    }
}
