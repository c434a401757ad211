//! Entry ownership: which named entries transitively reach a resource.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use weft_graph::{ModuleGraph, SharedModule, find_root_issuer};

/// Identifies a top-level entry point that transitively reaches a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    pub entry_name: String,
    pub entry_path: PathBuf,
}

/// Resource -> owning entries cache.
///
/// Owned by the resolver and scoped to one build session, not a process-wide
/// singleton: independent builds in the same process must not share stale
/// ownership state. Entries are only ever added, never invalidated mid-build;
/// entry ownership is assumed stable for the duration of a session.
#[derive(Debug, Default)]
pub struct EntryCache {
    map: FxHashMap<PathBuf, Vec<EntryInfo>>,
}

impl EntryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached owning entries for a resource, if already computed.
    pub fn get(&self, resource: &Path) -> Option<&[EntryInfo]> {
        self.map.get(resource).map(Vec::as_slice)
    }

    fn insert(&mut self, resource: PathBuf, entries: Vec<EntryInfo>) {
        self.map.insert(resource, entries);
    }

    /// Number of resources with a cached answer.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true when no answers have been cached yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Maps resources to the named entry points that transitively own them.
///
/// Ownership must be computed transitively: boundary modules are typically
/// several import hops away from their entry. Resolution climbs root-issuer
/// links until an ancestor maps directly onto a declared entry path.
pub struct EntryOwnership {
    // declared entry path -> entry name, supplied at construction
    entry_names: FxHashMap<PathBuf, String>,
    cache: EntryCache,
}

impl EntryOwnership {
    /// Create a resolver over the declared entry-path -> entry-name mapping.
    pub fn new(entry_names: FxHashMap<PathBuf, String>) -> Self {
        Self {
            entry_names,
            cache: EntryCache::new(),
        }
    }

    /// Resolve the entries that transitively own `module`.
    ///
    /// Non-empty answers are cached per resource for the rest of the build
    /// session. The per-call visited set guarantees termination on cyclic
    /// import graphs.
    pub fn find_module_entries(
        &mut self,
        graph: &dyn ModuleGraph,
        module: &SharedModule,
    ) -> Vec<EntryInfo> {
        let mut visited = FxHashSet::default();
        let entries = self.resolve(graph, module, &mut visited);
        if !entries.is_empty()
            && let Some(resource) = module.read().resource_path().cloned()
        {
            self.cache.insert(resource, entries.clone());
        }
        entries
    }

    /// Cached owning entry names for a resource.
    pub fn cached_entry_names(&self, resource: &Path) -> Vec<String> {
        self.cache
            .get(resource)
            .map(|entries| entries.iter().map(|e| e.entry_name.clone()).collect())
            .unwrap_or_default()
    }

    /// The session-scoped ownership cache.
    pub fn cache(&self) -> &EntryCache {
        &self.cache
    }

    fn resolve(
        &mut self,
        graph: &dyn ModuleGraph,
        module: &SharedModule,
        visited: &mut FxHashSet<PathBuf>,
    ) -> Vec<EntryInfo> {
        let Some(resource) = module.read().resource_path().cloned() else {
            return Vec::new();
        };
        if !visited.insert(resource.clone()) {
            // Cycle guard: already on this call stack.
            return Vec::new();
        }

        if let Some(cached) = self.cache.get(&resource)
            && !cached.is_empty()
        {
            return cached.to_vec();
        }

        let Some(issuer) = find_root_issuer(graph, module) else {
            // The module is an entry itself, or unreachable upward.
            return Vec::new();
        };

        let issuer_entries = self.resolve(graph, &issuer, visited);
        if !issuer_entries.is_empty() {
            return issuer_entries;
        }

        if let Some(issuer_resource) = issuer.read().resource_path()
            && let Some(entry_name) = self.entry_names.get(issuer_resource)
        {
            return vec![EntryInfo {
                entry_name: entry_name.clone(),
                entry_path: issuer_resource.clone(),
            }];
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_graph::{MemoryGraph, Module};

    fn entry_map(entries: &[(&str, &str)]) -> FxHashMap<PathBuf, String> {
        entries
            .iter()
            .map(|(path, name)| (PathBuf::from(path), name.to_string()))
            .collect()
    }

    #[test]
    fn test_transitive_ownership() {
        // main -> a.js -> b.js (the boundary module)
        let graph = MemoryGraph::new();
        graph.add_module(Module::new("main.ts")).unwrap();
        graph.add_module(Module::new("a.js")).unwrap();
        graph.add_module(Module::new("b.js")).unwrap();
        graph.set_issuer("a.js", "main.ts");
        graph.set_issuer("b.js", "a.js");

        let mut ownership = EntryOwnership::new(entry_map(&[("main.ts", "main")]));
        let b = graph.module(Path::new("b.js")).unwrap();

        let entries = ownership.find_module_entries(&graph, &b);
        assert_eq!(
            entries,
            vec![EntryInfo {
                entry_name: "main".to_string(),
                entry_path: PathBuf::from("main.ts"),
            }]
        );
    }

    #[test]
    fn test_cycle_terminates() {
        // a -> b -> a importer cycle, unreachable from any declared entry
        let graph = MemoryGraph::new();
        graph.add_module(Module::new("a.js")).unwrap();
        graph.add_module(Module::new("b.js")).unwrap();
        graph.set_issuer("a.js", "b.js");
        graph.set_issuer("b.js", "a.js");

        let mut ownership = EntryOwnership::new(entry_map(&[("main.ts", "main")]));
        let a = graph.module(Path::new("a.js")).unwrap();

        assert!(ownership.find_module_entries(&graph, &a).is_empty());
    }

    #[test]
    fn test_entry_module_owns_nothing_upward() {
        let graph = MemoryGraph::new();
        graph.add_module(Module::new("main.ts")).unwrap();

        let mut ownership = EntryOwnership::new(entry_map(&[("main.ts", "main")]));
        let main = graph.module(Path::new("main.ts")).unwrap();

        assert!(ownership.find_module_entries(&graph, &main).is_empty());
    }

    #[test]
    fn test_cache_survives_graph_mutation() {
        let graph = MemoryGraph::new();
        graph.add_module(Module::new("main.ts")).unwrap();
        graph.add_module(Module::new("page.tsx")).unwrap();
        graph.set_issuer("page.tsx", "main.ts");

        let mut ownership = EntryOwnership::new(entry_map(&[("main.ts", "main")]));
        let page = graph.module(Path::new("page.tsx")).unwrap();

        let first = ownership.find_module_entries(&graph, &page);
        assert_eq!(first.len(), 1);

        // Drop the issuer edge; the cached answer still stands for the
        // remainder of the session.
        graph.remove_module(Path::new("main.ts"));
        let second = ownership.find_module_entries(&graph, &page);
        assert_eq!(second, first);
        assert_eq!(ownership.cached_entry_names(Path::new("page.tsx")), ["main"]);
    }

    #[test]
    fn test_synthetic_module_resolves_to_nothing() {
        let graph = MemoryGraph::new();
        let mut ownership = EntryOwnership::new(entry_map(&[("main.ts", "main")]));
        let synthetic = Module::synthetic().into_shared();

        assert!(ownership.find_module_entries(&graph, &synthetic).is_empty());
        assert!(ownership.cache().is_empty());
    }
}
