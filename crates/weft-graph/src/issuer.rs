//! Root issuer resolution: attributing a module to its highest importer.

use rustc_hash::FxHashSet;

use super::{ModuleGraph, SharedModule};

/// Walk the issuer chain of `module` up to the first ancestor with no
/// recorded importer - the point closest to an entry.
///
/// Returns `None` when the module is itself a root with no identifiable
/// issuer. This is a pure query: no mutation, no caching. Callers that need
/// memoization (the entry-ownership resolver does) layer it on top.
///
/// Module graphs are not guaranteed acyclic; a visited set terminates the
/// walk when the issuer chain loops, returning the module reached before the
/// repeat.
pub fn find_root_issuer(graph: &dyn ModuleGraph, module: &SharedModule) -> Option<SharedModule> {
    let start = module.read().resource_path().cloned()?;
    let mut visited = FxHashSet::default();
    visited.insert(start.clone());

    let mut current = graph.issuer_of(&start)?;
    loop {
        let Some(resource) = current.read().resource_path().cloned() else {
            // Issuer without a resource cannot be walked further.
            return Some(current);
        };
        if !visited.insert(resource.clone()) {
            return Some(current);
        }
        match graph.issuer_of(&resource) {
            Some(next) => current = next,
            None => return Some(current),
        }
    }
}
