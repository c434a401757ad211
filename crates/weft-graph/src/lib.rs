//! # weft-graph
//!
//! Module graph data model for server/client boundary resolution.
//!
//! This crate provides the data structures a bundler pipeline shares with the
//! React Server Components plugin: module handles, bundler-assigned module
//! ids, layer tags, boundary build metadata, and the [`ModuleGraph`] provider
//! trait with an in-memory implementation.
//!
//! It is deliberately free of I/O and transformation logic. Modules are owned
//! by the host pipeline and shared as [`SharedModule`] handles; this crate
//! only reads and augments the metadata attached to them.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::PathBuf;
//! use weft_graph::{find_root_issuer, MemoryGraph, Module, ModuleGraph};
//!
//! # fn main() -> Result<(), weft_graph::Error> {
//! let graph = MemoryGraph::new();
//! graph.add_module(Module::new("src/main.ts"))?;
//! graph.add_module(Module::new("src/page.tsx"))?;
//! graph.set_issuer("src/page.tsx", "src/main.ts");
//!
//! let page = graph.module(&PathBuf::from("src/page.tsx")).unwrap();
//! let root = find_root_issuer(&graph, &page).unwrap();
//! assert_eq!(
//!     root.read().resource_path(),
//!     Some(&PathBuf::from("src/main.ts"))
//! );
//! # Ok(())
//! # }
//! ```

pub mod build_info;
pub mod graph;
pub mod issuer;
pub mod layer;
pub mod module;
pub mod module_id;

pub use build_info::{BuildInfo, ClientReference};
pub use graph::{MemoryGraph, ModuleGraph};
pub use issuer::find_root_issuer;
pub use layer::Layer;
pub use module::{Module, SharedModule};
pub use module_id::ModuleId;

/// Error types for weft-graph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A module handle is missing required metadata.
    #[error("Invalid module: {0}")]
    InvalidModule(String),
}

/// Result type alias for weft-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
