//! In-memory record stores.
//!
//! The [`CategoryTree`] holds the hierarchical category records and
//! maintains their materialized paths; the [`Registry`] holds the flat
//! record types and fires derived-field recomputation. Both are plain
//! in-memory stores: persistence, access control, and transactional
//! durability are the surrounding platform's job.

pub mod category_tree;
pub use category_tree::{CategoryTree, DeleteError, HierarchyError};

pub mod path;
pub use path::{MaterializedPath, PathParseError};

pub mod registry;
pub use registry::{Registry, RegistryError};
