//! Organization hierarchy: ancestor-chain paths and the tree built from them.

mod path;
mod tree;

pub use path::HierarchyPath;
pub use tree::OrgTree;
