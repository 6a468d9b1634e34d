//! Arena-backed organization tree.
//!
//! Nodes live in one `Vec` and refer to each other by index. Intermediate
//! nodes are created on demand while registering a path, so a partner can be
//! registered before its parent; only registered nodes are reported as
//! descendants.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::foundation::{OrganizationId, ValidationError};

use super::HierarchyPath;

#[derive(Debug, Clone)]
struct OrgNode {
    segment: OrganizationId,
    parent: Option<usize>,
    children: BTreeMap<OrganizationId, usize>,
    registered: bool,
}

/// Explicit adjacency structure answering prefix-based descendant queries.
#[derive(Debug, Clone, Default)]
pub struct OrgTree {
    nodes: Vec<OrgNode>,
    roots: BTreeMap<OrganizationId, usize>,
    index: HashMap<OrganizationId, usize>,
}

impl OrgTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from `(organization, path)` pairs.
    pub fn from_paths<I>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (OrganizationId, HierarchyPath)>,
    {
        let mut tree = Self::new();
        for (id, path) in entries {
            tree.insert(id, &path)?;
        }
        Ok(tree)
    }

    /// Registers an organization at `path`.
    ///
    /// The path must end at the organization itself. Registering the same
    /// organization twice at the same path is a no-op; at a different path
    /// it is rejected.
    pub fn insert(&mut self, id: OrganizationId, path: &HierarchyPath) -> Result<(), ValidationError> {
        if path.leaf() != id {
            return Err(ValidationError::invalid_format(
                "hierarchy_path",
                format!("path '{}' does not end at organization {}", path, id),
            ));
        }
        if let Some(&existing) = self.index.get(&id) {
            if self.path_at(existing) == *path {
                return Ok(());
            }
            return Err(ValidationError::invalid_format(
                "hierarchy_path",
                format!("organization {} is already registered elsewhere", id),
            ));
        }

        let mut cursor = self.root_node(path.root());
        for &segment in &path.segments()[1..] {
            cursor = self.child_node(cursor, segment);
        }
        self.nodes[cursor].registered = true;
        self.index.insert(id, cursor);
        Ok(())
    }

    /// Number of registered organizations.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every registered organization whose path extends `prefix`, the
    /// organization sitting exactly at `prefix` included.
    pub fn descendants(&self, prefix: &HierarchyPath) -> BTreeSet<OrganizationId> {
        let Some(start) = self.locate(prefix) else {
            return BTreeSet::new();
        };

        let mut found = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if node.registered {
                found.insert(node.segment);
            }
            stack.extend(node.children.values().copied());
        }
        found
    }

    fn locate(&self, prefix: &HierarchyPath) -> Option<usize> {
        let mut cursor = *self.roots.get(&prefix.root())?;
        for segment in &prefix.segments()[1..] {
            cursor = *self.nodes[cursor].children.get(segment)?;
        }
        Some(cursor)
    }

    fn path_at(&self, idx: usize) -> HierarchyPath {
        let mut segments = Vec::new();
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            segments.push(self.nodes[i].segment);
            cursor = self.nodes[i].parent;
        }
        segments.reverse();
        HierarchyPath::from_chain(segments)
    }

    fn root_node(&mut self, segment: OrganizationId) -> usize {
        if let Some(&idx) = self.roots.get(&segment) {
            return idx;
        }
        let idx = self.push_node(segment, None);
        self.roots.insert(segment, idx);
        idx
    }

    fn child_node(&mut self, parent: usize, segment: OrganizationId) -> usize {
        if let Some(&idx) = self.nodes[parent].children.get(&segment) {
            return idx;
        }
        let idx = self.push_node(segment, Some(parent));
        self.nodes[parent].children.insert(segment, idx);
        idx
    }

    fn push_node(&mut self, segment: OrganizationId, parent: Option<usize>) -> usize {
        self.nodes.push(OrgNode {
            segment,
            parent,
            children: BTreeMap::new(),
            registered: false,
        });
        self.nodes.len() - 1
    }
}
