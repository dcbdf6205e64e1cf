//! Outline forest data model.
//!
//! One `Outline` owns a forest of headline nodes addressed by arena ids.
//! Every node also carries a gnx, the stable key its body text is looked
//! up by; gnx values are unique within one outline.

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use std::fmt;

new_key_type! { pub struct NodeId; }

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    DuplicateGnx(CompactString),
    InvalidNodeId,
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineError::DuplicateGnx(gnx) => {
                write!(f, "gnx already present in outline: {}", gnx)
            }
            OutlineError::InvalidNodeId => write!(f, "invalid node id"),
        }
    }
}

impl std::error::Error for OutlineError {}

#[derive(Debug, Clone)]
pub struct OutlineNode {
    header: CompactString,
    gnx: CompactString,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    selected: bool,
}

impl OutlineNode {
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn gnx(&self) -> &str {
        &self.gnx
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Load-time auto-focus flag.
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Row produced by [`Outline::visible_rows`] for tree renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineRow {
    pub id: NodeId,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

pub struct Outline {
    arena: SlotMap<NodeId, OutlineNode>,
    roots: Vec<NodeId>,
    by_gnx: FxHashMap<CompactString, NodeId>,
    expanded: FxHashSet<NodeId>,
}

impl Outline {
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            roots: Vec::new(),
            by_gnx: FxHashMap::default(),
            expanded: FxHashSet::default(),
        }
    }

    pub fn add_root(&mut self, header: &str, gnx: &str) -> Result<NodeId, OutlineError> {
        self.insert(None, header, gnx)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        header: &str,
        gnx: &str,
    ) -> Result<NodeId, OutlineError> {
        self.insert(Some(parent), header, gnx)
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        header: &str,
        gnx: &str,
    ) -> Result<NodeId, OutlineError> {
        let gnx = CompactString::from(gnx);
        if self.by_gnx.contains_key(&gnx) {
            return Err(OutlineError::DuplicateGnx(gnx));
        }
        if let Some(parent) = parent {
            if !self.arena.contains_key(parent) {
                return Err(OutlineError::InvalidNodeId);
            }
        }

        let id = self.arena.insert(OutlineNode {
            header: CompactString::from(header),
            gnx: gnx.clone(),
            parent,
            children: Vec::new(),
            selected: false,
        });
        self.by_gnx.insert(gnx, id);

        match parent {
            Some(parent) => self.arena[parent].children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Root set when `of` is `None`, else the node's children.
    /// Total: unknown ids yield an empty slice.
    pub fn children(&self, of: Option<NodeId>) -> &[NodeId] {
        match of {
            None => &self.roots,
            Some(id) => self
                .arena
                .get(id)
                .map(|node| node.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.parent)
    }

    pub fn node(&self, id: NodeId) -> Option<&OutlineNode> {
        self.arena.get(id)
    }

    pub fn gnx(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|node| node.gnx.as_str())
    }

    pub fn header(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|node| node.header.as_str())
    }

    pub fn node_by_gnx(&self, gnx: &str) -> Option<NodeId> {
        self.by_gnx.get(gnx).copied()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn expand(&mut self, id: NodeId) {
        if self.arena.contains_key(id) {
            self.expanded.insert(id);
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        self.expanded.remove(&id);
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn mark_selected(&mut self, id: NodeId) -> bool {
        match self.arena.get_mut(id) {
            Some(node) => {
                node.selected = true;
                true
            }
            None => false,
        }
    }

    /// First node in display order flagged for load-time auto-focus.
    pub fn initial_selection(&self) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if node.selected {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Flatten the forest into display rows, honoring the expanded set.
    /// Children of collapsed nodes are skipped.
    pub fn visible_rows(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<(NodeId, usize)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let node = &self.arena[id];
            let has_children = !node.children.is_empty();
            let expanded = self.expanded.contains(&id);
            rows.push(OutlineRow {
                id,
                depth,
                has_children,
                expanded,
            });
            if has_children && expanded {
                stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        rows
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}
