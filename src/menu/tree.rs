//! Arena-backed menu hierarchy.
//!
//! Nodes live in a fixed-capacity vector and refer to each other by
//! [`NodeId`].  A node's parent is assigned once, when the node is
//! created under it, and there is no way to move a node afterwards, so
//! the tree is acyclic and single-rooted by construction.

use heapless::{String, Vec};

use crate::config::{DEFAULT_NODE_NAME, MAX_CHILDREN, MAX_NODES, MAX_NODE_NAME, MAX_OBSERVED_PINS};
use crate::error::Error;
use crate::input::PinId;

/// Index of a node inside its [`MenuTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId(u8);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Role of a node.  Only the root is a `DashboardRoot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeKind {
    /// Tree root; shown as the dashboard.
    DashboardRoot,
    /// Head of the main menu (first child of the root).
    MenuRoot,
    /// Any other branch or leaf.
    Item,
}

/// An input whose value is shown by a node; `last` is the value the
/// display was last drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObservedPin {
    pub pin: PinId,
    pub last: u32,
}

pub type NodeName = String<MAX_NODE_NAME>;

#[derive(Clone, Debug)]
pub struct MenuNode {
    name: NodeName,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId, MAX_CHILDREN>,
    selected: usize,
    observed: Vec<ObservedPin, MAX_OBSERVED_PINS>,
}

impl MenuNode {
    fn new(name: &str, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name: truncate_name(name),
            kind,
            parent,
            children: Vec::new(),
            selected: 0,
            observed: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Cursor position; always `< children().len()` when there are children.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Child under the cursor.
    pub fn selected_child(&self) -> Option<NodeId> {
        self.children.get(self.selected).copied()
    }

    pub fn observed(&self) -> &[ObservedPin] {
        &self.observed
    }

    pub(crate) fn observed_mut(&mut self) -> &mut [ObservedPin] {
        &mut self.observed
    }

    /// Move the cursor; `None` when there is nothing to select.
    pub(crate) fn set_selected(&mut self, index: usize) -> Option<usize> {
        if index < self.children.len() {
            self.selected = index;
            Some(index)
        } else {
            None
        }
    }
}

/// Copy `name` into a bounded label, cutting at the last whole character
/// that fits.  Empty names get [`DEFAULT_NODE_NAME`].
pub fn truncate_name(name: &str) -> NodeName {
    let source = if name.is_empty() { DEFAULT_NODE_NAME } else { name };
    let mut label = NodeName::new();
    for c in source.chars() {
        if label.push(c).is_err() {
            break;
        }
    }
    label
}

/// Fixed-capacity menu tree.  Index 0 is always the dashboard root.
#[derive(Clone, Debug)]
pub struct MenuTree {
    nodes: Vec<MenuNode, MAX_NODES>,
}

impl MenuTree {
    /// Create a tree holding only its dashboard root.
    pub fn new(root_name: &str) -> Self {
        let mut nodes = Vec::new();
        // capacity is non-zero, the first push cannot fail
        let _ = nodes.push(MenuNode::new(root_name, NodeKind::DashboardRoot, None));
        Self { nodes }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(id.index())
    }

    /// Node by id, falling back to the root for foreign ids.
    pub fn node(&self, id: NodeId) -> &MenuNode {
        self.nodes.get(id.index()).unwrap_or(&self.nodes[0])
    }

    /// Create a node as the last child of `parent`.  The root is the only
    /// `DashboardRoot`; asking for another one is an error.
    pub fn add_child(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Result<NodeId, Error> {
        if !self.contains(parent) {
            return Err(Error::UnknownNode);
        }
        if kind == NodeKind::DashboardRoot {
            return Err(Error::SecondDashboardRoot);
        }
        if self.nodes[parent.index()].children.is_full() {
            return Err(Error::TooManyChildren);
        }
        if self.nodes.is_full() {
            return Err(Error::TreeFull);
        }

        let id = NodeId(self.nodes.len() as u8);
        self.nodes
            .push(MenuNode::new(name, kind, Some(parent)))
            .map_err(|_| Error::TreeFull)?;
        self.nodes[parent.index()]
            .children
            .push(id)
            .map_err(|_| Error::TooManyChildren)?;
        Ok(id)
    }

    /// Plain item under `parent`.
    pub fn add_item(&mut self, parent: NodeId, name: &str) -> Result<NodeId, Error> {
        self.add_child(parent, name, NodeKind::Item)
    }

    /// Register an input whose changes should redraw `node`.
    pub fn observe(&mut self, node: NodeId, pin: PinId) -> Result<(), Error> {
        let node = self.get_mut(node).ok_or(Error::UnknownNode)?;
        node.observed
            .push(ObservedPin { pin, last: 0 })
            .map_err(|_| Error::TooManyObservedPins)
    }

    /// Walk parent links from `id` up to the root (inclusive).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut next = self.contains(id).then_some(id);
        core::iter::from_fn(move || {
            let current = next?;
            next = self.node(current).parent;
            Some(current)
        })
    }
}
