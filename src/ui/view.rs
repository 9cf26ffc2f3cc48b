//! Render snapshots.
//!
//! A [`View`] copies what the screens need out of the tree so that
//! drawing (slow, I²C bound) happens outside the navigation lock.

use heapless::Vec;

use crate::config::{MAX_CHILDREN, MAX_OBSERVED_PINS};
use crate::menu::tree::{MenuTree, NodeId, NodeKind, NodeName, ObservedPin};

pub type Readings = Vec<ObservedPin, MAX_OBSERVED_PINS>;

/// Everything needed to paint both displays for one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Tree root.
    Dashboard { readings: Readings },
    /// Node with children: a selectable list.
    Menu {
        title: NodeName,
        items: Vec<NodeName, MAX_CHILDREN>,
        selected: usize,
        readings: Readings,
    },
    /// Node without children.
    Leaf { title: NodeName, readings: Readings },
}

impl View {
    pub fn of(tree: &MenuTree, id: NodeId) -> Self {
        let node = tree.node(id);
        let readings = Readings::from_slice(node.observed()).unwrap_or_default();

        if node.kind() == NodeKind::DashboardRoot {
            return View::Dashboard { readings };
        }

        if node.has_children() {
            let items = node
                .children()
                .iter()
                .map(|child| tree.node(*child).name())
                .filter_map(|name| NodeName::try_from(name).ok())
                .collect();
            View::Menu {
                title: NodeName::try_from(node.name()).unwrap_or_default(),
                items,
                selected: node.selected(),
                readings,
            }
        } else {
            View::Leaf {
                title: NodeName::try_from(node.name()).unwrap_or_default(),
                readings,
            }
        }
    }

    pub fn readings(&self) -> &[ObservedPin] {
        match self {
            View::Dashboard { readings }
            | View::Menu { readings, .. }
            | View::Leaf { readings, .. } => readings,
        }
    }
}

/// Render callback for the active node.
pub trait Render {
    fn draw(&mut self, view: &View);
}
