//! Menu hierarchy and navigation.
//!
//! - **tree**: arena of named nodes with parent/child links
//! - **nav**: dashboard/menu state machine over the tree

pub mod nav;
pub mod tree;

#[cfg(test)]
mod tests;

pub use nav::{Command, Mode, NavConfig, Navigator, Outcome, RedrawTicket};
pub use tree::{MenuNode, MenuTree, NodeId, NodeKind, ObservedPin};

use crate::config::{SENSOR_PINS, THROTTLE_PIN};
use crate::error::Error;

/// Build the cluster's menu:
///
/// ```text
/// Dashboard            (observes throttle)
/// └── Main
///     ├── Sensors
///     │   ├── Sensor 1 (observes its channel)
///     │   ├── Sensor 2
///     │   └── Sensor 3
///     ├── Settings
///     └── Other
/// ```
pub fn build_default_tree() -> Result<MenuTree, Error> {
    let mut tree = MenuTree::new("Dashboard");
    let root = tree.root();
    tree.observe(root, THROTTLE_PIN)?;

    let main = tree.add_child(root, "Main", NodeKind::MenuRoot)?;

    let sensors = tree.add_item(main, "Sensors")?;
    for (name, pin) in ["Sensor 1", "Sensor 2", "Sensor 3"].into_iter().zip(SENSOR_PINS) {
        let sensor = tree.add_item(sensors, name)?;
        tree.observe(sensor, pin)?;
    }

    tree.add_item(main, "Settings")?;
    tree.add_item(main, "Other")?;
    Ok(tree)
}
