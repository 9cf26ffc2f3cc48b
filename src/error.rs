//! Unified error type for dashcluster.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Only construction-time operations return errors; the running system
//! degrades instead of failing.

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Menu tree
    /// The node arena has no free slot.
    TreeFull,

    /// The parent already holds `MAX_CHILDREN` children.
    TooManyChildren,

    /// The node already observes `MAX_OBSERVED_PINS` inputs.
    TooManyObservedPins,

    /// A `NodeId` that does not belong to this tree.
    UnknownNode,

    /// Only the tree root may be a `DashboardRoot`.
    SecondDashboardRoot,

    // CAN
    /// Identifier outside the 11-bit standard range.
    InvalidCanId(u16),

    /// Payload longer than 8 bytes.
    FrameTooLong,
}
