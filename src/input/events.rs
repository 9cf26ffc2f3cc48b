//! Cross-context button event accumulator.
//!
//! The debounce task ORs new edges in; the main loop swaps each set back
//! to zero.  Both are single atomic read-modify-write operations, so no
//! bit set by the task can be lost between the main loop's read and its
//! clear.

use core::sync::atomic::{AtomicU8, Ordering};

use super::Button;

/// One bit per [`Button`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(pub u8);

impl ButtonMask {
    pub const NONE: Self = Self(0);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    /// Buttons in this mask, in [`Button::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

/// Edges collected since the last [`EventAccumulator::take`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvents {
    pub pressed: ButtonMask,
    pub released: ButtonMask,
    pub held: ButtonMask,
}

impl ButtonEvents {
    pub const fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty() && self.held.is_empty()
    }
}

pub struct EventAccumulator {
    pressed: AtomicU8,
    released: AtomicU8,
    held: AtomicU8,
}

impl EventAccumulator {
    pub const fn new() -> Self {
        Self {
            pressed: AtomicU8::new(0),
            released: AtomicU8::new(0),
            held: AtomicU8::new(0),
        }
    }

    /// Merge new edges (task context).
    pub fn publish(&self, events: ButtonEvents) {
        if !events.pressed.is_empty() {
            self.pressed.fetch_or(events.pressed.0, Ordering::AcqRel);
        }
        if !events.released.is_empty() {
            self.released.fetch_or(events.released.0, Ordering::AcqRel);
        }
        if !events.held.is_empty() {
            self.held.fetch_or(events.held.0, Ordering::AcqRel);
        }
    }

    /// Read and clear all three sets (main-loop context).
    pub fn take(&self) -> ButtonEvents {
        ButtonEvents {
            pressed: ButtonMask(self.pressed.swap(0, Ordering::AcqRel)),
            released: ButtonMask(self.released.swap(0, Ordering::AcqRel)),
            held: ButtonMask(self.held.swap(0, Ordering::AcqRel)),
        }
    }
}

impl Default for EventAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
