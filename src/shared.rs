//! State shared between the main loop and the periodic tasks.
//!
//! - The [`Navigator`] (tree, mode, active node, redraw request,
//!   inactivity counter) sits behind a blocking mutex.  On the target the
//!   mutex is `CriticalSectionRawMutex`, so a multi-field read such as
//!   `(mode, active)` can never observe a half-applied transition.
//! - Button edges go through the lock-free [`EventAccumulator`].
//!
//! Closures passed to [`Shared::with`] must not call back into the same
//! `Shared`; the inner `RefCell` would panic on the nested borrow.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::input::EventAccumulator;
use crate::menu::nav::{Mode, Navigator};
use crate::menu::tree::NodeId;

pub struct Shared<M: RawMutex> {
    nav: Mutex<M, RefCell<Navigator>>,
    events: EventAccumulator,
}

impl<M: RawMutex> Shared<M> {
    pub fn new(nav: Navigator) -> Self {
        Self {
            nav: Mutex::new(RefCell::new(nav)),
            events: EventAccumulator::new(),
        }
    }

    /// Run `f` with exclusive access to the navigator.
    pub fn with<R>(&self, f: impl FnOnce(&mut Navigator) -> R) -> R {
        self.nav.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Consistent `(mode, active)` pair.
    pub fn position(&self) -> (Mode, NodeId) {
        self.with(|nav| nav.position())
    }

    pub fn events(&self) -> &EventAccumulator {
        &self.events
    }
}
