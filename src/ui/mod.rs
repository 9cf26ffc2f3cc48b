//! User interface subsystem - two displays + four buttons.
//!
//! [`poll`] is one iteration of the cooperative main loop: it drains the
//! button events published by the debounce task, feeds them to the
//! navigator, and repaints the active node when a redraw is pending.
//!
//! ## Components
//!
//! - **View**: lock-free snapshot of the active node
//! - **Draw**: `embedded-graphics` rendering for both displays
//! - **Input logic**: cursor wrap and list scrolling math

pub mod draw;
pub mod input_logic;
pub mod view;

pub use view::{Render, View};

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::shared::Shared;

/// Run one main-loop iteration.  Returns `true` if a frame was drawn.
///
/// Release and held events are consumed here as well so they cannot
/// pile up; they do not drive navigation.
pub fn poll<M: RawMutex, R: Render>(shared: &Shared<M>, renderer: &mut R) -> bool {
    let events = shared.events().take();
    if !events.pressed.is_empty() {
        shared.with(|nav| nav.apply_presses(events.pressed));
    }
    if !events.released.is_empty() || !events.held.is_empty() {
        trace!("UI: released={} held={}", events.released, events.held);
    }

    let Some((view, ticket)) = shared.with(|nav| nav.take_view()) else {
        return false;
    };
    renderer.draw(&view);
    shared.with(|nav| nav.finish_render(ticket));
    true
}
