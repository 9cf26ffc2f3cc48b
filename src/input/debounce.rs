//! Run-length debounce filter.
//!
//! Each call to [`EdgeDetector::sample`] is one debounce tick.  A new
//! level is only accepted after it has been seen on `stable_ticks`
//! consecutive ticks, so thresholds are independent of the actual task
//! rate.  While the accepted level is "pressed" a hold counter runs and
//! fires [`Edge::Held`] once per press.

use crate::config::{BUTTON_PRESSED_LEVEL, DEBOUNCE_STABLE_TICKS, HOLD_TICKS};

/// Debounced transition reported by [`EdgeDetector::sample`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
    Held,
}

/// Thresholds for one [`EdgeDetector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Consecutive identical samples needed to accept a level. Values
    /// below 1 are treated as 1.
    pub stable_ticks: u8,
    /// Ticks in the pressed state before `Held` fires.
    pub hold_ticks: u16,
    /// Raw level that means "pressed" (`false` for active-low inputs).
    pub pressed_level: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            stable_ticks: DEBOUNCE_STABLE_TICKS,
            hold_ticks: HOLD_TICKS,
            pressed_level: BUTTON_PRESSED_LEVEL,
        }
    }
}

/// Debounce state for a single input.
#[derive(Clone, Copy, Debug)]
pub struct EdgeDetector {
    config: DebounceConfig,
    stable: bool,
    candidate: bool,
    run_length: u8,
    held_ticks: u16,
    held_fired: bool,
}

impl EdgeDetector {
    /// Create a detector that starts in the released state.
    pub const fn new(config: DebounceConfig) -> Self {
        let released = !config.pressed_level;
        Self {
            config,
            stable: released,
            candidate: released,
            run_length: 0,
            held_ticks: 0,
            held_fired: false,
        }
    }

    /// Feed one raw sample; returns at most one edge for this tick.
    ///
    /// A transition takes priority over `Held` on the same tick.
    pub fn sample(&mut self, raw: bool) -> Option<Edge> {
        if raw == self.candidate {
            self.run_length = self.run_length.saturating_add(1);
        } else {
            self.candidate = raw;
            self.run_length = 1;
        }

        if self.run_length >= self.config.stable_ticks.max(1) && self.candidate != self.stable {
            self.stable = self.candidate;
            self.held_ticks = 0;
            self.held_fired = false;
            return Some(if self.stable == self.config.pressed_level {
                Edge::Pressed
            } else {
                Edge::Released
            });
        }

        if self.is_pressed() {
            self.held_ticks = self.held_ticks.saturating_add(1);
            if !self.held_fired && self.held_ticks >= self.config.hold_ticks {
                self.held_fired = true;
                return Some(Edge::Held);
            }
        }

        None
    }

    /// Debounced level: `true` while the input is considered pressed.
    pub fn is_pressed(&self) -> bool {
        self.stable == self.config.pressed_level
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
