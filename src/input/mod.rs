//! Navigation buttons and input sampling.
//!
//! Four physical buttons (active-low with internal pull-up):
//!   - UP    - move the cursor up (wraps)
//!   - RIGHT - descend into the highlighted entry
//!   - DOWN  - move the cursor down (wraps)
//!   - LEFT  - back out to the parent
//!
//! On the dashboard any press opens the menu.  The [`ButtonBank`] runs
//! one [`EdgeDetector`] per button inside the debounce task and
//! publishes the result into the [`EventAccumulator`].

pub mod debounce;
pub mod events;

pub use debounce::{DebounceConfig, Edge, EdgeDetector};
pub use events::{ButtonEvents, ButtonMask, EventAccumulator};

use crate::config::{BUTTON_COUNT, FIRST_BUTTON_PIN};

/// Logical input id as understood by the sampling traits.
pub type PinId = u8;

/// Digital pin reads, supplied by the board.
pub trait DigitalInputs {
    fn read_digital(&mut self, pin: PinId) -> bool;
}

/// Analog (ADC) reads, supplied by the board.
pub trait AnalogInputs {
    fn read_analog(&mut self, pin: PinId) -> u32;
}

/// Physical navigation buttons; discriminant is the bit index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [Button::Up, Button::Right, Button::Down, Button::Left];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Logical pin the button is wired to.
    pub const fn pin(self) -> PinId {
        FIRST_BUTTON_PIN + self as u8
    }
}

/// Debounce state for all four buttons (owned by the debounce task).
pub struct ButtonBank {
    detectors: [EdgeDetector; BUTTON_COUNT],
}

impl ButtonBank {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            detectors: [EdgeDetector::new(config); BUTTON_COUNT],
        }
    }

    /// Sample every button once and collect this tick's edges.
    pub fn sample<I: DigitalInputs>(&mut self, inputs: &mut I) -> ButtonEvents {
        let mut events = ButtonEvents::default();
        for (button, detector) in Button::ALL.into_iter().zip(self.detectors.iter_mut()) {
            match detector.sample(inputs.read_digital(button.pin())) {
                Some(Edge::Pressed) => {
                    debug!("Button: {} pressed", button);
                    events.pressed.insert(button);
                }
                Some(Edge::Released) => events.released.insert(button),
                Some(Edge::Held) => {
                    debug!("Button: {} held", button);
                    events.held.insert(button);
                }
                None => {}
            }
        }
        events
    }

    /// Sample every button and merge the edges into `acc`.
    pub fn sample_into<I: DigitalInputs>(&mut self, inputs: &mut I, acc: &EventAccumulator) {
        let events = self.sample(inputs);
        if !events.is_empty() {
            acc.publish(events);
        }
    }
}

impl Default for ButtonBank {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
