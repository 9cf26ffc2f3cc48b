//! GPIO button inputs.
//!
//! The pins are plain pulled-up inputs; debouncing happens in the
//! periodic debounce task, which polls them through [`DigitalInputs`].

use dashcluster::config::{BUTTON_COUNT, BUTTON_PRESSED_LEVEL, FIRST_BUTTON_PIN};
use dashcluster::input::{DigitalInputs, PinId};
use embassy_stm32::gpio::Input;

/// The four navigation buttons, in `Button` order (Up, Right, Down, Left).
pub struct ButtonPins {
    pins: [Input<'static>; BUTTON_COUNT],
}

impl ButtonPins {
    pub fn new(pins: [Input<'static>; BUTTON_COUNT]) -> Self {
        Self { pins }
    }
}

impl DigitalInputs for ButtonPins {
    fn read_digital(&mut self, pin: PinId) -> bool {
        pin.checked_sub(FIRST_BUTTON_PIN)
            .and_then(|i| self.pins.get(i as usize))
            .map(|input| input.is_high())
            // unknown pins read as released
            .unwrap_or(!BUTTON_PRESSED_LEVEL)
    }
}
