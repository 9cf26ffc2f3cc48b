//! ADC1 analog inputs.
//!
//! Each observed channel is read on demand by the pin-watch task through
//! [`AnalogInputs`]; there is no background conversion.

use dashcluster::input::{AnalogInputs, PinId};
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;

pub const ANALOG_CHANNELS: usize = 4;

/// ADC1 with the observed channels, keyed by logical pin id.
pub struct AnalogPins {
    adc: Adc<'static, ADC1>,
    channels: [(PinId, AnyAdcChannel<ADC1>); ANALOG_CHANNELS],
}

impl AnalogPins {
    pub fn new(adc: Adc<'static, ADC1>, channels: [(PinId, AnyAdcChannel<ADC1>); ANALOG_CHANNELS]) -> Self {
        Self { adc, channels }
    }
}

impl AnalogInputs for AnalogPins {
    fn read_analog(&mut self, pin: PinId) -> u32 {
        match self.channels.iter_mut().find(|(id, _)| *id == pin) {
            Some((_, channel)) => u32::from(self.adc.blocking_read(channel)),
            None => 0,
        }
    }
}
