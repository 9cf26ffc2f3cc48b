//! STM32F446 bindings for the library's board traits.
//!
//! - **buttons**: GPIO inputs behind `DigitalInputs`
//! - **analog**: ADC1 channels behind `AnalogInputs`
//! - **can**: bxCAN behind `CanBus`
//! - **display**: the two SSD1306 panels behind `Render`

pub mod analog;
pub mod buttons;
pub mod can;
pub mod display;
