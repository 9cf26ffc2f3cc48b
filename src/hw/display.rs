//! SSD1306 OLED display pair.

use dashcluster::config::{PRIMARY_DISPLAY_ADDR, SECONDARY_DISPLAY_ADDR};
use dashcluster::ui::draw::{draw_primary, draw_secondary};
use dashcluster::ui::{Render, View};
use defmt::warn;
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Blocking;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub type BoardDisplays = Displays<I2c<'static, Blocking>, I2c<'static, Blocking>>;

/// Initialise one SSD1306 at `addr` and clear the screen.
pub fn init<I2C>(i2c: I2C, addr: u8) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, addr);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        warn!("Display {=u8:#x}: init failed", addr);
    }
    display.clear_buffer();
    if display.flush().is_err() {
        warn!("Display {=u8:#x}: flush failed", addr);
    }
    display
}

/// Primary (navigation) and secondary (detail) panels.
pub struct Displays<A, B> {
    primary: Display<A>,
    secondary: Display<B>,
}

impl<A, B> Displays<A, B>
where
    A: embedded_hal::i2c::I2c,
    B: embedded_hal::i2c::I2c,
{
    pub fn new(primary: A, secondary: B) -> Self {
        Self {
            primary: init(primary, PRIMARY_DISPLAY_ADDR),
            secondary: init(secondary, SECONDARY_DISPLAY_ADDR),
        }
    }
}

impl<A, B> Render for Displays<A, B>
where
    A: embedded_hal::i2c::I2c,
    B: embedded_hal::i2c::I2c,
{
    fn draw(&mut self, view: &View) {
        // a failed panel keeps its old frame; the other one still updates
        if draw_primary(view, &mut self.primary).is_ok() && self.primary.flush().is_err() {
            warn!("Display {=u8:#x}: flush failed", PRIMARY_DISPLAY_ADDR);
        }
        if draw_secondary(view, &mut self.secondary).is_ok() && self.secondary.flush().is_err() {
            warn!("Display {=u8:#x}: flush failed", SECONDARY_DISPLAY_ADDR);
        }
    }
}
