//! Drawing of [`View`]s onto the two 128×64 monochrome displays.
//!
//! Primary (left) display: dashboard speed, or the menu list with the
//! highlighted row inverted.  Secondary (right) display: details for
//! whatever the primary shows.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use super::input_logic::visible_window;
use super::view::View;
use crate::menu::tree::ObservedPin;

/// Display width in pixels.
pub const WIDTH: u32 = 128;

/// Height of one list row (FONT_6X10 line).
pub const ROW_HEIGHT: i32 = 10;

/// Top of the first list row, below the title and separator.
pub const LIST_TOP: i32 = 14;

/// List rows that fit under the title.
pub const LIST_ROWS: usize = 5;

/// Throttle line at the bottom of the dashboard.
const THROTTLE_TOP: i32 = 52;

fn text_style(color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(color)
        .build()
}

fn large_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_10X20, BinaryColor::On)
}

fn line<D>(display: &mut D, text: &str, x: i32, top: i32, color: BinaryColor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(text, Point::new(x, top), text_style(color), Baseline::Top).draw(display)?;
    Ok(())
}

fn reading_line(reading: &ObservedPin) -> String<24> {
    let mut s = String::new();
    let _ = write!(s, "A{}: {}", reading.pin, reading.last);
    s
}

/// Paint `view` on the primary display.
pub fn draw_primary<D>(view: &View, display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;

    match view {
        View::Dashboard { readings } => {
            // no speed source yet
            Text::with_baseline("XX", Point::new(8, 16), large_style(), Baseline::Top)
                .draw(display)?;
            line(display, "mph", 96, 26, BinaryColor::On)?;

            if let Some(throttle) = readings.first() {
                let mut value: String<16> = String::new();
                let _ = write!(value, "THR {}", throttle.last);
                line(display, value.as_str(), 0, THROTTLE_TOP, BinaryColor::On)?;
            }
        }
        View::Menu {
            title,
            items,
            selected,
            ..
        } => {
            line(display, title.as_str(), 0, 0, BinaryColor::On)?;
            Line::new(Point::new(0, 11), Point::new(WIDTH as i32 - 1, 11))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(display)?;

            let window = visible_window(*selected, items.len(), LIST_ROWS);
            for (row, index) in window.enumerate() {
                let top = LIST_TOP + row as i32 * ROW_HEIGHT;
                let name = items[index].as_str();
                if index == *selected {
                    Rectangle::new(Point::new(0, top), Size::new(WIDTH, ROW_HEIGHT as u32))
                        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                        .draw(display)?;
                    line(display, name, 2, top, BinaryColor::Off)?;
                } else {
                    line(display, name, 2, top, BinaryColor::On)?;
                }
            }
        }
        View::Leaf { title, readings } => {
            line(display, title.as_str(), 0, 0, BinaryColor::On)?;
            if let Some(r) = readings.first() {
                let mut value: String<12> = String::new();
                let _ = write!(value, "{}", r.last);
                Text::with_baseline(value.as_str(), Point::new(8, 24), large_style(), Baseline::Top)
                    .draw(display)?;
            }
        }
    }

    Ok(())
}

/// Paint the detail screen for `view` on the secondary display.
pub fn draw_secondary<D>(view: &View, display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;

    let mut top = 0;
    match view {
        View::Dashboard { readings } => {
            line(display, "STATUS", 0, top, BinaryColor::On)?;
            top += ROW_HEIGHT + 2;
            for r in readings {
                line(display, reading_line(r).as_str(), 0, top, BinaryColor::On)?;
                top += ROW_HEIGHT;
            }
        }
        View::Menu {
            items, selected, ..
        } => {
            if let Some(name) = items.get(*selected) {
                let mut detail: String<32> = String::new();
                let _ = write!(detail, "[{}]", name.as_str());
                line(display, detail.as_str(), 0, top, BinaryColor::On)?;
            }
            top += ROW_HEIGHT + 2;
            for r in view.readings() {
                line(display, reading_line(r).as_str(), 0, top, BinaryColor::On)?;
                top += ROW_HEIGHT;
            }
        }
        View::Leaf { readings, .. } => {
            for r in readings {
                line(display, reading_line(r).as_str(), 0, top, BinaryColor::On)?;
                top += ROW_HEIGHT;
            }
        }
    }

    Ok(())
}
