//! Non-modal popup overlays for status messages.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{GRAY, RED, WHITE};
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, POPUP_STYLE_WHITE};
use crate::units::TemperatureUnit;

const UNIT_POPUP_WIDTH: u32 = 160;
const UNIT_POPUP_HEIGHT: u32 = 50;
const UNIT_POPUP_X: i32 = (SCREEN_WIDTH - UNIT_POPUP_WIDTH) as i32 / 2;
const UNIT_POPUP_Y: i32 = (SCREEN_HEIGHT - UNIT_POPUP_HEIGHT) as i32 / 2;

const STOP_POPUP_WIDTH: u32 = 180;
const STOP_POPUP_HEIGHT: u32 = 60;
const STOP_POPUP_X: i32 = (SCREEN_WIDTH - STOP_POPUP_WIDTH) as i32 / 2;
const STOP_POPUP_Y: i32 = (SCREEN_HEIGHT - STOP_POPUP_HEIGHT) as i32 / 2;

const UNIT_TEXT_POS: Point = Point::new(CENTER_X, CENTER_Y + 5);
const STOP_TEXT1_POS: Point = Point::new(CENTER_X, CENTER_Y - 5);
const STOP_TEXT2_POS: Point = Point::new(CENTER_X, CENTER_Y + 15);

const WHITE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);
const RED_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(RED);
const GRAY_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(GRAY);

fn draw_frame<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    fill: PrimitiveStyle<Rgb565>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(x - 3, y - 3), Size::new(w + 6, h + 6))
        .into_styled(WHITE_FILL)
        .draw(display)
        .ok();

    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(fill)
        .draw(display)
        .ok();
}

/// "UNIT: C" / "UNIT: F", shown briefly after a toggle.
pub fn draw_unit_popup<D>(
    display: &mut D,
    unit: TemperatureUnit,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_frame(display, UNIT_POPUP_X, UNIT_POPUP_Y, UNIT_POPUP_WIDTH, UNIT_POPUP_HEIGHT, GRAY_FILL);

    let text = match unit {
        TemperatureUnit::Celsius => "UNIT: C",
        TemperatureUnit::Fahrenheit => "UNIT: F",
    };
    Text::with_text_style(text, UNIT_TEXT_POS, POPUP_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

/// "SENSOR: FAULT" / "SENSOR: OK", shown after the fault line is toggled.
pub fn draw_fault_popup<D>(
    display: &mut D,
    faulted: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let (fill, text) = if faulted { (RED_FILL, "SENSOR: FAULT") } else { (GRAY_FILL, "SENSOR: OK") };
    draw_frame(display, STOP_POPUP_X, UNIT_POPUP_Y, STOP_POPUP_WIDTH, UNIT_POPUP_HEIGHT, fill);

    Text::with_text_style(text, UNIT_TEXT_POS, POPUP_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

/// Shown once the control loop has stopped and released the outputs.
pub fn draw_stopped_popup<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_frame(display, STOP_POPUP_X, STOP_POPUP_Y, STOP_POPUP_WIDTH, STOP_POPUP_HEIGHT, RED_FILL);

    Text::with_text_style("MONITOR", STOP_TEXT1_POS, POPUP_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("STOPPED", STOP_TEXT2_POS, POPUP_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}
