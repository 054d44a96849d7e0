//! Color constants for the monitor panels.
//!
//! Standard colors come from the `RgbColor` trait constants; the rest are
//! hand-tuned Rgb565 values (5 bits red, 6 bits green, 5 bits blue).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::thresholds::Band;

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Backgrounds.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Text and axes.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Hot band, stop popup.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Normal band.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue. Cold band.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Pure yellow. Sensor fault highlight.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Plot line and markers. RGB565: (4, 40, 31), a light blue.
pub const PLOT_LINE: Rgb565 = Rgb565::new(4, 40, 31);

/// Grid lines and dividers. RGB565: (8, 16, 8), roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Header bar background. RGB565: (2, 6, 6).
pub const HEADER_BG: Rgb565 = Rgb565::new(2, 6, 6);

/// Unlit LED body. RGB565: (4, 8, 4).
pub const LED_OFF: Rgb565 = Rgb565::new(4, 8, 4);

/// Indicator color for a band (matches the lit RGB LED channel).
pub const fn band_color(band: Band) -> Rgb565 {
    match band {
        Band::Cold => BLUE,
        Band::Normal => GREEN,
        Band::Hot => RED,
    }
}
