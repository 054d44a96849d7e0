//! Compile-time configuration shared by the desktop monitor and the firmware.
//!
//! The sampling cadence is fixed; nothing here is meant to be tuned at runtime.

// =============================================================================
// Control Loop Timing
// =============================================================================

/// Sleep between the end of one cycle and the start of the next.
///
/// The real period is longer: the display write and the blocking alert
/// pattern run inside the cycle (see [`crate::actuation`]).
pub const SAMPLE_INTERVAL_MS: u32 = 1000;

/// Granularity of the idle sleep. A stop request is noticed within one slice.
pub const IDLE_SLICE_MS: u32 = 50;

const _: () = assert!(SAMPLE_INTERVAL_MS % IDLE_SLICE_MS == 0);

// =============================================================================
// History
// =============================================================================

/// Maximum number of readings kept for the plot.
pub const HISTORY_CAPACITY: usize = 50;

// =============================================================================
// Display Configuration
// =============================================================================

/// Plot surface width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Plot surface height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

/// Height reserved under the plot for status panels.
pub const FOOTER_HEIGHT: u32 = 64;

/// Plot area height (between header and footer).
pub const PLOT_HEIGHT: u32 = SCREEN_HEIGHT - HEADER_HEIGHT - FOOTER_HEIGHT;

/// Screen center X coordinate. Used for centering popups and text.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate. Used for centering popups and text.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

const _: () = assert!(HEADER_HEIGHT + FOOTER_HEIGHT < SCREEN_HEIGHT);
