//! History plot: title, unit axis label, auto-scaled Y axis, connected line
//! with point markers, and a legend.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │        Temperature Over Time         │
//! │ Temperature (C)                      │
//! │  41.2 ┤      o──o                    │
//! │       │  o──o    \                   │
//! │       │           o──o──o            │
//! │  35.8 ┼───────────────────────────── │
//! │                        ── Temperature│
//! └──────────────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::bridge::PlotFrame;
use crate::colors::{BLACK, GRAY, PLOT_LINE, WHITE};
use crate::styles::{CENTERED, LABEL_STYLE_WHITE, LEFT_ALIGNED, RIGHT_ALIGNED, TICK_STYLE, TITLE_STYLE_WHITE};

/// Plot title.
pub const PLOT_TITLE: &str = "Temperature Over Time";

/// Legend entry for the reading series.
pub const LEGEND_LABEL: &str = "Temperature";

// Margins between the widget area and the data region
const MARGIN_LEFT: i32 = 42;
const MARGIN_TOP: i32 = 34;
const MARGIN_RIGHT: i32 = 8;
const MARGIN_BOTTOM: i32 = 16;

/// Smallest Y span shown, so a flat series is not stretched into noise.
const MIN_SPAN: f32 = 1.0;

/// Headroom above and below the data, as a fraction of the span.
const PADDING: f32 = 0.1;

const MARKER_DIAMETER: u32 = 5;

const BACKGROUND: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);
const AXIS: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(WHITE, 1);
const GRID: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);
const SERIES: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(PLOT_LINE, 1);
const MARKER: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(PLOT_LINE);

/// Y-axis bounds for `values`: min/max of the finite values, widened to
/// [`MIN_SPAN`] and padded by [`PADDING`] on both sides.
///
/// An empty (or all non-finite) series gets `(0.0, 1.0)`.
pub fn y_range(values: &[f32]) -> (f32, f32) {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let Some(first) = finite.next() else {
        return (0.0, 1.0);
    };
    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let span = (max - min).max(MIN_SPAN);
    let mid = (min + max) / 2.0;
    let half = span / 2.0 + span * PADDING;
    (mid - half, mid + half)
}

/// Screen row for `value` in a region starting at `top` with `height` rows.
/// Values outside `range` are clamped to the region.
pub fn value_to_y(
    value: f32,
    range: (f32, f32),
    top: i32,
    height: u32,
) -> i32 {
    let (min, max) = range;
    let bottom = top + height as i32 - 1;
    if !(max > min) || !value.is_finite() {
        return top + (height as i32 - 1) / 2;
    }
    let scale = (height as f32 - 1.0) / (max - min);
    (bottom - libm::roundf((value - min) * scale) as i32).clamp(top, bottom)
}

/// Screen column for point `index` of `count`, spread across `width` columns.
pub fn index_to_x(
    index: usize,
    count: usize,
    left: i32,
    width: u32,
) -> i32 {
    if count < 2 {
        return left;
    }
    let span = width.saturating_sub(1) as usize;
    left + (index.min(count - 1) * span / (count - 1)) as i32
}

fn format_tick(value: f32) -> String<12> {
    let mut s = String::new();
    write!(s, "{value:.1}").ok();
    s
}

/// Clear `area` and draw the whole plot for `frame`.
///
/// Handles an empty frame by drawing the axes and a "No data" note.
pub fn draw_plot<D>(
    display: &mut D,
    area: Rectangle,
    frame: &PlotFrame,
) where
    D: DrawTarget<Color = Rgb565>,
{
    area.into_styled(BACKGROUND).draw(display).ok();

    let left = area.top_left.x;
    let top = area.top_left.y;
    let center_x = left + area.size.width as i32 / 2;

    Text::with_text_style(PLOT_TITLE, Point::new(center_x, top + 13), TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(frame.axis_label(), Point::new(left + 4, top + 27), LABEL_STYLE_WHITE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let width = area.size.width as i32 - MARGIN_LEFT - MARGIN_RIGHT;
    let height = area.size.height as i32 - MARGIN_TOP - MARGIN_BOTTOM;
    if width < 8 || height < 8 {
        return;
    }
    let region = Rectangle::new(
        Point::new(left + MARGIN_LEFT, top + MARGIN_TOP),
        Size::new(width as u32, height as u32),
    );
    let data_left = region.top_left.x;
    let data_top = region.top_left.y;
    let data_right = data_left + width - 1;
    let data_bottom = data_top + height - 1;

    // Axes and a mid grid line
    let mid_y = data_top + (height - 1) / 2;
    Line::new(Point::new(data_left, mid_y), Point::new(data_right, mid_y))
        .into_styled(GRID)
        .draw(display)
        .ok();
    Line::new(Point::new(data_left, data_top), Point::new(data_left, data_bottom))
        .into_styled(AXIS)
        .draw(display)
        .ok();
    Line::new(Point::new(data_left, data_bottom), Point::new(data_right, data_bottom))
        .into_styled(AXIS)
        .draw(display)
        .ok();

    draw_legend(display, Point::new(data_right, area.top_left.y + area.size.height as i32 - 4));

    let values = frame.values.as_slice();
    if values.is_empty() {
        Text::with_text_style("No data", region.center(), LABEL_STYLE_WHITE, CENTERED)
            .draw(display)
            .ok();
        return;
    }

    let range = y_range(values);
    let tick_x = data_left - 4;
    Text::with_text_style(&format_tick(range.1), Point::new(tick_x, data_top + 7), TICK_STYLE, RIGHT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style(&format_tick(range.0), Point::new(tick_x, data_bottom), TICK_STYLE, RIGHT_ALIGNED)
        .draw(display)
        .ok();

    let count = values.len();
    let to_point = |i: usize, v: f32| {
        Point::new(
            index_to_x(i, count, data_left, width as u32),
            value_to_y(v, range, data_top, height as u32),
        )
    };

    let mut previous: Option<Point> = None;
    for (i, value) in values.iter().enumerate() {
        let point = to_point(i, *value);
        if let Some(prev) = previous {
            Line::new(prev, point).into_styled(SERIES).draw(display).ok();
        }
        previous = Some(point);
    }

    // Markers on top of the line
    for (i, value) in values.iter().enumerate() {
        Circle::with_center(to_point(i, *value), MARKER_DIAMETER)
            .into_styled(MARKER)
            .draw(display)
            .ok();
    }
}

/// Legend sample line plus label, right-aligned at `anchor` (text baseline).
fn draw_legend<D>(
    display: &mut D,
    anchor: Point,
) where
    D: DrawTarget<Color = Rgb565>,
{
    // FONT_6X10 is 6 px per glyph
    let text_width = LEGEND_LABEL.len() as i32 * 6;
    let line_end = anchor.x - text_width - 4;
    let line_y = anchor.y - 3;
    Line::new(Point::new(line_end - 12, line_y), Point::new(line_end, line_y))
        .into_styled(SERIES)
        .draw(display)
        .ok();
    Text::with_text_style(LEGEND_LABEL, anchor, LABEL_STYLE_WHITE, RIGHT_ALIGNED)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::history::Snapshot;
    use crate::units::TemperatureUnit;

    /// Full-screen framebuffer.
    struct Canvas {
        pixels: std::vec::Vec<Rgb565>,
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                pixels: std::vec![Rgb565::new(1, 1, 1); (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            }
        }

        fn count(
            &self,
            color: Rgb565,
        ) -> usize {
            self.pixels.iter().filter(|p| **p == color).count()
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x >= 0 && point.y >= 0 && (point.x as u32) < SCREEN_WIDTH && (point.y as u32) < SCREEN_HEIGHT {
                    self.pixels[point.y as usize * SCREEN_WIDTH as usize + point.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    fn frame(values: &[f32]) -> PlotFrame {
        PlotFrame {
            values: Snapshot::from_slice(values).unwrap(),
            unit: TemperatureUnit::Celsius,
        }
    }

    fn full_screen() -> Rectangle { Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    #[test]
    fn test_y_range_pads_span() {
        let (lo, hi) = y_range(&[30.0, 40.0]);
        assert!((lo - 29.0).abs() < 1e-4, "lo = {lo}");
        assert!((hi - 41.0).abs() < 1e-4, "hi = {hi}");
    }

    #[test]
    fn test_y_range_flat_series() {
        let (lo, hi) = y_range(&[37.0, 37.0, 37.0]);
        assert!(hi - lo >= MIN_SPAN);
        assert!(lo < 37.0 && 37.0 < hi);
    }

    #[test]
    fn test_y_range_empty_and_non_finite() {
        assert_eq!(y_range(&[]), (0.0, 1.0));
        assert_eq!(y_range(&[f32::NAN]), (0.0, 1.0));
    }

    #[test]
    fn test_value_to_y_orientation() {
        let range = (0.0, 10.0);
        assert_eq!(value_to_y(10.0, range, 20, 101), 20, "max at the top");
        assert_eq!(value_to_y(0.0, range, 20, 101), 120, "min at the bottom");
        assert_eq!(value_to_y(5.0, range, 20, 101), 70);
        assert_eq!(value_to_y(99.0, range, 20, 101), 20, "clamped");
    }

    #[test]
    fn test_index_to_x_spread() {
        assert_eq!(index_to_x(0, 1, 40, 200), 40);
        assert_eq!(index_to_x(0, 3, 40, 201), 40);
        assert_eq!(index_to_x(1, 3, 40, 201), 140);
        assert_eq!(index_to_x(2, 3, 40, 201), 240);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(36.66).as_str(), "36.7");
        assert_eq!(format_tick(-4.0).as_str(), "-4.0");
    }

    #[test]
    fn test_empty_plot_draws_axes_only() {
        let mut canvas = Canvas::new();
        draw_plot(&mut canvas, full_screen(), &frame(&[]));
        assert!(canvas.count(WHITE) > 0, "title, label and axes");
        // Only the legend sample line uses the series color
        assert!(canvas.count(PLOT_LINE) <= 13);
    }

    #[test]
    fn test_series_drawn() {
        let mut canvas = Canvas::new();
        draw_plot(&mut canvas, full_screen(), &frame(&[35.0, 36.0, 38.5, 41.0, 39.0]));
        assert!(canvas.count(PLOT_LINE) > 100, "line and markers");
    }

    #[test]
    fn test_redraw_clears_previous_plot() {
        let mut canvas = Canvas::new();
        draw_plot(&mut canvas, full_screen(), &frame(&[35.0, 36.0, 38.5, 41.0, 39.0]));
        draw_plot(&mut canvas, full_screen(), &frame(&[]));

        let mut fresh = Canvas::new();
        draw_plot(&mut fresh, full_screen(), &frame(&[]));
        assert!(canvas.pixels == fresh.pixels, "old series must not survive a redraw");
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let mut canvas = Canvas::new();
        let area = Rectangle::new(Point::new(300, 230), Size::new(10, 5));
        draw_plot(&mut canvas, area, &frame(&[1.0, 2.0]));
    }
}
