//! Redraw scheduling for the plot.
//!
//! The bridge lives on the visualization side. It asks for a redraw when the
//! control loop has signalled a new reading, when the unit was toggled, and
//! once at startup so an empty plot is shown before the first sample.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::history::Snapshot;
use crate::state::MonitorState;
use crate::units::TemperatureUnit;
use crate::widgets::draw_plot;

/// Everything needed to draw one plot: the unit-adjusted history and its unit.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotFrame {
    /// Readings in `unit`, oldest first.
    pub values: Snapshot,
    pub unit: TemperatureUnit,
}

impl PlotFrame {
    /// Y-axis label for this frame's unit.
    pub const fn axis_label(&self) -> &'static str { self.unit.axis_label() }

    /// Most recent value, in `unit`.
    pub fn latest(&self) -> Option<f32> { self.values.last().copied() }

    /// Draw the plot into `area`.
    pub fn render<D>(
        &self,
        display: &mut D,
        area: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        draw_plot(display, area, self);
    }
}

/// Decides when the plot must be redrawn.
pub struct VisualizationBridge<'s> {
    state: &'s MonitorState,
    redraw: bool,
}

impl<'s> VisualizationBridge<'s> {
    /// The first [`Self::poll`] always returns a frame.
    pub const fn new(state: &'s MonitorState) -> Self {
        Self {
            state,
            redraw: true,
        }
    }

    /// Switch units and schedule a redraw. Returns the new unit.
    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.redraw = true;
        self.state.toggle_unit()
    }

    /// Force a redraw on the next poll (e.g. after a popup covered the plot).
    pub fn invalidate(&mut self) { self.redraw = true; }

    /// A fresh frame if new data arrived or a redraw was scheduled since the
    /// last call.
    pub fn poll(&mut self) -> Option<PlotFrame> {
        let new_data = self.state.new_data().try_take().is_some();
        if !(new_data || self.redraw) {
            return None;
        }
        self.redraw = false;
        let (values, unit) = self.state.snapshot_current();
        Some(PlotFrame { values, unit })
    }
}
