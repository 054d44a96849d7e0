//! Widgets for the plot surface.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>`, so the same code
//! draws to the simulator window and to the ST7789 panel.

mod plot;
mod popups;

pub use plot::{LEGEND_LABEL, PLOT_TITLE, draw_plot, index_to_x, value_to_y, y_range};
pub use popups::{draw_fault_popup, draw_stopped_popup, draw_unit_popup};
