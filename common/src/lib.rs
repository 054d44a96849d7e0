//! Shared core of the thermistor monitor.
//!
//! This crate contains the platform-agnostic pieces used by both the desktop
//! monitor and the Pico 2 firmware:
//!
//! - [`thermistor`]: Voltage to Celsius conversion (Beta equation)
//! - [`thresholds`]: The body-temperature band and `classify`
//! - [`lcd`]: HD44780 character display driver (4-bit bus)
//! - [`actuation`]: RGB indicator and buzzer alert patterns
//! - [`history`]: Bounded FIFO of recent readings
//! - [`state`]: Mutex-guarded state shared between the two execution contexts
//! - [`control`]: The sampling/actuation state machine
//! - [`bridge`]: Redraw scheduling for the visualization surface
//! - [`widgets`]: History plot and popups (generic `DrawTarget`)
//! - [`hal`]: Capability traits and `embedded-hal` adapters
//! - [`fake`]: Recording fakes for the capability traits
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. Tests run on the host with `std`
//! so that the concurrency properties can be exercised with real threads.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod actuation;
pub mod bridge;
pub mod colors;
pub mod config;
pub mod control;
pub mod error;
pub mod event_log;
pub mod fake;
pub mod hal;
pub mod history;
pub mod lcd;
pub mod state;
pub mod styles;
pub mod thermistor;
pub mod thresholds;
pub mod units;
pub mod widgets;

// Re-export commonly used items
pub use actuation::{ActuationController, Indicator};
pub use bridge::{PlotFrame, VisualizationBridge};
pub use control::{ControlLoop, CycleEvent, CycleOutcome, CycleState};
pub use error::{HardwareFault, SensorFault};
pub use history::HistoryBuffer;
pub use lcd::Hd44780;
pub use state::MonitorState;
pub use thermistor::{TemperatureSensor, ThermistorParams};
pub use thresholds::{Band, classify};
pub use units::TemperatureUnit;
