//! State shared between the control loop and the visualization context.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   append_reading()   ┌──────────────────────────┐
//! │ Control loop         │ ───────────────────▶ │ MonitorState             │
//! │ (worker thread /     │                      │  Mutex<RefCell<Inner>>   │
//! │  core 1)             │ ◀── stop_requested() │  new_data: Signal        │
//! └──────────────────────┘                      │  stop: AtomicBool        │
//!                                               └──────────────────────────┘
//!                                                   ▲               │
//!                           toggle_unit(), frame()  │               │ new_data
//!                                    ┌──────────────┴───────────────▼─┐
//!                                    │ Visualization (GUI loop/core 0)│
//!                                    └────────────────────────────────┘
//! ```
//!
//! Every read and write of the history, the unit, the statistics and the
//! event log happens inside one critical section, so a snapshot never sees a
//! half-evicted buffer. The control loop is the only writer of the history;
//! the visualization side is the only writer of the unit.

use core::cell::RefCell;
use core::fmt::Write;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use heapless::String;

use crate::error::SensorFault;
use crate::event_log::{EVENT_LINE_LENGTH, EventLog};
use crate::history::{HistoryBuffer, Snapshot};
use crate::thresholds::Band;
use crate::units::TemperatureUnit;

/// Raw mutex guarding [`MonitorState`]. Works across std threads (with the
/// `critical-section/std` implementation) and across RP2350 cores.
pub type StateMutex = CriticalSectionRawMutex;

/// Control loop counters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CycleStats {
    /// Cycles that produced a reading.
    pub readings: u32,
    /// Cycles skipped because of a sensor fault.
    pub faults: u32,
    /// Most recent reading in Celsius.
    pub last_reading: Option<f32>,
    /// Band of the most recent reading.
    pub last_band: Option<Band>,
    /// Most recent fault, cleared by the next good reading.
    pub last_fault: Option<SensorFault>,
}

struct Inner {
    history: HistoryBuffer,
    unit: TemperatureUnit,
    stats: CycleStats,
    events: EventLog,
}

/// Everything both contexts need to see, behind one lock.
pub struct MonitorState {
    inner: Mutex<StateMutex, RefCell<Inner>>,
    new_data: Signal<StateMutex, ()>,
    stop: AtomicBool,
}

impl MonitorState {
    /// Empty history, Celsius, no stop requested.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                history: HistoryBuffer::new(),
                unit: TemperatureUnit::Celsius,
                stats: CycleStats {
                    readings: 0,
                    faults: 0,
                    last_reading: None,
                    last_band: None,
                    last_fault: None,
                },
                events: EventLog::new(),
            })),
            new_data: Signal::new(),
            stop: AtomicBool::new(false),
        }
    }

    fn with<R>(
        &self,
        f: impl FnOnce(&mut Inner) -> R,
    ) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    // =========================================================================
    // Control loop side
    // =========================================================================

    /// Store a reading and wake the visualization side.
    ///
    /// Logs a line when the band differs from the previous reading.
    pub fn append_reading(
        &self,
        celsius: f32,
        band: Band,
    ) {
        self.with(|inner| {
            inner.history.append(celsius);
            if inner.stats.last_band != Some(band) {
                let mut line: String<EVENT_LINE_LENGTH> = String::new();
                write!(line, "Band {} at {:.2}C", band.label(), celsius).ok();
                inner.events.push(&line);
            }
            inner.stats.readings = inner.stats.readings.wrapping_add(1);
            inner.stats.last_reading = Some(celsius);
            inner.stats.last_band = Some(band);
            inner.stats.last_fault = None;
        });
        self.new_data.signal(());
    }

    /// Count a skipped cycle. History is left alone.
    pub fn record_fault(
        &self,
        fault: SensorFault,
    ) {
        self.with(|inner| {
            // Log the first of a run of identical faults only
            if inner.stats.last_fault != Some(fault) {
                let mut line: String<EVENT_LINE_LENGTH> = String::new();
                write!(line, "Sensor: {fault}").ok();
                inner.events.push(&line);
            }
            inner.stats.faults = inner.stats.faults.wrapping_add(1);
            inner.stats.last_fault = Some(fault);
        });
    }

    /// Append a line to the event log.
    pub fn log(
        &self,
        msg: &str,
    ) {
        self.with(|inner| inner.events.push(msg));
    }

    // =========================================================================
    // Visualization side
    // =========================================================================

    /// Switch between Celsius and Fahrenheit. Returns the new unit.
    pub fn toggle_unit(&self) -> TemperatureUnit {
        self.with(|inner| {
            inner.unit = inner.unit.toggle();
            let mut line: String<EVENT_LINE_LENGTH> = String::new();
            write!(line, "Unit: {}", inner.unit.symbol()).ok();
            inner.events.push(&line);
            inner.unit
        })
    }

    /// Current display unit.
    pub fn unit(&self) -> TemperatureUnit { self.with(|inner| inner.unit) }

    /// History converted to `unit`, copied under the lock.
    pub fn snapshot(
        &self,
        unit: TemperatureUnit,
    ) -> Snapshot {
        self.with(|inner| inner.history.snapshot(unit))
    }

    /// History in the current unit, plus that unit, from a single lock.
    pub fn snapshot_current(&self) -> (Snapshot, TemperatureUnit) {
        self.with(|inner| (inner.history.snapshot(inner.unit), inner.unit))
    }

    /// Number of stored readings.
    pub fn history_len(&self) -> usize { self.with(|inner| inner.history.len()) }

    /// Copy of the counters.
    pub fn stats(&self) -> CycleStats { self.with(|inner| inner.stats) }

    /// Copy of the event log.
    pub fn events(&self) -> EventLog { self.with(|inner| inner.events.clone()) }

    /// Raised after every [`Self::append_reading`].
    pub const fn new_data(&self) -> &Signal<StateMutex, ()> { &self.new_data }

    // =========================================================================
    // Stop request
    // =========================================================================

    /// Ask the control loop to stop. Observed at the next state transition or
    /// idle slice.
    pub fn request_stop(&self) { self.stop.store(true, Ordering::Release); }

    pub fn stop_requested(&self) -> bool { self.stop.load(Ordering::Acquire) }
}

impl Default for MonitorState {
    fn default() -> Self { Self::new() }
}
