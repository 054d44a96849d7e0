//! Recording fakes for the capability traits.
//!
//! Fakes share a [`Trace`] through a plain reference, so a test can hand the
//! fakes to a driver and still inspect what the driver did, including the
//! interleaving of pin writes and delays.
//!
//! ```ignore
//! let trace = Trace::<256>::new();
//! let mut pin = RecordingPin::new(&trace, 7);
//! pin.set_high();
//! assert_eq!(trace.events()[0], TraceEvent::Pin { id: 7, high: true });
//! ```

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

use crate::error::SensorFault;
use crate::hal::{AnalogInput, DigitalOutput, PwmOutput};

/// One recorded side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// Digital line `id` was written.
    Pin {
        /// Identifier chosen by the test.
        id: u8,
        /// Level written.
        high: bool,
    },
    /// Blocking wait.
    Delay {
        /// Duration in nanoseconds.
        ns: u64,
    },
    /// PWM started at a duty cycle.
    PwmStart {
        /// Duty cycle percent.
        duty: u8,
    },
    /// PWM frequency change.
    PwmFrequency {
        /// New frequency.
        hz: u32,
    },
    /// PWM stopped.
    PwmStop,
}

/// Append-only event log with a fixed capacity. Events past capacity are
/// dropped, but the virtual clock keeps counting.
pub struct Trace<const N: usize> {
    events: RefCell<Vec<TraceEvent, N>>,
    elapsed_ns: RefCell<u64>,
}

impl<const N: usize> Trace<N> {
    /// Empty trace.
    pub const fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            elapsed_ns: RefCell::new(0),
        }
    }

    fn record(
        &self,
        event: TraceEvent,
    ) {
        if let TraceEvent::Delay { ns } = event {
            *self.elapsed_ns.borrow_mut() += ns;
        }
        self.events.borrow_mut().push(event).ok();
    }

    /// Copy of the recorded events.
    pub fn events(&self) -> Vec<TraceEvent, N> { self.events.borrow().clone() }

    /// Total virtual time spent in delays.
    pub fn elapsed_ns(&self) -> u64 { *self.elapsed_ns.borrow() }

    /// Total virtual time spent in delays, in milliseconds.
    pub fn elapsed_ms(&self) -> u64 { self.elapsed_ns() / 1_000_000 }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        *self.elapsed_ns.borrow_mut() = 0;
    }

    /// Final level written to line `id`, if any.
    pub fn last_level(
        &self,
        id: u8,
    ) -> Option<bool> {
        self.events.borrow().iter().rev().find_map(|e| match *e {
            TraceEvent::Pin { id: pin, high } if pin == id => Some(high),
            _ => None,
        })
    }
}

impl<const N: usize> Default for Trace<N> {
    fn default() -> Self { Self::new() }
}

/// Digital output that logs every write.
pub struct RecordingPin<'a, const N: usize> {
    trace: &'a Trace<N>,
    id: u8,
}

impl<'a, const N: usize> RecordingPin<'a, N> {
    /// Pin reporting as `id`.
    pub const fn new(
        trace: &'a Trace<N>,
        id: u8,
    ) -> Self {
        Self { trace, id }
    }
}

impl<const N: usize> DigitalOutput for RecordingPin<'_, N> {
    fn set_level(
        &mut self,
        high: bool,
    ) {
        self.trace.record(TraceEvent::Pin { id: self.id, high });
    }
}

/// Delay that advances a virtual clock instead of sleeping.
#[derive(Clone, Copy)]
pub struct VirtualDelay<'a, const N: usize> {
    trace: &'a Trace<N>,
}

impl<'a, const N: usize> VirtualDelay<'a, N> {
    /// Delay recording into `trace`.
    pub const fn new(trace: &'a Trace<N>) -> Self { Self { trace } }
}

impl<const N: usize> DelayNs for VirtualDelay<'_, N> {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.trace.record(TraceEvent::Delay { ns: u64::from(ns) });
    }

    fn delay_us(
        &mut self,
        us: u32,
    ) {
        self.trace.record(TraceEvent::Delay {
            ns: u64::from(us) * 1_000,
        });
    }

    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        self.trace.record(TraceEvent::Delay {
            ns: u64::from(ms) * 1_000_000,
        });
    }
}

/// PWM channel that logs every call.
pub struct RecordingBuzzer<'a, const N: usize> {
    trace: &'a Trace<N>,
}

impl<'a, const N: usize> RecordingBuzzer<'a, N> {
    /// Buzzer recording into `trace`.
    pub const fn new(trace: &'a Trace<N>) -> Self { Self { trace } }
}

impl<const N: usize> PwmOutput for RecordingBuzzer<'_, N> {
    fn start(
        &mut self,
        duty_percent: u8,
    ) {
        self.trace.record(TraceEvent::PwmStart { duty: duty_percent });
    }

    fn set_frequency(
        &mut self,
        hz: u32,
    ) {
        self.trace.record(TraceEvent::PwmFrequency { hz });
    }

    fn stop(&mut self) { self.trace.record(TraceEvent::PwmStop); }
}

/// Maximum number of queued samples in a [`ScriptedAnalog`].
pub const SCRIPT_LEN: usize = 16;

/// Analog channel that replays a script of samples, then repeats the last one.
pub struct ScriptedAnalog {
    script: Deque<Result<f32, SensorFault>, SCRIPT_LEN>,
    last: Result<f32, SensorFault>,
}

impl ScriptedAnalog {
    /// Replay `volts` in order. Extra entries past [`SCRIPT_LEN`] are ignored.
    pub fn new(volts: &[f32]) -> Self {
        let mut channel = Self {
            script: Deque::new(),
            last: Err(SensorFault::ReadFailed),
        };
        for v in volts {
            channel.push(Ok(*v));
        }
        channel
    }

    /// Channel whose every read fails.
    pub fn failing() -> Self { Self::new(&[]) }

    /// Queue another sample (or failure).
    pub fn push(
        &mut self,
        sample: Result<f32, SensorFault>,
    ) {
        self.script.push_back(sample).ok();
    }
}

impl AnalogInput for ScriptedAnalog {
    fn read_voltage(&mut self) -> Result<f32, SensorFault> {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}
