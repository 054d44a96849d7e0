//! The sampling / actuation state machine.
//!
//! ```text
//!            ┌──────────────────── fault ─────────────────────┐
//!            │                                                ▼
//! Init ─▶ Sampling ─▶ Displaying ─▶ Actuating ─▶ Logging ─▶ Idle ─┐
//!            ▲                                                    │
//!            └────────────────────────────────────────────────────┘
//!
//! any transition or idle slice with a stop request ─▶ Stopped (safe-off)
//! ```
//!
//! One cycle lasts `SAMPLE_INTERVAL_MS` plus the display write plus the alert
//! pattern, so the effective rate is a little under 1 Hz. That drift is
//! expected and not compensated.

use embedded_hal::delay::DelayNs;

use crate::actuation::ActuationController;
use crate::config::{IDLE_SLICE_MS, SAMPLE_INTERVAL_MS};
use crate::error::SensorFault;
use crate::hal::{AnalogInput, DigitalOutput, PwmOutput};
use crate::lcd::Hd44780;
use crate::state::MonitorState;
use crate::thermistor::TemperatureSensor;
use crate::thresholds::{Band, classify};

/// Where the loop currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleState {
    /// Hardware not yet initialized.
    Init,
    Sampling,
    Displaying,
    Actuating,
    Logging,
    Idle,
    /// Outputs released. Terminal.
    Stopped,
}

/// Result of one [`ControlLoop::run_cycle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleOutcome {
    /// A reading went through display, actuation and history.
    Sampled { celsius: f32, band: Band },
    /// The sensor failed; outputs and history were left untouched.
    Faulted(SensorFault),
    /// A stop request was observed. The outputs are safe-off.
    Stopped,
}

/// Notifications from [`ControlLoop::run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleEvent {
    /// Hardware initialized, entering the first cycle.
    Started,
    Sampled { celsius: f32, band: Band },
    SensorFault(SensorFault),
    /// Loop exited after `readings` good cycles.
    Stopped { readings: u32 },
}

/// Marker for "stop observed"; unwinds the cycle through `?`.
struct Halt;

/// Owns the sensor, the character display and the actuators.
///
/// Every component gets its own copy of the delay; `D` is expected to be a
/// cheap handle (`Copy` on every supported platform).
pub struct ControlLoop<'s, A, P, B, D>
where
    A: AnalogInput,
    P: DigitalOutput,
    B: PwmOutput,
    D: DelayNs,
{
    sensor: TemperatureSensor<A>,
    lcd: Hd44780<P, D>,
    actuation: ActuationController<P, B, D>,
    delay: D,
    state: &'s MonitorState,
    cycle_state: CycleState,
    released: bool,
}

impl<'s, A, P, B, D> ControlLoop<'s, A, P, B, D>
where
    A: AnalogInput,
    P: DigitalOutput,
    B: PwmOutput,
    D: DelayNs,
{
    pub const fn new(
        sensor: TemperatureSensor<A>,
        lcd: Hd44780<P, D>,
        actuation: ActuationController<P, B, D>,
        delay: D,
        state: &'s MonitorState,
    ) -> Self {
        Self {
            sensor,
            lcd,
            actuation,
            delay,
            state,
            cycle_state: CycleState::Init,
            released: false,
        }
    }

    pub const fn cycle_state(&self) -> CycleState { self.cycle_state }

    /// Run the display init sequence and turn the indicator off. Does nothing
    /// after the first call.
    pub fn initialize(&mut self) {
        if self.cycle_state != CycleState::Init {
            return;
        }
        self.lcd.init();
        self.actuation.safe_off();
        self.state.log("Monitor started");
        self.cycle_state = CycleState::Sampling;
    }

    /// Run one full cycle, including the idle wait.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        if self.cycle_state == CycleState::Stopped {
            return CycleOutcome::Stopped;
        }
        self.initialize();
        match self.cycle() {
            Ok(outcome) => outcome,
            Err(Halt) => {
                self.shutdown();
                CycleOutcome::Stopped
            }
        }
    }

    /// Cycle until a stop request is observed, reporting progress through
    /// `on_event`. Outputs are safe-off on return.
    pub fn run(
        &mut self,
        mut on_event: impl FnMut(CycleEvent),
    ) {
        if self.cycle_state == CycleState::Init {
            self.initialize();
            on_event(CycleEvent::Started);
        }
        loop {
            match self.run_cycle() {
                CycleOutcome::Sampled { celsius, band } => on_event(CycleEvent::Sampled { celsius, band }),
                CycleOutcome::Faulted(fault) => on_event(CycleEvent::SensorFault(fault)),
                CycleOutcome::Stopped => {
                    on_event(CycleEvent::Stopped {
                        readings: self.state.stats().readings,
                    });
                    return;
                }
            }
        }
    }

    fn cycle(&mut self) -> Result<CycleOutcome, Halt> {
        self.enter(CycleState::Sampling)?;
        let celsius = match self.sensor.read() {
            Ok(celsius) => celsius,
            Err(fault) => {
                self.state.record_fault(fault);
                self.enter(CycleState::Idle)?;
                self.idle()?;
                return Ok(CycleOutcome::Faulted(fault));
            }
        };

        self.enter(CycleState::Displaying)?;
        self.lcd.show_temperature(celsius, self.state.unit());

        self.enter(CycleState::Actuating)?;
        let band = classify(celsius);
        self.actuation.actuate(band);

        self.enter(CycleState::Logging)?;
        self.state.append_reading(celsius, band);

        self.enter(CycleState::Idle)?;
        self.idle()?;

        Ok(CycleOutcome::Sampled { celsius, band })
    }

    fn enter(
        &mut self,
        next: CycleState,
    ) -> Result<(), Halt> {
        if self.state.stop_requested() {
            return Err(Halt);
        }
        self.cycle_state = next;
        Ok(())
    }

    fn idle(&mut self) -> Result<(), Halt> {
        for _ in 0..SAMPLE_INTERVAL_MS / IDLE_SLICE_MS {
            if self.state.stop_requested() {
                return Err(Halt);
            }
            self.delay.delay_ms(IDLE_SLICE_MS);
        }
        Ok(())
    }

    /// Drive the outputs to safe-off and enter [`CycleState::Stopped`].
    /// Runs at most once; also runs on drop.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.actuation.safe_off();
        self.cycle_state = CycleState::Stopped;
        self.state.log("Monitor stopped");
    }
}

impl<A, P, B, D> Drop for ControlLoop<'_, A, P, B, D>
where
    A: AnalogInput,
    P: DigitalOutput,
    B: PwmOutput,
    D: DelayNs,
{
    fn drop(&mut self) { self.shutdown(); }
}
