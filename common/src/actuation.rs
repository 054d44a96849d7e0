//! RGB indicator and buzzer alert.
//!
//! Both outputs are driven from the same [`Band`]. The alert blocks the caller
//! for the whole pattern (500 ms for Normal, 600 ms otherwise), which stretches
//! the control loop period accordingly.

use embedded_hal::delay::DelayNs;

use crate::hal::{DigitalOutput, PwmOutput};
use crate::thresholds::Band;

/// Duty cycle used for every tone.
pub const ALERT_DUTY_PERCENT: u8 = 50;

/// One step of an alert pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneStep {
    /// Sound `hz` for `ms` milliseconds, then silence the PWM.
    Tone { hz: u32, ms: u32 },
    /// Wait with the PWM stopped.
    Silence { ms: u32 },
}

impl ToneStep {
    const fn duration_ms(self) -> u32 {
        match self {
            Self::Tone { ms, .. } | Self::Silence { ms } => ms,
        }
    }
}

/// Single 440 Hz beep for a reading inside the band.
pub const NORMAL_ALERT: [ToneStep; 1] = [ToneStep::Tone { hz: 440, ms: 500 }];

/// Two 220 Hz beeps for a reading outside the band.
pub const OFF_BAND_ALERT: [ToneStep; 3] = [
    ToneStep::Tone { hz: 220, ms: 250 },
    ToneStep::Silence { ms: 100 },
    ToneStep::Tone { hz: 220, ms: 250 },
];

/// Pattern played for a band.
pub const fn alert_pattern(band: Band) -> &'static [ToneStep] {
    match band {
        Band::Normal => &NORMAL_ALERT,
        Band::Cold | Band::Hot => &OFF_BAND_ALERT,
    }
}

/// Total blocking time of a pattern.
pub const fn pattern_duration_ms(pattern: &[ToneStep]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < pattern.len() {
        total += pattern[i].duration_ms();
        i += 1;
    }
    total
}

const _: () = assert!(pattern_duration_ms(&NORMAL_ALERT) == 500);
const _: () = assert!(pattern_duration_ms(&OFF_BAND_ALERT) == 600);

// =============================================================================
// Indicator
// =============================================================================

/// Three-line RGB indicator. At most one line is ever active.
pub struct Indicator<P> {
    red: P,
    green: P,
    blue: P,
}

impl<P: DigitalOutput> Indicator<P> {
    pub const fn new(
        red: P,
        green: P,
        blue: P,
    ) -> Self {
        Self { red, green, blue }
    }

    /// Light the line for `band`: green for Normal, blue for Cold, red for Hot.
    ///
    /// Inactive lines are lowered before the active one is raised.
    pub fn apply(
        &mut self,
        band: Band,
    ) {
        let (active, inactive_a, inactive_b) = match band {
            Band::Normal => (&mut self.green, &mut self.red, &mut self.blue),
            Band::Cold => (&mut self.blue, &mut self.red, &mut self.green),
            Band::Hot => (&mut self.red, &mut self.green, &mut self.blue),
        };
        inactive_a.set_low();
        inactive_b.set_low();
        active.set_high();
    }

    /// All lines low.
    pub fn off(&mut self) {
        self.red.set_low();
        self.green.set_low();
        self.blue.set_low();
    }

    /// Give the lines back as `(red, green, blue)`.
    pub fn release(self) -> (P, P, P) { (self.red, self.green, self.blue) }
}

// =============================================================================
// Actuation Controller
// =============================================================================

/// Drives the indicator and the buzzer from a [`Band`].
pub struct ActuationController<P, B, D> {
    indicator: Indicator<P>,
    buzzer: B,
    delay: D,
}

impl<P, B, D> ActuationController<P, B, D>
where
    P: DigitalOutput,
    B: PwmOutput,
    D: DelayNs,
{
    pub const fn new(
        indicator: Indicator<P>,
        buzzer: B,
        delay: D,
    ) -> Self {
        Self {
            indicator,
            buzzer,
            delay,
        }
    }

    /// Update the indicator, then play the alert for `band`. Blocks until the
    /// pattern finishes.
    pub fn actuate(
        &mut self,
        band: Band,
    ) {
        self.indicator.apply(band);
        self.play_alert(band);
    }

    /// Play the alert pattern for `band` without touching the indicator.
    pub fn play_alert(
        &mut self,
        band: Band,
    ) {
        for step in alert_pattern(band) {
            match *step {
                ToneStep::Tone { hz, ms } => {
                    self.buzzer.start(ALERT_DUTY_PERCENT);
                    self.buzzer.set_frequency(hz);
                    self.delay.delay_ms(ms);
                    self.buzzer.stop();
                }
                ToneStep::Silence { ms } => self.delay.delay_ms(ms),
            }
        }
    }

    /// Indicator off and buzzer silent. Safe to call repeatedly.
    pub fn safe_off(&mut self) {
        self.indicator.off();
        self.buzzer.stop();
    }

    /// Give the hardware back.
    pub fn release(self) -> (Indicator<P>, B, D) { (self.indicator, self.buzzer, self.delay) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{RecordingBuzzer, RecordingPin, Trace, TraceEvent, VirtualDelay};

    const RED: u8 = 0;
    const GREEN: u8 = 1;
    const BLUE: u8 = 2;

    type TestController<'a> =
        ActuationController<RecordingPin<'a, 64>, RecordingBuzzer<'a, 64>, VirtualDelay<'a, 64>>;

    fn indicator(trace: &Trace<64>) -> Indicator<RecordingPin<'_, 64>> {
        Indicator::new(
            RecordingPin::new(trace, RED),
            RecordingPin::new(trace, GREEN),
            RecordingPin::new(trace, BLUE),
        )
    }

    fn controller(trace: &Trace<64>) -> TestController<'_> {
        ActuationController::new(indicator(trace), RecordingBuzzer::new(trace), VirtualDelay::new(trace))
    }

    /// Replay pin events and fail if two lines are ever high together.
    fn assert_never_two_high(events: &[TraceEvent]) {
        let mut levels = [false; 3];
        for event in events {
            if let TraceEvent::Pin { id, high } = *event {
                levels[id as usize] = high;
                let lit = levels.iter().filter(|l| **l).count();
                assert!(lit <= 1, "two indicator lines high at once: {levels:?}");
            }
        }
    }

    #[test]
    fn test_band_to_line_mapping() {
        let trace = Trace::<64>::new();
        let mut led = indicator(&trace);
        for (band, lit) in [(Band::Normal, GREEN), (Band::Cold, BLUE), (Band::Hot, RED)] {
            led.apply(band);
            for line in [RED, GREEN, BLUE] {
                assert_eq!(trace.last_level(line), Some(line == lit), "{band:?} line {line}");
            }
        }
    }

    #[test]
    fn test_inactive_lines_lowered_first() {
        let trace = Trace::<64>::new();
        let mut led = indicator(&trace);
        led.apply(Band::Hot);
        led.apply(Band::Cold);
        led.apply(Band::Normal);
        led.apply(Band::Hot);
        assert_never_two_high(&trace.events());
    }

    #[test]
    fn test_normal_alert_sequence() {
        let trace = Trace::<64>::new();
        controller(&trace).play_alert(Band::Normal);
        assert_eq!(
            trace.events().as_slice(),
            &[
                TraceEvent::PwmStart { duty: 50 },
                TraceEvent::PwmFrequency { hz: 440 },
                TraceEvent::Delay { ns: 500_000_000 },
                TraceEvent::PwmStop,
            ]
        );
    }

    #[test]
    fn test_off_band_alert_sequence() {
        let trace = Trace::<64>::new();
        controller(&trace).play_alert(Band::Cold);
        let events = trace.events();
        let tones: std::vec::Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::PwmFrequency { hz } => Some(*hz),
                _ => None,
            })
            .collect();
        assert_eq!(tones, [220, 220]);
        assert_eq!(events[4], TraceEvent::Delay { ns: 100_000_000 }, "gap between beeps");
    }

    #[test]
    fn test_alert_timing() {
        let trace = Trace::<64>::new();
        let mut actuation = controller(&trace);

        actuation.actuate(Band::Normal);
        assert_eq!(trace.elapsed_ms(), 500);

        trace.clear();
        actuation.actuate(Band::Hot);
        assert_eq!(trace.elapsed_ms(), 600);

        trace.clear();
        actuation.actuate(Band::Cold);
        assert_eq!(trace.elapsed_ms(), 600);
    }

    #[test]
    fn test_indicator_set_before_alert() {
        let trace = Trace::<64>::new();
        controller(&trace).actuate(Band::Normal);
        let events = trace.events();
        let first_pwm = events.iter().position(|e| matches!(e, TraceEvent::PwmStart { .. }));
        let last_pin = events.iter().rposition(|e| matches!(e, TraceEvent::Pin { .. }));
        assert!(last_pin < first_pwm);
    }

    #[test]
    fn test_safe_off_is_idempotent() {
        let trace = Trace::<64>::new();
        let mut actuation = controller(&trace);
        actuation.actuate(Band::Hot);
        actuation.safe_off();
        actuation.safe_off();
        for line in [RED, GREEN, BLUE] {
            assert_eq!(trace.last_level(line), Some(false));
        }
        assert_eq!(trace.events().last(), Some(&TraceEvent::PwmStop));
    }
}
