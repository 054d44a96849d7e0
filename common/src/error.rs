//! Fault types.
//!
//! Only two kinds exist. A [`SensorFault`] skips one control cycle; a
//! [`HardwareFault`] aborts startup before the loop is entered. Display and
//! actuator writes are treated as infallible once the pins are acquired.

use core::fmt;

/// Invalid or unreadable sensor sample. Recovered by skipping the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorFault {
    /// Voltage at or below 0 V, or at or above the supply rail.
    VoltageOutOfRange {
        /// Offending voltage, rounded to millivolts.
        millivolts: i32,
    },
    /// The analog channel did not return a sample.
    ReadFailed,
}

impl SensorFault {
    /// Build an out-of-range fault from a voltage.
    pub fn out_of_range(volts: f32) -> Self {
        let millivolts = if volts.is_finite() { libm::roundf(volts * 1000.0) as i32 } else { i32::MIN };
        Self::VoltageOutOfRange { millivolts }
    }
}

impl fmt::Display for SensorFault {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::VoltageOutOfRange { millivolts } => write!(f, "voltage out of range: {millivolts} mV"),
            Self::ReadFailed => f.write_str("analog read failed"),
        }
    }
}

impl core::error::Error for SensorFault {}

/// Pin or channel unavailable at startup. Fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareFault {
    /// The pin does not exist or is already claimed.
    PinUnavailable {
        /// GPIO number.
        pin: u8,
    },
    /// The analog channel could not be opened.
    ChannelUnavailable,
    /// The plot panel did not initialize.
    DisplayUnavailable,
}

impl fmt::Display for HardwareFault {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::PinUnavailable { pin } => write!(f, "GPIO{pin} unavailable"),
            Self::ChannelUnavailable => f.write_str("analog channel unavailable"),
            Self::DisplayUnavailable => f.write_str("display unavailable"),
        }
    }
}

impl core::error::Error for HardwareFault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_rounds_to_millivolts() {
        assert_eq!(SensorFault::out_of_range(3.3), SensorFault::VoltageOutOfRange { millivolts: 3300 });
        assert_eq!(SensorFault::out_of_range(0.0), SensorFault::VoltageOutOfRange { millivolts: 0 });
    }

    #[test]
    fn test_out_of_range_non_finite() {
        assert_eq!(
            SensorFault::out_of_range(f32::NAN),
            SensorFault::VoltageOutOfRange { millivolts: i32::MIN }
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(SensorFault::ReadFailed.to_string(), "analog read failed");
        assert_eq!(
            SensorFault::VoltageOutOfRange { millivolts: 0 }.to_string(),
            "voltage out of range: 0 mV"
        );
        assert_eq!(HardwareFault::PinUnavailable { pin: 21 }.to_string(), "GPIO21 unavailable");
    }
}
