//! Hardware capabilities consumed by the control loop.
//!
//! Three small traits model the outside world:
//!
//! | Trait | Used by | Hardware-backed | Fake |
//! |-------|---------|-----------------|------|
//! | [`AnalogInput`] | thermistor | [`Mcp3008`] over any `SpiDevice` | [`crate::fake::ScriptedAnalog`] |
//! | [`DigitalOutput`] | LCD bus, RGB indicator | [`HalOutput`] over any `OutputPin` | [`crate::fake::RecordingPin`] |
//! | [`PwmOutput`] | buzzer | `PwmBuzzer` (firmware), `SimBuzzer` (desktop) | [`crate::fake::RecordingBuzzer`] |
//!
//! Blocking waits go through `embedded_hal::delay::DelayNs`.
//!
//! Pin direction is fixed when a pin is acquired (type-state in `embedded-hal`),
//! so there is no separate "configure" call here; acquisition failures surface
//! as [`crate::HardwareFault`] in the platform setup code.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::error::SensorFault;

/// Single analog channel returning volts.
pub trait AnalogInput {
    /// Sample the channel.
    fn read_voltage(&mut self) -> Result<f32, SensorFault>;
}

/// Single digital output line.
///
/// Writes cannot fail once the line has been acquired.
pub trait DigitalOutput {
    /// Drive the line. `true` means logically active.
    fn set_level(
        &mut self,
        high: bool,
    );

    /// Drive the line active.
    #[inline]
    fn set_high(&mut self) { self.set_level(true); }

    /// Drive the line inactive.
    #[inline]
    fn set_low(&mut self) { self.set_level(false); }
}

/// Tone generator on a PWM channel.
pub trait PwmOutput {
    /// Start output at the given duty cycle (0-100).
    fn start(
        &mut self,
        duty_percent: u8,
    );

    /// Change the output frequency. Applies immediately if running.
    fn set_frequency(
        &mut self,
        hz: u32,
    );

    /// Silence the output.
    fn stop(&mut self);
}

// =============================================================================
// embedded-hal Output Adapter
// =============================================================================

/// Electrical polarity of an output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Logical high drives the pin high.
    ActiveHigh,
    /// Logical high drives the pin low (e.g. common-anode LEDs on the PIM715).
    ActiveLow,
}

/// [`DigitalOutput`] backed by an `embedded_hal::digital::OutputPin`.
pub struct HalOutput<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: OutputPin> HalOutput<P> {
    /// Wrap a pin whose electrical level matches the logical level.
    pub const fn active_high(pin: P) -> Self {
        Self {
            pin,
            polarity: Polarity::ActiveHigh,
        }
    }

    /// Wrap a pin that is active when driven low.
    pub const fn active_low(pin: P) -> Self {
        Self {
            pin,
            polarity: Polarity::ActiveLow,
        }
    }

    /// Give the pin back.
    pub fn release(self) -> P { self.pin }
}

impl<P: OutputPin> DigitalOutput for HalOutput<P> {
    fn set_level(
        &mut self,
        high: bool,
    ) {
        let electrical = match self.polarity {
            Polarity::ActiveHigh => high,
            Polarity::ActiveLow => !high,
        };
        // Pin writes are infallible on every supported HAL
        if electrical {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }
}

// =============================================================================
// MCP3008 ADC
// =============================================================================

/// Reference voltage of the MCP3008 (tied to the 3.3V rail).
pub const MCP3008_VREF: f32 = 3.3;

/// MCP3008 8-channel, 10-bit ADC on an SPI bus.
///
/// Readings are scaled the way the CircuitPython driver does it: the 10-bit
/// result is shifted to 16 bits and divided by 65535, so full scale reads a
/// little under the reference voltage.
pub struct Mcp3008<SPI> {
    spi: SPI,
    channel: u8,
    vref: f32,
}

impl<SPI: SpiDevice> Mcp3008<SPI> {
    /// Create a single-ended reader on `channel` (0-7).
    ///
    /// Returns `None` for a channel number the chip does not have.
    pub fn new(
        spi: SPI,
        channel: u8,
    ) -> Option<Self> {
        if channel > 7 {
            return None;
        }
        Some(Self {
            spi,
            channel,
            vref: MCP3008_VREF,
        })
    }

    /// Read the raw 10-bit conversion result.
    pub fn read_raw(&mut self) -> Result<u16, SensorFault> {
        // Start bit, single-ended mode + channel, padding
        let mut frame = [0x01, (0x08 | self.channel) << 4, 0x00];
        self.spi
            .transfer_in_place(&mut frame)
            .map_err(|_| SensorFault::ReadFailed)?;
        Ok((u16::from(frame[1] & 0x03) << 8) | u16::from(frame[2]))
    }
}

/// Scale a 10-bit MCP3008 result to volts.
#[inline]
pub fn mcp3008_raw_to_volts(
    raw: u16,
    vref: f32,
) -> f32 {
    f32::from(raw << 6) * vref / 65535.0
}

impl<SPI: SpiDevice> AnalogInput for Mcp3008<SPI> {
    fn read_voltage(&mut self) -> Result<f32, SensorFault> {
        let raw = self.read_raw()?;
        Ok(mcp3008_raw_to_volts(raw, self.vref))
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::spi::{ErrorKind, ErrorType as SpiErrorType, Operation};

    use super::*;

    /// Pin that remembers its electrical level.
    struct LevelPin(bool);

    impl PinErrorType for LevelPin {
        type Error = Infallible;
    }

    impl OutputPin for LevelPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0 = true;
            Ok(())
        }
    }

    /// SPI device that answers every transfer with a fixed 10-bit value.
    struct CannedSpi {
        raw: u16,
        last_request: [u8; 3],
        fail: bool,
    }

    impl SpiErrorType for CannedSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for CannedSpi {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::TransferInPlace(buf) = op {
                    self.last_request.copy_from_slice(buf);
                    buf[0] = 0;
                    buf[1] = (self.raw >> 8) as u8 & 0x03;
                    buf[2] = self.raw as u8;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_active_high_passthrough() {
        let mut out = HalOutput::active_high(LevelPin(false));
        out.set_high();
        assert!(out.pin.0);
        out.set_low();
        assert!(!out.pin.0);
    }

    #[test]
    fn test_active_low_inverts() {
        let mut out = HalOutput::active_low(LevelPin(false));
        out.set_level(true);
        assert!(!out.release().0, "active-low pin must be driven low when on");
    }

    #[test]
    fn test_mcp3008_request_frame() {
        let spi = CannedSpi {
            raw: 512,
            last_request: [0; 3],
            fail: false,
        };
        let mut adc = Mcp3008::new(spi, 3).unwrap();
        assert_eq!(adc.read_raw(), Ok(512));
        assert_eq!(adc.spi.last_request, [0x01, 0xB0, 0x00]);
    }

    #[test]
    fn test_mcp3008_scaling() {
        assert_eq!(mcp3008_raw_to_volts(0, MCP3008_VREF), 0.0);
        let full = mcp3008_raw_to_volts(1023, MCP3008_VREF);
        assert!(full < MCP3008_VREF, "full scale stays below the rail");
        assert!((full - 3.2968).abs() < 0.001);
    }

    #[test]
    fn test_mcp3008_rejects_bad_channel() {
        let spi = CannedSpi {
            raw: 0,
            last_request: [0; 3],
            fail: false,
        };
        assert!(Mcp3008::new(spi, 8).is_none());
    }

    #[test]
    fn test_mcp3008_bus_error_is_read_failed() {
        let spi = CannedSpi {
            raw: 0,
            last_request: [0; 3],
            fail: true,
        };
        let mut adc = Mcp3008::new(spi, 0).unwrap();
        assert_eq!(adc.read_voltage(), Err(SensorFault::ReadFailed));
    }
}
