//! NTC thermistor conversion.
//!
//! The thermistor sits between the supply rail and the ADC node, with a fixed
//! 10k resistor as the low-side leg to ground. A warmer thermistor has less
//! resistance and pulls the node higher. The measured voltage gives the
//! thermistor resistance, and the Beta equation gives the temperature:
//!
//! ```text
//! R     = R_fixed * (V_supply - V) / V
//! 1 / T = 1 / T0 + ln(R / R0) / B
//! ```
//!
//! Math is done in `f64` and narrowed to `f32` Celsius at the end.

use crate::error::SensorFault;
use crate::hal::AnalogInput;

/// Offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Divider and thermistor constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermistorParams {
    /// Beta coefficient (K).
    pub beta: f64,
    /// Thermistor resistance at `t0_kelvin` (ohms).
    pub r0_ohms: f64,
    /// Reference temperature (K).
    pub t0_kelvin: f64,
    /// Fixed divider resistor (ohms).
    pub r_fixed_ohms: f64,
    /// Divider supply voltage (V).
    pub supply_volts: f64,
}

impl ThermistorParams {
    /// 10k NTC, B = 3950, 10k low-side resistor on 3.3V.
    pub const DEFAULT: Self = Self {
        beta: 3950.0,
        r0_ohms: 10_000.0,
        t0_kelvin: 298.15,
        r_fixed_ohms: 10_000.0,
        supply_volts: 3.3,
    };

    /// Thermistor resistance for a divider voltage.
    ///
    /// Voltages outside the open interval `(0, supply)` have no physical
    /// resistance and are reported as [`SensorFault::VoltageOutOfRange`].
    pub fn resistance(
        &self,
        volts: f64,
    ) -> Result<f64, SensorFault> {
        if !(volts > 0.0 && volts < self.supply_volts) {
            return Err(SensorFault::out_of_range(volts as f32));
        }
        Ok(self.r_fixed_ohms * ((self.supply_volts - volts) / volts))
    }

    /// Temperature in Celsius for a thermistor resistance.
    pub fn resistance_to_celsius(
        &self,
        ohms: f64,
    ) -> f64 {
        let inv_t = 1.0 / self.t0_kelvin + libm::log(ohms / self.r0_ohms) / self.beta;
        1.0 / inv_t - KELVIN_OFFSET
    }

    /// Temperature in Celsius for a divider voltage.
    pub fn voltage_to_celsius(
        &self,
        volts: f64,
    ) -> Result<f32, SensorFault> {
        let ohms = self.resistance(volts)?;
        Ok(self.resistance_to_celsius(ohms) as f32)
    }

    /// Divider voltage produced at a given temperature (inverse of
    /// [`Self::voltage_to_celsius`]). Used to drive simulated channels.
    pub fn celsius_to_voltage(
        &self,
        celsius: f64,
    ) -> f64 {
        let kelvin = celsius + KELVIN_OFFSET;
        let ohms = self.r0_ohms * libm::exp(self.beta * (1.0 / kelvin - 1.0 / self.t0_kelvin));
        self.supply_volts * self.r_fixed_ohms / (ohms + self.r_fixed_ohms)
    }
}

impl Default for ThermistorParams {
    fn default() -> Self { Self::DEFAULT }
}

/// Thermistor read through an analog channel.
pub struct TemperatureSensor<A> {
    channel: A,
    params: ThermistorParams,
}

impl<A: AnalogInput> TemperatureSensor<A> {
    /// Sensor with the default divider constants.
    pub const fn new(channel: A) -> Self {
        Self {
            channel,
            params: ThermistorParams::DEFAULT,
        }
    }

    /// Sensor with custom constants.
    pub const fn with_params(
        channel: A,
        params: ThermistorParams,
    ) -> Self {
        Self { channel, params }
    }

    /// Sample the channel and convert to Celsius. No retries.
    pub fn read(&mut self) -> Result<f32, SensorFault> {
        let volts = self.channel.read_voltage()?;
        // Range check in channel precision: 3.3f32 widens to just below 3.3f64
        if !(volts > 0.0 && volts < self.params.supply_volts as f32) {
            return Err(SensorFault::out_of_range(volts));
        }
        self.params.voltage_to_celsius(f64::from(volts))
    }

    /// Conversion constants in use.
    pub const fn params(&self) -> &ThermistorParams { &self.params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::ScriptedAnalog;

    const PARAMS: ThermistorParams = ThermistorParams::DEFAULT;

    #[test]
    fn test_reference_point_is_25c() {
        // Half the supply means R == R_fixed == R0
        let volts = PARAMS.supply_volts / 2.0;
        assert_eq!(PARAMS.resistance(volts), Ok(10_000.0));
        let celsius = PARAMS.voltage_to_celsius(volts).unwrap();
        assert!((celsius - 25.0).abs() < 1e-4, "got {celsius}");
    }

    #[test]
    fn test_higher_voltage_is_hotter() {
        // NTC on the high side: less resistance, more voltage, higher temperature
        let cool = PARAMS.voltage_to_celsius(1.0).unwrap();
        let hot = PARAMS.voltage_to_celsius(2.5).unwrap();
        assert!(hot > cool);
    }

    #[test]
    fn test_zero_voltage_is_fault() {
        assert_eq!(
            PARAMS.voltage_to_celsius(0.0),
            Err(SensorFault::VoltageOutOfRange { millivolts: 0 })
        );
    }

    #[test]
    fn test_supply_rail_is_fault() {
        assert!(PARAMS.voltage_to_celsius(3.3).is_err());
        assert!(PARAMS.voltage_to_celsius(5.0).is_err());
        assert!(PARAMS.voltage_to_celsius(-0.1).is_err());
    }

    #[test]
    fn test_nan_is_fault() {
        assert!(PARAMS.voltage_to_celsius(f64::NAN).is_err());
    }

    #[test]
    fn test_inverse_mapping() {
        for celsius in [-10.0, 0.0, 25.0, 33.3, 37.0, 40.7, 60.0] {
            let volts = PARAMS.celsius_to_voltage(celsius);
            let back = f64::from(PARAMS.voltage_to_celsius(volts).unwrap());
            assert!((back - celsius).abs() < 1e-3, "{celsius} -> {volts} V -> {back}");
        }
    }

    #[test]
    fn test_sensor_reads_channel() {
        let mut sensor = TemperatureSensor::new(ScriptedAnalog::new(&[1.65]));
        let celsius = sensor.read().unwrap();
        assert!((celsius - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_sensor_rail_reading_is_fault() {
        let mut sensor = TemperatureSensor::new(ScriptedAnalog::new(&[3.3, 0.0]));
        assert_eq!(sensor.read(), Err(SensorFault::VoltageOutOfRange { millivolts: 3300 }));
        assert_eq!(sensor.read(), Err(SensorFault::VoltageOutOfRange { millivolts: 0 }));
    }

    #[test]
    fn test_sensor_with_custom_supply() {
        let params = ThermistorParams {
            supply_volts: 5.0,
            ..ThermistorParams::DEFAULT
        };
        let mut sensor = TemperatureSensor::with_params(ScriptedAnalog::new(&[2.5, 3.3]), params);
        assert_eq!(sensor.params().supply_volts, 5.0);
        let celsius = sensor.read().unwrap();
        assert!((celsius - 25.0).abs() < 1e-3, "midpoint of a 5V divider is R0");
        assert!(sensor.read().is_ok(), "3.3V is in range on a 5V rail");
    }

    #[test]
    fn test_sensor_propagates_channel_fault() {
        let mut sensor = TemperatureSensor::new(ScriptedAnalog::failing());
        assert_eq!(sensor.read(), Err(SensorFault::ReadFailed));
    }
}
