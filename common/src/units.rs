//! Display unit selection.
//!
//! Readings are always stored in Celsius; the unit only affects presentation.

/// Unit used by the character display and the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    /// Degrees Celsius (startup default).
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// The other unit.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Single-character symbol shown after values ("C" / "F").
    pub const fn symbol(self) -> char {
        match self {
            Self::Celsius => 'C',
            Self::Fahrenheit => 'F',
        }
    }

    /// Axis label for the plot.
    pub const fn axis_label(self) -> &'static str {
        match self {
            Self::Celsius => "Temperature (C)",
            Self::Fahrenheit => "Temperature (F)",
        }
    }

    /// Convert a stored Celsius value into this unit.
    #[inline]
    pub fn from_celsius(
        self,
        celsius: f32,
    ) -> f32 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }
}

/// `c * 9 / 5 + 32`
#[inline]
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 { celsius * 9.0 / 5.0 + 32.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_celsius() {
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_toggle_round_trip() {
        let unit = TemperatureUnit::Celsius;
        assert_eq!(unit.toggle(), TemperatureUnit::Fahrenheit);
        assert_eq!(unit.toggle().toggle(), unit);
    }

    #[test]
    fn test_known_conversions() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-6);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < 1e-4);
        assert!((celsius_to_fahrenheit(37.0) - 98.6).abs() < 1e-4);
        assert!((celsius_to_fahrenheit(-40.0) + 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_celsius_passthrough() {
        assert_eq!(TemperatureUnit::Celsius.from_celsius(23.456), 23.456);
    }

    #[test]
    fn test_symbols_and_labels() {
        assert_eq!(TemperatureUnit::Celsius.symbol(), 'C');
        assert_eq!(TemperatureUnit::Fahrenheit.symbol(), 'F');
        assert_eq!(TemperatureUnit::Fahrenheit.axis_label(), "Temperature (F)");
    }
}
