//! Body-temperature band used by both the indicator and the alert.
//!
//! The band is centered on 37.0C with a tolerance of 10% of the center.
//! The edges are spelled out as literals: computing `|t - 37.0| <= 3.7` in
//! floating point puts 33.3 just outside the band, while the band is closed
//! at both ends.

/// Reference human body temperature in Celsius.
pub const BODY_TEMP_C: f32 = 37.0;

/// Allowed deviation from [`BODY_TEMP_C`] (10% of the center).
pub const BAND_TOLERANCE_C: f32 = 3.7;

/// Lowest reading still classified as [`Band::Normal`].
pub const BAND_LOW_C: f32 = 33.3;

/// Highest reading still classified as [`Band::Normal`].
pub const BAND_HIGH_C: f32 = 40.7;

// Compile-time validation: edges sit on center -/+ tolerance
const _: () = assert!(BAND_LOW_C < BODY_TEMP_C);
const _: () = assert!(BODY_TEMP_C < BAND_HIGH_C);
const _: () = assert!((BODY_TEMP_C - BAND_TOLERANCE_C - BAND_LOW_C) < 0.001);
const _: () = assert!((BAND_LOW_C - (BODY_TEMP_C - BAND_TOLERANCE_C)) < 0.001);
const _: () = assert!((BODY_TEMP_C + BAND_TOLERANCE_C - BAND_HIGH_C) < 0.001);
const _: () = assert!((BAND_HIGH_C - (BODY_TEMP_C + BAND_TOLERANCE_C)) < 0.001);

/// Classification of a reading against the body-temperature band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// Below [`BAND_LOW_C`].
    Cold,
    /// Within `[BAND_LOW_C, BAND_HIGH_C]`.
    Normal,
    /// Above [`BAND_HIGH_C`].
    Hot,
}

impl Band {
    /// Short label for logs and status panels.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cold => "COLD",
            Self::Normal => "NORMAL",
            Self::Hot => "HOT",
        }
    }
}

/// Classify a Celsius reading.
///
/// Both edges are inclusive. NaN compares false everywhere and lands in `Hot`,
/// which keeps the alert audible for a broken conversion.
#[inline]
pub fn classify(celsius: f32) -> Band {
    if (BAND_LOW_C..=BAND_HIGH_C).contains(&celsius) {
        Band::Normal
    } else if celsius < BODY_TEMP_C {
        Band::Cold
    } else {
        Band::Hot
    }
}

#[cfg(test)]
#[allow(clippy::assertions_on_constants)] // Intentional compile-time validation of threshold ordering
mod tests {
    use super::*;

    #[test]
    fn test_band_ordering() {
        assert!(BAND_LOW_C < BODY_TEMP_C);
        assert!(BODY_TEMP_C < BAND_HIGH_C);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        assert_eq!(classify(33.3), Band::Normal, "lower edge belongs to the band");
        assert_eq!(classify(40.7), Band::Normal, "upper edge belongs to the band");
    }

    #[test]
    fn test_just_outside_band() {
        assert_eq!(classify(33.29999), Band::Cold);
        assert_eq!(classify(40.70001), Band::Hot);
    }

    #[test]
    fn test_classify_far_values() {
        assert_eq!(classify(-40.0), Band::Cold);
        assert_eq!(classify(0.0), Band::Cold);
        assert_eq!(classify(37.0), Band::Normal);
        assert_eq!(classify(120.0), Band::Hot);
    }

    #[test]
    fn test_nan_is_hot() {
        assert_eq!(classify(f32::NAN), Band::Hot);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Band::Cold.label(), "COLD");
        assert_eq!(Band::Normal.label(), "NORMAL");
        assert_eq!(Band::Hot.label(), "HOT");
    }
}
