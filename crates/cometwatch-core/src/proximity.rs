//! Proximity classification.
//!
//! Maps a distance measurement onto a small set of discrete bands that drive
//! downstream display emphasis. The classifier is a pure step function over
//! half-open intervals: exclusive upper bounds checked in ascending order,
//! first match wins.
//!
//! ```text
//! [0, 1)   VeryClose    high
//! [1, 2)   Close        medium-high
//! [2, 5)   Moderate     medium
//! [5, 10)  Distant      low-medium
//! [10, ..) VeryDistant  low
//! ```
//!
//! Missing or unparsable distances classify as [`ProximityCategory::Unknown`]
//! rather than erroring; the feed is unit-agnostic here (AU in practice).

use serde::{Deserialize, Serialize};

/// Qualitative emphasis tier attached to each category. Downstream rendering
/// derives animation strength from this, never from the raw distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntensityTier {
    High,
    MediumHigh,
    Medium,
    LowMedium,
    Low,
}

impl IntensityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityTier::High => "high",
            IntensityTier::MediumHigh => "medium-high",
            IntensityTier::Medium => "medium",
            IntensityTier::LowMedium => "low-medium",
            IntensityTier::Low => "low",
        }
    }
}

/// Distance band for the tracked object, nearest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProximityCategory {
    VeryClose,
    Close,
    Moderate,
    Distant,
    VeryDistant,
    /// Distance absent or unparsable. A display state, not an error.
    Unknown,
}

impl ProximityCategory {
    /// Human-readable band label.
    pub fn label(&self) -> &'static str {
        match self {
            ProximityCategory::VeryClose => "Very Close",
            ProximityCategory::Close => "Close",
            ProximityCategory::Moderate => "Moderate",
            ProximityCategory::Distant => "Distant",
            ProximityCategory::VeryDistant => "Very Distant",
            ProximityCategory::Unknown => "Unknown",
        }
    }

    /// Fixed category-to-intensity lookup. Intensity is a property of the
    /// band, not recomputed from the distance.
    pub fn intensity(&self) -> IntensityTier {
        match self {
            ProximityCategory::VeryClose => IntensityTier::High,
            ProximityCategory::Close => IntensityTier::MediumHigh,
            ProximityCategory::Moderate => IntensityTier::Medium,
            ProximityCategory::Distant => IntensityTier::LowMedium,
            ProximityCategory::VeryDistant | ProximityCategory::Unknown => IntensityTier::Low,
        }
    }
}

/// Exclusive upper bounds of the bounded bands, ascending.
const BAND_BOUNDS: [(f64, ProximityCategory); 4] = [
    (1.0, ProximityCategory::VeryClose),
    (2.0, ProximityCategory::Close),
    (5.0, ProximityCategory::Moderate),
    (10.0, ProximityCategory::Distant),
];

/// Classify a distance measurement.
///
/// `None`, `NaN` and infinities yield [`ProximityCategory::Unknown`].
/// Negative and zero distances land in the nearest band; non-physical values
/// from the feed are classified, not rejected.
pub fn classify(distance: Option<f64>) -> ProximityCategory {
    let Some(distance) = distance else {
        return ProximityCategory::Unknown;
    };
    if !distance.is_finite() {
        return ProximityCategory::Unknown;
    }
    for (bound, category) in BAND_BOUNDS {
        if distance < bound {
            return category;
        }
    }
    ProximityCategory::VeryDistant
}

/// Classify a raw string field from the feed (e.g. `"4.20000000"`).
pub fn classify_str(raw: Option<&str>) -> ProximityCategory {
    classify(raw.and_then(|s| s.trim().parse::<f64>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_band_interiors() {
        assert_eq!(classify(Some(0.5)), ProximityCategory::VeryClose);
        assert_eq!(classify(Some(1.5)), ProximityCategory::Close);
        assert_eq!(classify(Some(3.0)), ProximityCategory::Moderate);
        assert_eq!(classify(Some(7.0)), ProximityCategory::Distant);
        assert_eq!(classify(Some(50.0)), ProximityCategory::VeryDistant);
    }

    #[test]
    fn boundary_values_fall_in_next_band() {
        // Upper bounds are exclusive.
        assert_eq!(classify(Some(1.0)), ProximityCategory::Close);
        assert_eq!(classify(Some(2.0)), ProximityCategory::Moderate);
        assert_eq!(classify(Some(5.0)), ProximityCategory::Distant);
        assert_eq!(classify(Some(10.0)), ProximityCategory::VeryDistant);
    }

    #[test]
    fn non_physical_distances_use_nearest_band() {
        assert_eq!(classify(Some(0.0)), ProximityCategory::VeryClose);
        assert_eq!(classify(Some(-3.0)), ProximityCategory::VeryClose);
    }

    #[test]
    fn missing_or_non_finite_distance_is_unknown() {
        assert_eq!(classify(None), ProximityCategory::Unknown);
        assert_eq!(classify(Some(f64::NAN)), ProximityCategory::Unknown);
        assert_eq!(classify(Some(f64::INFINITY)), ProximityCategory::Unknown);
        assert_eq!(classify(Some(f64::NEG_INFINITY)), ProximityCategory::Unknown);
    }

    #[test]
    fn classifies_raw_feed_strings() {
        assert_eq!(classify_str(Some("4.20000000")), ProximityCategory::Moderate);
        assert_eq!(classify_str(Some(" 0.9 ")), ProximityCategory::VeryClose);
        assert_eq!(classify_str(Some("not-a-number")), ProximityCategory::Unknown);
        assert_eq!(classify_str(Some("")), ProximityCategory::Unknown);
        assert_eq!(classify_str(None), ProximityCategory::Unknown);
    }

    #[test]
    fn intensity_follows_category() {
        assert_eq!(ProximityCategory::VeryClose.intensity(), IntensityTier::High);
        assert_eq!(ProximityCategory::Close.intensity(), IntensityTier::MediumHigh);
        assert_eq!(ProximityCategory::Moderate.intensity(), IntensityTier::Medium);
        assert_eq!(ProximityCategory::Distant.intensity(), IntensityTier::LowMedium);
        assert_eq!(ProximityCategory::VeryDistant.intensity(), IntensityTier::Low);
        assert_eq!(ProximityCategory::Unknown.intensity(), IntensityTier::Low);
    }

    #[test]
    fn labels_match_display_copy() {
        assert_eq!(ProximityCategory::VeryClose.label(), "Very Close");
        assert_eq!(ProximityCategory::Unknown.label(), "Unknown");
        assert_eq!(IntensityTier::MediumHigh.as_str(), "medium-high");
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&ProximityCategory::VeryDistant).unwrap();
        assert_eq!(json, "\"very-distant\"");
        let tier: IntensityTier = serde_json::from_str("\"low-medium\"").unwrap();
        assert_eq!(tier, IntensityTier::LowMedium);
    }
}
