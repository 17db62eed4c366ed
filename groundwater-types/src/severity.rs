//! Severity classification of monitoring points.

/// Water level (meters) below which a point is critical.
pub const CRITICAL_WATER_LEVEL: f64 = 20.0;
/// Quality index below which a point is critical.
pub const CRITICAL_QUALITY_INDEX: f64 = 30.0;
/// Water level (meters) below which a point is at least moderate.
pub const MODERATE_WATER_LEVEL: f64 = 50.0;
/// Quality index below which a point is at least moderate.
pub const MODERATE_QUALITY_INDEX: f64 = 60.0;

/// Derived health classification of a monitoring point.
///
/// Ordered from least to most severe, so `max()` over a set of points yields
/// the worst status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Normal,
    Moderate,
    Critical,
}

impl Severity {
    /// All severities, most severe first (display order).
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Moderate, Severity::Normal];

    /// Classify a water level and quality index.
    ///
    /// Rules are evaluated in order with strict `<` comparisons:
    /// critical if `water_level < 20 || quality_index < 30`, else moderate if
    /// `water_level < 50 || quality_index < 60`, else normal. A water level of
    /// exactly 20 therefore falls through to the moderate check.
    pub fn classify(water_level: f64, quality_index: f64) -> Self {
        if water_level < CRITICAL_WATER_LEVEL || quality_index < CRITICAL_QUALITY_INDEX {
            Severity::Critical
        } else if water_level < MODERATE_WATER_LEVEL || quality_index < MODERATE_QUALITY_INDEX {
            Severity::Moderate
        } else {
            Severity::Normal
        }
    }

    /// Lowercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Moderate => "Moderate",
            Severity::Critical => "Critical",
        }
    }

    /// Marker color as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Severity::Critical => (0xef, 0x44, 0x44),
            Severity::Moderate => (0xf9, 0x73, 0x16),
            Severity::Normal => (0x22, 0xc5, 0x5e),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_water_level_twenty_is_not_critical() {
        assert_eq!(Severity::classify(20.0, 50.0), Severity::Moderate);
    }

    #[test]
    fn test_low_water_level_is_critical_regardless_of_quality() {
        for quality in [0.0, 29.9, 30.0, 59.9, 60.0, 100.0] {
            assert_eq!(Severity::classify(19.9, quality), Severity::Critical);
        }
    }

    #[test]
    fn test_full_marks_are_normal() {
        assert_eq!(Severity::classify(100.0, 100.0), Severity::Normal);
    }

    #[test]
    fn test_quality_thresholds() {
        assert_eq!(Severity::classify(80.0, 29.9), Severity::Critical);
        assert_eq!(Severity::classify(80.0, 30.0), Severity::Moderate);
        assert_eq!(Severity::classify(80.0, 59.9), Severity::Moderate);
        assert_eq!(Severity::classify(80.0, 60.0), Severity::Normal);
    }

    #[test]
    fn test_water_level_thresholds() {
        assert_eq!(Severity::classify(49.9, 90.0), Severity::Moderate);
        assert_eq!(Severity::classify(50.0, 90.0), Severity::Normal);
    }

    #[test]
    fn test_classification_is_total_and_deterministic() {
        for wl in (0..=1000).map(|i| i as f64 / 10.0) {
            for qi in (0..=100).step_by(5).map(|i| i as f64) {
                assert_eq!(Severity::classify(wl, qi), Severity::classify(wl, qi));
            }
        }
        // Non-finite inputs still classify
        assert_eq!(Severity::classify(f64::NAN, f64::NAN), Severity::Normal);
        assert_eq!(Severity::classify(f64::NEG_INFINITY, 100.0), Severity::Critical);
    }

    #[test]
    fn test_ordering_puts_critical_last() {
        let worst = [Severity::Normal, Severity::Critical, Severity::Moderate]
            .into_iter()
            .max()
            .unwrap();
        assert_eq!(worst, Severity::Critical);
    }
}
