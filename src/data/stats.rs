//! Severity counts over a set of points.

use groundwater_types::{MonitoringPoint, Severity};

/// Number of points per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub moderate: usize,
    pub normal: usize,
}

impl SeverityCounts {
    /// Tally the severities of `points`.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a MonitoringPoint>,
    {
        let mut counts = Self::default();
        for point in points {
            match point.severity() {
                Severity::Critical => counts.critical += 1,
                Severity::Moderate => counts.moderate += 1,
                Severity::Normal => counts.normal += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Moderate => self.moderate,
            Severity::Normal => self.normal,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.moderate + self.normal
    }

    /// The most severe status present, if any points were counted.
    pub fn worst(&self) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| self.get(*s) > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, wl: f64, qi: f64) -> MonitoringPoint {
        MonitoringPoint::builder(id).water_level(wl).quality_index(qi).build()
    }

    #[test]
    fn test_counts() {
        let points = vec![
            point("a", 10.0, 90.0),
            point("b", 30.0, 90.0),
            point("c", 70.0, 50.0),
            point("d", 70.0, 70.0),
        ];
        let counts = SeverityCounts::from_points(&points);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.moderate, 2);
        assert_eq!(counts.normal, 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.worst(), Some(Severity::Critical));
    }

    #[test]
    fn test_empty() {
        let counts = SeverityCounts::from_points(std::iter::empty());
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.worst(), None);
    }
}
