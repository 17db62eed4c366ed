//! Water-level range filtering and text search.

use groundwater_types::MonitoringPoint;

/// Lowest selectable water level, in meters.
pub const LEVEL_FLOOR: f64 = 0.0;
/// Highest selectable water level, in meters.
pub const LEVEL_CEILING: f64 = 100.0;

/// An inclusive water-level range, `min <= level <= max`.
///
/// Both ends stay within `[LEVEL_FLOOR, LEVEL_CEILING]` and `min <= max`
/// holds after every adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterLevelRange {
    min: f64,
    max: f64,
}

impl Default for WaterLevelRange {
    fn default() -> Self {
        Self::full()
    }
}

impl WaterLevelRange {
    /// The full range, which admits every point.
    pub const fn full() -> Self {
        Self {
            min: LEVEL_FLOOR,
            max: LEVEL_CEILING,
        }
    }

    /// Create a range, clamping both ends and swapping them if reversed.
    pub fn new(min: f64, max: f64) -> Self {
        let min = min.clamp(LEVEL_FLOOR, LEVEL_CEILING);
        let max = max.clamp(LEVEL_FLOOR, LEVEL_CEILING);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        *self == Self::full()
    }

    /// Returns true if `level` lies within the range, ends included.
    ///
    /// The full range is unfiltered and admits levels outside the scale.
    pub fn contains(&self, level: f64) -> bool {
        self.is_full() || (self.min <= level && level <= self.max)
    }

    /// Move the lower bound by `delta`, never past the upper bound.
    pub fn shift_min(&mut self, delta: f64) {
        self.min = (self.min + delta).clamp(LEVEL_FLOOR, self.max);
    }

    /// Move the upper bound by `delta`, never below the lower bound.
    pub fn shift_max(&mut self, delta: f64) {
        self.max = (self.max + delta).clamp(self.min, LEVEL_CEILING);
    }
}

impl std::fmt::Display for WaterLevelRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m - {}m", self.min, self.max)
    }
}

/// Keep the points whose water level lies within `range`, preserving order.
///
/// Accepts any iterator of point references, so an already filtered set can
/// be filtered again.
pub fn filter_points<'a, I>(points: I, range: &WaterLevelRange) -> Vec<&'a MonitoringPoint>
where
    I: IntoIterator<Item = &'a MonitoringPoint>,
{
    points.into_iter().filter(|p| range.contains(p.water_level)).collect()
}

/// Case-insensitive match of `text` against a point's id and location.
///
/// An empty search matches everything.
pub fn matches_search(point: &MonitoringPoint, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    point.id.to_lowercase().contains(&needle) || point.location.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<MonitoringPoint> {
        [0.0, 12.5, 20.0, 49.9, 50.0, 87.3, 100.0]
            .iter()
            .enumerate()
            .map(|(i, &wl)| {
                MonitoringPoint::builder(format!("gw-{:04}", i))
                    .water_level(wl)
                    .quality_index(80.0)
                    .location(if i % 2 == 0 { "Nile Delta, Egypt" } else { "Po Valley, Italy" })
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_full_range_keeps_everything() {
        let all = points();
        assert_eq!(filter_points(&all, &WaterLevelRange::full()).len(), all.len());
    }

    #[test]
    fn test_full_range_admits_off_scale_levels() {
        let full = WaterLevelRange::full();
        assert!(full.contains(150.0));
        assert!(full.contains(-3.0));

        let narrowed = WaterLevelRange::new(0.0, 99.0);
        assert!(!narrowed.contains(150.0));
        assert!(!narrowed.contains(-3.0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let all = points();
        let kept = filter_points(&all, &WaterLevelRange::new(20.0, 50.0));
        let levels: Vec<f64> = kept.iter().map(|p| p.water_level).collect();
        assert_eq!(levels, vec![20.0, 49.9, 50.0]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let all = points();
        for range in [
            WaterLevelRange::new(10.0, 60.0),
            WaterLevelRange::new(50.0, 50.0),
            WaterLevelRange::new(99.0, 100.0),
        ] {
            let once = filter_points(&all, &range);
            let twice = filter_points(once.iter().copied(), &range);
            let once_ids: Vec<&str> = once.iter().map(|p| p.id.as_str()).collect();
            let twice_ids: Vec<&str> = twice.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(once_ids, twice_ids);
        }
    }

    #[test]
    fn test_new_clamps_and_orders() {
        let r = WaterLevelRange::new(80.0, -5.0);
        assert_eq!((r.min(), r.max()), (0.0, 80.0));
        let r = WaterLevelRange::new(30.0, 250.0);
        assert_eq!((r.min(), r.max()), (30.0, 100.0));
    }

    #[test]
    fn test_shifts_keep_min_below_max() {
        let mut r = WaterLevelRange::new(40.0, 45.0);
        r.shift_min(10.0);
        assert_eq!(r.min(), 45.0);
        r.shift_max(-20.0);
        assert_eq!(r.max(), 45.0);
        r.shift_min(-100.0);
        assert_eq!(r.min(), 0.0);
        r.shift_max(100.0);
        assert_eq!(r.max(), 100.0);
        assert!(r.is_full());
    }

    #[test]
    fn test_search_matches_id_and_location() {
        let all = points();
        assert!(matches_search(&all[0], ""));
        assert!(matches_search(&all[0], "nile"));
        assert!(matches_search(&all[1], "PO VALLEY"));
        assert!(matches_search(&all[3], "gw-0003"));
        assert!(!matches_search(&all[0], "italy"));
    }
}
