//! Dataset - a versioned collection of monitoring points.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{DatasetError, MonitoringPoint, MonitoringPointBuilder, SchemaVersion, Severity};

/// A collection of monitoring points captured at one time.
///
/// # Example
///
/// ```rust
/// use groundwater_types::Dataset;
///
/// let dataset = Dataset::builder()
///     .point("gw-0000", |p| p.position(36.5, -119.8).water_level(42.0).quality_index(80.0))
///     .build();
///
/// assert!(dataset.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Dataset {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: SchemaVersion,

    /// When the points were generated or exported.
    pub generated_at: DateTime<Utc>,

    /// The monitoring points, in display order.
    pub points: Vec<MonitoringPoint>,
}

impl Dataset {
    /// Create a dataset from points, stamped with the current time.
    pub fn new(points: Vec<MonitoringPoint>) -> Self {
        Self {
            version: SchemaVersion::current(),
            generated_at: Utc::now(),
            points,
        }
    }

    /// Create a builder for constructing datasets.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Find a point by id.
    pub fn get(&self, id: &str) -> Option<&MonitoringPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Count points with the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.points.iter().filter(|p| p.severity() == severity).count()
    }

    /// Check version compatibility, coordinates, measurements and id uniqueness.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if !self.version.is_compatible() {
            return Err(DatasetError::UnsupportedVersion {
                found: self.version,
                expected: SchemaVersion::current(),
            });
        }

        let mut seen = HashSet::with_capacity(self.points.len());
        for point in &self.points {
            if !point.has_valid_coordinates() {
                return Err(DatasetError::InvalidCoordinate {
                    id: point.id.clone(),
                    latitude: point.latitude,
                    longitude: point.longitude,
                });
            }
            check_measurement(&point.id, "water level", point.water_level)?;
            check_measurement(&point.id, "quality index", point.quality_index)?;
            if !seen.insert(point.id.as_str()) {
                return Err(DatasetError::DuplicateId(point.id.clone()));
            }
        }
        Ok(())
    }

    /// Parse and validate a dataset from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(content: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read, parse and validate a dataset file.
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json_pretty(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Water level (m) and quality index share the same 0-100 scale.
const MEASUREMENT_SCALE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

fn check_measurement(id: &str, field: &'static str, value: f64) -> Result<(), DatasetError> {
    if !value.is_finite() {
        return Err(DatasetError::NonFiniteMeasurement {
            id: id.to_string(),
            field,
        });
    }
    if !MEASUREMENT_SCALE.contains(&value) {
        return Err(DatasetError::MeasurementOutOfRange {
            id: id.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Builder for constructing [`Dataset`] instances.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    generated_at: Option<DateTime<Utc>>,
    points: Vec<MonitoringPoint>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a specific generation timestamp.
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Add a point built using a closure.
    pub fn point<F>(mut self, id: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(MonitoringPointBuilder) -> MonitoringPointBuilder,
    {
        self.points.push(f(MonitoringPointBuilder::new(id)).build());
        self
    }

    /// Add a pre-built point.
    pub fn monitoring_point(mut self, point: MonitoringPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn build(self) -> Dataset {
        Dataset {
            version: SchemaVersion::current(),
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            points: self.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Dataset {
        Dataset::builder()
            .generated_at(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
            .point("gw-0000", |p| {
                p.position(30.8, 31.0)
                    .water_level(12.0)
                    .quality_index(70.0)
                    .location("Nile Delta, Egypt")
                    .contaminant("Salinity")
            })
            .point("gw-0001", |p| {
                p.position(45.1, 10.2).water_level(45.0).quality_index(90.0).location("Po Valley, Italy")
            })
            .point("gw-0002", |p| {
                p.position(-34.0, -61.0).water_level(72.5).quality_index(81.0).temperature(18.2).ph(7.1)
            })
            .build()
    }

    #[test]
    fn test_builder_and_counts() {
        let dataset = sample();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.count_severity(Severity::Critical), 1);
        assert_eq!(dataset.count_severity(Severity::Moderate), 1);
        assert_eq!(dataset.count_severity(Severity::Normal), 1);
        assert_eq!(dataset.get("gw-0001").unwrap().location, "Po Valley, Italy");
        assert!(dataset.get("gw-9999").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_points() {
        let bad = Dataset::builder().point("x", |p| p.position(0.0, 181.0)).build();
        assert!(matches!(bad.validate(), Err(DatasetError::InvalidCoordinate { .. })));

        let bad = Dataset::builder().point("x", |p| p.water_level(f64::NAN)).build();
        assert!(matches!(
            bad.validate(),
            Err(DatasetError::NonFiniteMeasurement { field: "water level", .. })
        ));

        let bad = Dataset::builder().point("x", |p| p.water_level(150.0)).build();
        assert!(matches!(
            bad.validate(),
            Err(DatasetError::MeasurementOutOfRange { field: "water level", value, .. }) if value == 150.0
        ));

        let bad = Dataset::builder().point("x", |p| p.quality_index(-1.0)).build();
        assert!(matches!(
            bad.validate(),
            Err(DatasetError::MeasurementOutOfRange { field: "quality index", .. })
        ));

        let bad = Dataset::builder().point("dup", |p| p).point("dup", |p| p).build();
        assert!(matches!(bad.validate(), Err(DatasetError::DuplicateId(id)) if id == "dup"));

        let mut bad = sample();
        bad.version = SchemaVersion::new(99, 0);
        assert!(matches!(bad.validate(), Err(DatasetError::UnsupportedVersion { .. })));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_roundtrip() {
        let dataset = sample();
        let json = dataset.to_json_pretty().unwrap();
        assert!(json.contains("\"generatedAt\""));
        assert!(json.contains("\"severity\": \"critical\""));

        let parsed = Dataset::from_json(&json).unwrap();
        assert_eq!(parsed, dataset);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "generatedAt": "2024-05-01T00:00:00Z",
            "points": [{
                "id": "gw-0000", "latitude": 95.0, "longitude": 0.0,
                "waterLevel": 40.0, "qualityIndex": 40.0,
                "location": "Nowhere", "lastUpdated": "2024-05-01T00:00:00Z"
            }]
        }"#;
        assert!(matches!(Dataset::from_json(json), Err(DatasetError::InvalidCoordinate { .. })));
        let json = json.replace("95.0", "10.0").replace("\"waterLevel\": 40.0", "\"waterLevel\": -3.0");
        assert!(matches!(
            Dataset::from_json(&json),
            Err(DatasetError::MeasurementOutOfRange { .. })
        ));
        assert!(matches!(Dataset::from_json("not json"), Err(DatasetError::Parse(_))));
    }
}
