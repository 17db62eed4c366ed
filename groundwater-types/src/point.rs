//! The monitoring point record.

use chrono::{DateTime, Utc};

use crate::{lat_lon_to_vec3, Severity, Vec3};

/// A single groundwater monitoring well/location.
///
/// Severity is not stored: [`MonitoringPoint::severity`] classifies the water
/// level and quality index on every call, so it can never disagree with them.
/// The serialized form includes a `severity` field for consumers, which is
/// ignored when reading.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PointRecord", into = "PointRecord"))]
pub struct MonitoringPoint {
    /// Unique identifier (e.g. `gw-0042`).
    pub id: String,
    /// Latitude in degrees, -90..=90.
    pub latitude: f64,
    /// Longitude in degrees, -180..=180.
    pub longitude: f64,
    /// Water level in meters.
    pub water_level: f64,
    /// Quality index, 0..=100 (higher is better).
    pub quality_index: f64,
    /// Free-text place description.
    pub location: String,
    /// When the reading was last updated.
    pub last_updated: DateTime<Utc>,
    /// Water temperature in degrees Celsius.
    pub temperature: Option<f64>,
    pub ph: Option<f64>,
    /// Detected contaminants, empty when none.
    pub contaminants: Vec<String>,
}

impl MonitoringPoint {
    /// Create a builder for a point with the given id.
    pub fn builder(id: impl Into<String>) -> MonitoringPointBuilder {
        MonitoringPointBuilder::new(id)
    }

    /// Severity derived from the water level and quality index.
    pub fn severity(&self) -> Severity {
        Severity::classify(self.water_level, self.quality_index)
    }

    /// Position of this point on a sphere of the given radius.
    pub fn position(&self, radius: f64) -> Vec3 {
        lat_lon_to_vec3(self.latitude, self.longitude, radius)
    }

    /// The leading segment of the location, before the first comma.
    ///
    /// `"Nile Delta, Egypt"` becomes `"Nile Delta"`.
    pub fn short_location(&self) -> &str {
        self.location.split(',').next().unwrap_or(&self.location).trim()
    }

    /// Returns true if the coordinates are within the valid domain.
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Builder for [`MonitoringPoint`].
#[derive(Debug)]
pub struct MonitoringPointBuilder {
    id: String,
    latitude: f64,
    longitude: f64,
    water_level: f64,
    quality_index: f64,
    location: String,
    last_updated: Option<DateTime<Utc>>,
    temperature: Option<f64>,
    ph: Option<f64>,
    contaminants: Vec<String>,
}

impl MonitoringPointBuilder {
    /// Create a new builder. Measurements default to zero.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            latitude: 0.0,
            longitude: 0.0,
            water_level: 0.0,
            quality_index: 0.0,
            location: String::new(),
            last_updated: None,
            temperature: None,
            ph: None,
            contaminants: Vec::new(),
        }
    }

    /// Set latitude and longitude in degrees.
    pub fn position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn water_level(mut self, meters: f64) -> Self {
        self.water_level = meters;
        self
    }

    pub fn quality_index(mut self, index: f64) -> Self {
        self.quality_index = index;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    pub fn temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    pub fn ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }

    /// Add a detected contaminant.
    pub fn contaminant(mut self, name: impl Into<String>) -> Self {
        self.contaminants.push(name.into());
        self
    }

    /// Build the point. `last_updated` defaults to now.
    pub fn build(self) -> MonitoringPoint {
        MonitoringPoint {
            id: self.id,
            latitude: self.latitude,
            longitude: self.longitude,
            water_level: self.water_level,
            quality_index: self.quality_index,
            location: self.location,
            last_updated: self.last_updated.unwrap_or_else(Utc::now),
            temperature: self.temperature,
            ph: self.ph,
            contaminants: self.contaminants,
        }
    }
}

/// Wire form of a point, with the derived severity spelled out.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointRecord {
    id: String,
    latitude: f64,
    longitude: f64,
    water_level: f64,
    quality_index: f64,
    #[serde(default)]
    severity: Option<Severity>,
    location: String,
    last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ph: Option<f64>,
    #[serde(default)]
    contaminants: Vec<String>,
}

#[cfg(feature = "serde")]
impl From<PointRecord> for MonitoringPoint {
    fn from(record: PointRecord) -> Self {
        // record.severity is deliberately dropped; it is always re-derived
        Self {
            id: record.id,
            latitude: record.latitude,
            longitude: record.longitude,
            water_level: record.water_level,
            quality_index: record.quality_index,
            location: record.location,
            last_updated: record.last_updated,
            temperature: record.temperature,
            ph: record.ph,
            contaminants: record.contaminants,
        }
    }
}

#[cfg(feature = "serde")]
impl From<MonitoringPoint> for PointRecord {
    fn from(point: MonitoringPoint) -> Self {
        Self {
            severity: Some(point.severity()),
            id: point.id,
            latitude: point.latitude,
            longitude: point.longitude,
            water_level: point.water_level,
            quality_index: point.quality_index,
            location: point.location,
            last_updated: point.last_updated,
            temperature: point.temperature,
            ph: point.ph,
            contaminants: point.contaminants,
        }
    }
}
