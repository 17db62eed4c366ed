//! Synthetic monitoring point generation.
//!
//! Points are scattered uniformly over the globe (excluding the polar caps)
//! with random measurements and a place name drawn from a fixed list of
//! well-known groundwater basins.

use chrono::{DateTime, Duration, Utc};
use groundwater_types::{Dataset, MonitoringPoint, Severity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of points generated when nothing else is configured.
pub const DEFAULT_POINT_COUNT: usize = 500;

/// How far back `last_updated` timestamps may reach.
const MAX_AGE_DAYS: i64 = 30;

/// Place names assigned to generated points.
pub const LOCATIONS: [&str; 20] = [
    "California Central Valley, USA",
    "Ganges Basin, India",
    "North China Plain, China",
    "Arabian Peninsula, Saudi Arabia",
    "High Plains Aquifer, USA",
    "Murray-Darling Basin, Australia",
    "Sahara Desert, North Africa",
    "Guarani Aquifer, South America",
    "Great Artesian Basin, Australia",
    "Ogallala Aquifer, USA",
    "Indus Basin, Pakistan",
    "Nile Delta, Egypt",
    "Po Valley, Italy",
    "Central Valley, Mexico",
    "Pannonian Basin, Hungary",
    "Western Cape, South Africa",
    "Punjab Region, India",
    "Mesopotamian Plain, Iraq",
    "Pampas Region, Argentina",
    "Great Hungarian Plain, Hungary",
];

/// Contaminants, in the order they are attached to problematic wells.
pub const CONTAMINANTS: [&str; 8] = [
    "Nitrates",
    "Pesticides",
    "Heavy Metals",
    "Salinity",
    "Fluoride",
    "Arsenic",
    "Bacteria",
    "Industrial Chemicals",
];

/// Generate `count` monitoring points.
///
/// `now` anchors the `last_updated` timestamps, which fall within the
/// preceding 30 days.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<MonitoringPoint> {
    (0..count).map(|i| generate_point(i, now, rng)).collect()
}

/// Generate a full dataset, seeded for reproducibility when `seed` is given.
pub fn generate_dataset(count: usize, seed: Option<u64>) -> Dataset {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Utc::now();
    let mut dataset = Dataset::new(generate(count, now, &mut rng));
    dataset.generated_at = now;
    dataset
}

fn generate_point<R: Rng + ?Sized>(index: usize, now: DateTime<Utc>, rng: &mut R) -> MonitoringPoint {
    let latitude = (rng.gen::<f64>() - 0.5) * 160.0;
    let longitude = (rng.gen::<f64>() - 0.5) * 360.0;

    let water_level: f64 = rng.gen::<f64>() * 100.0;
    let quality_index: f64 = rng.gen::<f64>() * 100.0;

    // Contaminants are decided on the raw draws; the stored point re-derives
    // its severity from the rounded values.
    let raw_severity = Severity::classify(water_level, quality_index);
    let contaminants = if raw_severity != Severity::Normal && rng.gen::<f64>() > 0.5 {
        let n = rng.gen_range(1..=3);
        CONTAMINANTS[..n].iter().map(|c| c.to_string()).collect()
    } else {
        Vec::new()
    };

    let location = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
    let age_ms = rng.gen::<f64>() * (MAX_AGE_DAYS * 24 * 60 * 60 * 1000) as f64;
    let temperature = round_to_tenth(rng.gen::<f64>() * 30.0 + 5.0);
    let ph = round_to_tenth(rng.gen::<f64>() * 6.0 + 4.0);

    MonitoringPoint {
        id: format!("gw-{:04}", index),
        latitude,
        longitude,
        water_level: round_to_tenth(water_level),
        quality_index: quality_index.round(),
        location: location.to_string(),
        last_updated: now - Duration::milliseconds(age_ms as i64),
        temperature: Some(temperature),
        ph: Some(ph),
        contaminants,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
