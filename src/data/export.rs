//! JSON export of monitoring points.
//!
//! An export is a regular dataset document with an extra `summary` block, so
//! it can be loaded again with `--file`.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use groundwater_types::{Dataset, MonitoringPoint};

use super::filter::WaterLevelRange;
use super::stats::SeverityCounts;

/// Build the export document for `points` shown under `range`.
pub fn build_export(points: &[&MonitoringPoint], range: &WaterLevelRange) -> Result<serde_json::Value> {
    let counts = SeverityCounts::from_points(points.iter().copied());
    let dataset = Dataset::new(points.iter().map(|p| (*p).clone()).collect());

    let mut export = serde_json::to_value(&dataset)?;
    if let Some(object) = export.as_object_mut() {
        object.insert(
            "summary".to_string(),
            serde_json::json!({
                "total_points": counts.total(),
                "critical": counts.critical,
                "moderate": counts.moderate,
                "normal": counts.normal,
                "water_level_min": range.min(),
                "water_level_max": range.max(),
            }),
        );
    }
    Ok(export)
}

/// Write the export document for `points` to `path`.
pub fn write_export(path: &Path, points: &[&MonitoringPoint], range: &WaterLevelRange) -> Result<()> {
    let export = build_export(points, range)?;
    let json = serde_json::to_string_pretty(&export)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_reloads_as_dataset() {
        let a = MonitoringPoint::builder("gw-0000")
            .position(10.0, 20.0)
            .water_level(15.0)
            .quality_index(80.0)
            .location("Indus Basin, Pakistan")
            .build();
        let b = MonitoringPoint::builder("gw-0001")
            .position(-10.0, -20.0)
            .water_level(75.0)
            .quality_index(80.0)
            .location("Pampas Region, Argentina")
            .build();
        let range = WaterLevelRange::new(10.0, 80.0);

        let file = tempfile::NamedTempFile::new().unwrap();
        write_export(file.path(), &[&a, &b], &range).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["summary"]["total_points"], 2);
        assert_eq!(value["summary"]["critical"], 1);
        assert_eq!(value["summary"]["normal"], 1);
        assert_eq!(value["summary"]["water_level_min"], 10.0);

        let reloaded = Dataset::from_json(&content).unwrap();
        assert_eq!(reloaded.points, vec![a, b]);
    }
}
