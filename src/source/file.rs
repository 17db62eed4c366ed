//! File-based data source.
//!
//! Reads a dataset JSON file, re-reading it when it changes on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use groundwater_types::Dataset;
use tracing::{info, warn};

use super::DataSource;

/// A data source that reads datasets from a JSON file.
///
/// The source tracks the file's modification time and only returns new data
/// when the file has been updated. Files written by the in-app export can be
/// loaded here directly.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Dataset> {
        match Dataset::load(&self.path) {
            Ok(dataset) => {
                self.last_error = None;
                info!(path = %self.path.display(), points = dataset.len(), "loaded dataset");
                Some(dataset)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to load dataset");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Dataset> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep what we have
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            // Record the attempt so a broken file is not re-parsed every tick
            self.last_modified = current_modified;
            return self.read_file();
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};
    use tempfile::NamedTempFile;

    fn sample_json(level: f64) -> String {
        format!(
            r#"{{
                "generatedAt": "2024-05-01T00:00:00Z",
                "points": [{{
                    "id": "gw-0000",
                    "latitude": 31.0,
                    "longitude": 31.0,
                    "waterLevel": {level},
                    "qualityIndex": 75,
                    "location": "Nile Delta, Egypt",
                    "lastUpdated": "2024-04-28T09:30:00Z"
                }}]
            }}"#
        )
    }

    #[test]
    fn test_file_source_poll() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json(42.0)).unwrap();
        file.flush().unwrap();

        let mut source = FileSource::new(file.path());

        let dataset = source.poll().expect("first poll reads the file");
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.points[0].water_level, 42.0);
        assert!(source.error().is_none());

        // Unchanged file yields nothing new
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_detects_changes() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json(42.0)).unwrap();
        file.flush().unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_some());

        // Ensure a later modification time on coarse-grained filesystems
        std::thread::sleep(std::time::Duration::from_millis(1100));
        file.as_file_mut().set_len(0).unwrap();
        file.rewind().unwrap();
        write!(file, "{}", sample_json(7.5)).unwrap();
        file.flush().unwrap();

        let dataset = source.poll().expect("modified file is re-read");
        assert_eq!(dataset.points[0].water_level, 7.5);
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/points.json");
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Failed to read dataset"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Failed to parse dataset"));
    }

    #[test]
    fn test_file_source_description() {
        let source = FileSource::new("/tmp/points.json");
        assert_eq!(source.description(), "file: /tmp/points.json");
        assert_eq!(source.path(), Path::new("/tmp/points.json"));
    }
}
