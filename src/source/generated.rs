//! In-process generated data source.

use groundwater_types::Dataset;
use tracing::info;

use super::DataSource;
use crate::data::generate_dataset;

/// A data source that generates synthetic points once, on first poll.
#[derive(Debug)]
pub struct GeneratedSource {
    count: usize,
    seed: Option<u64>,
    description: String,
    delivered: bool,
}

impl GeneratedSource {
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        let description = match seed {
            Some(seed) => format!("generated: {} points (seed {})", count, seed),
            None => format!("generated: {} points", count),
        };
        Self {
            count,
            seed,
            description,
            delivered: false,
        }
    }
}

impl DataSource for GeneratedSource {
    fn poll(&mut self) -> Option<Dataset> {
        if self.delivered {
            return None;
        }
        self.delivered = true;
        let dataset = generate_dataset(self.count, self.seed);
        info!(points = dataset.len(), "generated monitoring points");
        Some(dataset)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
