//! Data source abstraction for receiving monitoring datasets.
//!
//! This module provides a trait-based abstraction for obtaining point data
//! from various places (in-process generation, JSON files, background tasks
//! feeding a channel).

mod channel;
mod file;
mod generated;
mod loader;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use generated::GeneratedSource;
pub use loader::{spawn_loader, LoaderOptions};

use std::fmt::Debug;

use groundwater_types::Dataset;

/// Trait for receiving monitoring datasets from various sources.
///
/// # Example
///
/// ```
/// use groundwater_globe::{DataSource, GeneratedSource};
///
/// let mut source = GeneratedSource::new(25, Some(7));
/// if let Some(dataset) = source.poll() {
///     println!("Got {} points", dataset.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for a new dataset.
    ///
    /// Returns `Some(dataset)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Dataset>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error message if the last poll failed.
    fn error(&self) -> Option<&str>;
}
