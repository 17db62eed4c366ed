//! Background loader that generates points off the UI thread.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::ChannelSource;
use crate::data::generate_dataset;

/// Parameters for the background loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Number of points to generate.
    pub count: usize,
    /// Seed for reproducible generation.
    pub seed: Option<u64>,
    /// Delay before the dataset is published.
    pub delay: Duration,
}

/// Spawn a task that waits `delay`, generates the dataset and publishes it.
///
/// Must be called from within a tokio runtime. Returns the source the TUI
/// polls and the task handle.
///
/// ```
/// use std::time::Duration;
/// use groundwater_globe::{spawn_loader, LoaderOptions};
///
/// # tokio_test::block_on(async {
/// let options = LoaderOptions { count: 10, seed: Some(1), delay: Duration::ZERO };
/// let (_source, handle) = spawn_loader(options);
/// handle.await.unwrap();
/// # });
/// ```
pub fn spawn_loader(options: LoaderOptions) -> (ChannelSource, JoinHandle<()>) {
    let (tx, source) = ChannelSource::create("loader");

    let handle = tokio::spawn(async move {
        debug!(delay_ms = options.delay.as_millis() as u64, "loader waiting");
        tokio::time::sleep(options.delay).await;

        let dataset = generate_dataset(options.count, options.seed);
        info!(points = dataset.len(), "loader generated monitoring points");

        if tx.send(dataset).is_err() {
            warn!("TUI receiver dropped before points were delivered");
        }
    });

    (source, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DataSource;

    #[tokio::test(start_paused = true)]
    async fn test_loader_delivers_after_delay() {
        let options = LoaderOptions {
            count: 20,
            seed: Some(9),
            delay: Duration::from_millis(800),
        };
        let (mut source, handle) = spawn_loader(options);

        // Still loading
        tokio::task::yield_now().await;
        assert!(source.poll().is_none());

        handle.await.unwrap();

        let dataset = source.poll().expect("dataset published after the delay");
        assert_eq!(dataset.len(), 20);
        assert!(source.poll().is_none());
    }
}
