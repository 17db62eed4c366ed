//! # groundwater-globe
//!
//! An interactive terminal globe for groundwater monitoring points.
//!
//! Monitoring points are drawn as severity-colored markers on a rotating,
//! orthographically projected globe. A water-level range filter narrows the
//! visible set, a side panel shows per-severity counts and the details of
//! the selected point, and a table view lists, searches and sorts the
//! visible points.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(filtering)    │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── GeneratedSource | FileSource | ChannelSource│
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, selection, range filter, camera
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with
//!   implementations for in-process generation, JSON files, and a channel
//!   fed by a background loader task
//! - **[`data`]**: Mock generation, filtering, severity counts, globe scene
//!   math, and JSON export
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]** and **[`logging`]**: layered configuration and log setup
//!
//! The point model, severity classifier and coordinate projection live in the
//! `groundwater-types` crate.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Generate 500 points after a short simulated load
//! groundwater-globe
//!
//! # Reproducible data
//! groundwater-globe --count 1000 --seed 42
//!
//! # Load a dataset (e.g. a previous export)
//! groundwater-globe --file groundwater_export.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use groundwater_globe::{App, GeneratedSource, Settings};
//!
//! let source = Box::new(GeneratedSource::new(100, Some(7)));
//! let mut app = App::new(source, &Settings::default());
//! app.reload_data().unwrap();
//! assert_eq!(app.visible_points().len(), 100);
//! ```
//!
//! ### With a channel source
//!
//! ```
//! use groundwater_globe::{App, ChannelSource, Settings};
//! use groundwater_types::Dataset;
//!
//! let (tx, source) = ChannelSource::create("external");
//! let mut app = App::new(Box::new(source), &Settings::default());
//!
//! tx.send(Dataset::default()).unwrap();
//! assert!(app.reload_data().unwrap());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod logging;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{Camera, SeverityCounts, WaterLevelRange};
pub use settings::{Settings, ThemeChoice};
pub use source::{
    spawn_loader, ChannelSource, DataSource, FileSource, GeneratedSource, LoaderOptions,
};
