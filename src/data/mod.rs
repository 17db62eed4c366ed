//! Data generation and processing for monitoring points.
//!
//! This module turns a [`Dataset`](groundwater_types::Dataset) into what the
//! views display: the visible subset, severity counts, and screen positions.
//!
//! ## Submodules
//!
//! - [`generator`]: Synthetic point generation (seedable)
//! - [`filter`]: Inclusive water-level range and text search
//! - [`stats`]: Per-severity counts ([`SeverityCounts`])
//! - [`scene`]: Globe camera, canvas mapping, marker picking and animation
//! - [`export`]: JSON export of the visible points
//!
//! ## Data Flow
//!
//! ```text
//! Dataset (generated / file / channel)
//!        │
//!        ▼
//! filter_points(range) ──▶ SeverityCounts (header, overview)
//!        │
//!        ├──▶ Camera + Viewport ──▶ globe markers, click picking
//!        │
//!        └──▶ matches_search() + sort ──▶ points table
//! ```

pub mod export;
pub mod filter;
pub mod generator;
pub mod scene;
pub mod stats;

pub use filter::{filter_points, matches_search, WaterLevelRange};
pub use generator::{generate, generate_dataset, DEFAULT_POINT_COUNT};
pub use scene::{Camera, Viewport};
pub use stats::SeverityCounts;
