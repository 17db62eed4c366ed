//! # groundwater-types
//!
//! Core types for groundwater monitoring visualization. This crate defines the
//! monitoring point record, the severity classification derived from it, and
//! the geographic-to-3D projection used to place points on a globe.
//!
//! ## Design Goals
//!
//! - **Derived severity**: a point's severity is always computed from its water
//!   level and quality index, never stored independently
//! - **Pure helpers**: projection and classification are total, stateless functions
//! - **Optional serialization**: enable the `serde` feature (default) for JSON datasets
//! - **Versioned datasets**: datasets include version info for forward compatibility
//!
//! ## Features
//!
//! - `serde` (default): JSON serialization of points and datasets
//!
//! ## Example
//!
//! ```rust
//! use groundwater_types::{Dataset, Severity};
//!
//! let dataset = Dataset::builder()
//!     .point("gw-0000", |p| {
//!         p.position(29.5, 31.2)
//!          .water_level(12.4)
//!          .quality_index(71.0)
//!          .location("Nile Delta, Egypt")
//!     })
//!     .point("gw-0001", |p| {
//!         p.position(-34.1, 18.9)
//!          .water_level(64.0)
//!          .quality_index(88.0)
//!          .location("Western Cape, South Africa")
//!     })
//!     .build();
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.points[0].severity(), Severity::Critical);
//! assert_eq!(dataset.points[1].severity(), Severity::Normal);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in serialized
//! datasets so loaders can reject formats they do not understand.

mod dataset;
mod error;
mod point;
mod projection;
mod severity;
mod version;

pub use dataset::*;
pub use error::*;
pub use point::*;
pub use projection::*;
pub use severity::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the dataset format.
pub const SCHEMA_VERSION: u32 = 1;
