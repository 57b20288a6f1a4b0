//! Tanaka contour engine.
//!
//! Extracts contour segments from a triangulated surface at a set of
//! elevation levels, orients each segment so higher ground sits on a
//! consistent side, and annotates it with azimuth and simulated
//! lightness for illuminated-contour rendering.

pub use tanaka_core as core;

pub mod assemble;
pub mod config;
pub mod crossing;
pub mod error;
pub mod extract;
pub mod geojson;
pub mod illumination;
pub mod levels;
pub mod orient;

// Re-export key types for convenience.
pub use assemble::{build_contours, process_level};
pub use config::ContourConfig;
pub use crossing::{resolve_crossing, Crossing};
pub use error::ContourError;
pub use extract::extract_isoline;
pub use crate::geojson::{to_feature_collection, write_geojson};
pub use illumination::{annotate_isoline, azimuth, lightness};
pub use levels::{LevelRange, Levels};
pub use orient::orient_isoline;
