//! Core types and definitions for Tanaka contour generation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! points, triangles, illuminated segments, isolines, the surface
//! query interface, and constants. It performs no I/O.

pub mod constants;
pub mod surface;
pub mod types;

pub use surface::{QueryError, Surface};
pub use types::{ContourSet, FailedLevel, Illumination, Isoline, Point3, Segment, Triangle};
