//! GeoJSON export of illuminated contour sets.
//!
//! Each segment becomes its own `LineString` feature carrying `height`,
//! `azimuth` and `lightness`; the elevation coordinate is dropped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use log::{info, warn};
use tanaka_core::types::{ContourSet, Segment};

use crate::error::ContourError;

/// Feature for one segment, or None when it has not been annotated yet.
pub fn segment_feature(segment: &Segment) -> Option<Feature> {
    let illumination = segment.illumination?;

    let line = Value::LineString(vec![
        vec![segment.start.x, segment.start.y],
        vec![segment.end.x, segment.end.y],
    ]);

    let mut properties = JsonObject::new();
    properties.insert("height".to_string(), segment.height().into());
    properties.insert("azimuth".to_string(), illumination.azimuth.into());
    properties.insert("lightness".to_string(), illumination.lightness.into());

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(line)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// One feature per annotated segment, in level then segment order.
pub fn to_feature_collection(set: &ContourSet) -> FeatureCollection {
    let features: Vec<Feature> = set.segments().filter_map(segment_feature).collect();

    let skipped = set.segment_count() - features.len();
    if skipped > 0 {
        warn!("{skipped} segments without illumination left out of the export");
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Serialize a contour set as pretty-printed GeoJSON.
pub fn serialize_geojson<W: Write>(set: &ContourSet, writer: W) -> Result<(), ContourError> {
    serde_json::to_writer_pretty(writer, &to_feature_collection(set))?;
    Ok(())
}

/// Write a contour set to `path` as GeoJSON.
pub fn write_geojson<P: AsRef<Path>>(set: &ContourSet, path: P) -> Result<(), ContourError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serialize_geojson(set, &mut writer)?;
    writer.flush()?;

    info!(
        "Wrote {} contour segments to {}",
        set.segment_count(),
        path.display()
    );
    Ok(())
}
