//! ASCII PLY export of a TIN, for inspecting the triangulation in a mesh viewer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::tin::Tin;

/// Write `tin` to `path` as an ASCII PLY mesh.
pub fn write_ply(tin: &Tin, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serialize_ply(tin, &mut out)?;
    out.flush()
}

/// Serialize `tin` as ASCII PLY into any writer.
pub fn serialize_ply<W: Write>(tin: &Tin, out: &mut W) -> io::Result<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "element vertex {}", tin.vertices().len())?;
    writeln!(out, "property double x")?;
    writeln!(out, "property double y")?;
    writeln!(out, "property double z")?;
    writeln!(out, "element face {}", tin.triangle_count())?;
    writeln!(out, "property list uchar int vertex_indices")?;
    writeln!(out, "end_header")?;

    for v in tin.vertices() {
        writeln!(out, "{} {} {}", v.x, v.y, v.z)?;
    }
    for [a, b, c] in tin.triangle_indices() {
        writeln!(out, "3 {a} {b} {c}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanaka_core::types::Point3;

    #[test]
    fn test_ply_header_and_counts() {
        let tin = Tin::from_points(vec![
            Point3::new(0.0, 0.0, 1.5),
            Point3::new(2.0, 0.0, 2.0),
            Point3::new(0.0, 2.0, 3.0),
        ])
        .unwrap();

        let mut buf = Vec::new();
        serialize_ply(&tin, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ply");
        assert!(lines.contains(&"element vertex 3"));
        assert!(lines.contains(&"element face 1"));
        let header_end = lines.iter().position(|l| *l == "end_header").unwrap();
        assert_eq!(lines[header_end + 1], "0 0 1.5");
        assert_eq!(lines.len(), header_end + 1 + 3 + 1);
        assert!(lines.last().unwrap().starts_with("3 "));
    }
}
