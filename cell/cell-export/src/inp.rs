//! Abaqus-style `.inp` writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::hex::HexMesh;

/// Write a hex mesh to a writer in Abaqus `.inp` format.
///
/// Emits a `*NODE` section (id, x, y, z) followed by a
/// `*ELEMENT, TYPE=C3D8` connectivity section, both 1-based.
///
/// # Errors
///
/// Returns [`ExportError::EmptyMesh`] for a mesh with no elements, or an
/// I/O error from the writer.
pub fn write_inp<W: Write>(mesh: &HexMesh, mut writer: W) -> ExportResult<()> {
    if mesh.is_empty() {
        return Err(ExportError::EmptyMesh);
    }

    writeln!(writer, "*HEADING")?;
    writeln!(writer, "Voxel hexahedral mesh")?;

    writeln!(writer, "*NODE")?;
    for (id, coord) in mesh.node_ids.iter().zip(&mesh.node_coords) {
        writeln!(
            writer,
            "{id}, {:.9}, {:.9}, {:.9}",
            coord.x, coord.y, coord.z
        )?;
    }

    writeln!(writer, "*ELEMENT, TYPE=C3D8")?;
    for (index, element) in mesh.elements.iter().enumerate() {
        write!(writer, "{}", index + 1)?;
        for id in element {
            write!(writer, ", {id}")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Write a hex mesh to a file in Abaqus `.inp` format.
///
/// # Errors
///
/// Returns [`ExportError::EmptyMesh`] for a mesh with no elements, or an
/// I/O error creating or writing the file.
pub fn save_inp<P: AsRef<Path>>(mesh: &HexMesh, path: P) -> ExportResult<()> {
    info!(
        elements = mesh.element_count(),
        nodes = mesh.node_count(),
        path = %path.as_ref().display(),
        "writing hexahedral mesh"
    );
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_inp(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cell_field::ScalarField;
    use cell_grid::UnitCellGrid;
    use cell_types::{Aabb, Point3};

    use crate::hex::build_hex_mesh;

    fn single_voxel_mesh() -> HexMesh {
        let grid = UnitCellGrid::new(
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
            0.5,
        )
        .expect("valid grid");
        let mut u = vec![1.0; grid.len()];
        u[grid.index(0, 0, 0)] = -1.0;
        let field = ScalarField::from_values(grid, u).expect("shape ok");
        build_hex_mesh(&field)
    }

    #[test]
    fn writes_node_and_element_sections() {
        let mesh = single_voxel_mesh();
        let mut out = Vec::new();
        write_inp(&mesh, &mut out).expect("write ok");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("*NODE"));
        assert!(text.contains("*ELEMENT, TYPE=C3D8"));
        // One element line: id 1 plus eight node ids.
        let element_line = text
            .lines()
            .skip_while(|l| !l.starts_with("*ELEMENT"))
            .nth(1)
            .expect("element line");
        assert_eq!(element_line.split(", ").count(), 9);
        assert!(element_line.starts_with('1'));
    }

    #[test]
    fn node_lines_match_node_count() {
        let mesh = single_voxel_mesh();
        let mut out = Vec::new();
        write_inp(&mesh, &mut out).expect("write ok");
        let text = String::from_utf8(out).expect("utf8");

        let node_lines = text
            .lines()
            .skip_while(|l| !l.starts_with("*NODE"))
            .skip(1)
            .take_while(|l| !l.starts_with('*'))
            .count();
        assert_eq!(node_lines, mesh.node_count());
    }

    #[test]
    fn empty_mesh_is_an_error() {
        let mesh = HexMesh::default();
        let mut out = Vec::new();
        assert!(matches!(
            write_inp(&mesh, &mut out),
            Err(ExportError::EmptyMesh)
        ));
    }
}
