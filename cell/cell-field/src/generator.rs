//! Field generation dispatch.

use cell_grid::{Pose, UnitCellGrid};
use cell_types::{StrutLattice, TriMesh};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::FieldResult;
use crate::field::ScalarField;
use crate::lattice::lattice_field;
use crate::raster::{mesh_solid_mask, signed_field_from_mask};
use crate::tpms::TpmsParams;
use crate::volume::{resample_volume, VolumeData};

/// The generator kinds a scalar field can be built from.
///
/// Each variant carries only the data it needs; construction is a pure
/// function from variant to [`ScalarField`] (see [`generate`]).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Generator {
    /// A periodic trigonometric implicit equation.
    Tpms(TpmsParams),
    /// A triangulated surface, rasterized and converted to a signed
    /// distance field.
    TriangleMesh(TriMesh),
    /// A strut lattice of capped cylinders and node spheres.
    Lattice(StrutLattice),
    /// Raw field values supplied directly, x-fastest linear order.
    Raw(Vec<f64>),
    /// Volumetric data (e.g. an image stack) resampled trilinearly.
    ImageStack(VolumeData),
}

/// Build a scalar field from a generator.
///
/// The pose maps sampling space into world space: implicit generators
/// (TPMS, lattice, image stack) evaluate at the inverse-transformed grid
/// coordinates, so one defining equation serves any scale, rotation, or
/// placement of the unit cell.
///
/// Empty collaborator input (a mesh with no faces, a lattice with no
/// struts) yields the all-void empty field rather than an error; shape
/// mismatches and singular poses fail fast.
///
/// # Errors
///
/// Returns a [`crate::FieldError`] for raw-value shape mismatches,
/// impossible offset broadcasts, or a singular pose.
pub fn generate(grid: UnitCellGrid, pose: &Pose, generator: &Generator) -> FieldResult<ScalarField> {
    info!(
        dims = ?grid.dims(),
        voxel_size = grid.voxel_size(),
        "generating scalar field"
    );

    match generator {
        Generator::Tpms(params) => tpms_field(grid, pose, params),
        Generator::TriangleMesh(mesh) => {
            if mesh.is_empty() {
                debug!("mesh generator input is empty, leaving field empty");
                return Ok(ScalarField::empty(grid));
            }
            let solid = mesh_solid_mask(mesh, &grid);
            let u = signed_field_from_mask(&solid, &grid);
            ScalarField::from_values(grid, u)
        }
        Generator::Lattice(lattice) => {
            if lattice.is_empty() {
                debug!("lattice generator input is empty, leaving field empty");
                return Ok(ScalarField::empty(grid));
            }
            let u = lattice_field(lattice, &grid, pose)?;
            ScalarField::from_values(grid, u)
        }
        Generator::Raw(values) => ScalarField::from_values(grid, values.clone()),
        Generator::ImageStack(data) => {
            let u = resample_volume(data, &grid, pose)?;
            ScalarField::from_values(grid, u)
        }
    }
}

/// Evaluate a TPMS equation over the grid's sampling space.
fn tpms_field(grid: UnitCellGrid, pose: &Pose, params: &TpmsParams) -> FieldResult<ScalarField> {
    let dims = grid.dims();
    let samples = grid.sample_points(pose)?;
    let v1 = params.v1.broadcast(dims)?;
    let v2 = params.v2.broadcast(dims)?;

    let u: Vec<f64> = samples
        .par_iter()
        .enumerate()
        .map(|(i, s)| params.combine(params.kind.evaluate(s), v1[i], v2[i]))
        .collect();

    ScalarField::from_values(grid, u)
}
