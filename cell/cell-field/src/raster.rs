//! Triangle-mesh rasterization into the voxel grid.
//!
//! The mesh generator pipeline: rasterize the surface (with periodic wrap
//! at the domain boundary, since unit cells tile), flood-fill the exterior
//! to recover the filled solid mask, then build a signed-distance field
//! from two Euclidean distance transforms.

// Voxel index arithmetic; casts are safe for practical grids.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use std::collections::VecDeque;

use cell_grid::UnitCellGrid;
use cell_types::TriMesh;

use crate::distance::squared_edt_3d;

/// Rasterize the mesh surface into a boundary-voxel mask.
///
/// Each triangle is covered with barycentric sample points at half-voxel
/// spacing; every sample marks its nearest grid voxel. Indices wrap
/// periodically at the domain boundary so a tiling unit cell closes on
/// itself.
pub(crate) fn rasterize_surface(mesh: &TriMesh, grid: &UnitCellGrid) -> Vec<bool> {
    let (nx, ny, nz) = grid.dims();
    let h = grid.voxel_size();
    let lower = grid.bounds().min;
    let mut surface = vec![false; grid.len()];

    let wrap = |v: f64, n: usize| -> usize {
        let i = (v / h).round() as isize;
        i.rem_euclid(n as isize) as usize
    };

    for face in 0..mesh.face_count() {
        let Some([a, b, c]) = mesh.triangle(face) else {
            continue;
        };

        // Sample density driven by the longest edge.
        let longest = (b - a).norm().max((c - a).norm()).max((c - b).norm());
        let steps = ((longest / (0.5 * h)).ceil() as usize).max(1);

        for i in 0..=steps {
            let u = i as f64 / steps as f64;
            for j in 0..=(steps - i) {
                let v = j as f64 / steps as f64;
                let p = a + (b - a) * u + (c - a) * v;

                let ix = wrap(p.x - lower.x, nx);
                let iy = wrap(p.y - lower.y, ny);
                let iz = wrap(p.z - lower.z, nz);
                surface[grid.index(ix, iy, iz)] = true;
            }
        }
    }

    surface
}

/// Fill the interior enclosed by a boundary mask.
///
/// Flood-fills the exterior from every domain-boundary voxel that is not
/// part of the surface (6-connectivity, no wrap); everything not reached is
/// solid — the surface itself plus any enclosed interior.
pub(crate) fn fill_interior(surface: &[bool], dims: (usize, usize, usize)) -> Vec<bool> {
    let (nx, ny, nz) = dims;
    let index = |ix: usize, iy: usize, iz: usize| ix + iy * nx + iz * nx * ny;

    let mut outside = vec![false; surface.len()];
    let mut queue: VecDeque<(usize, usize, usize)> = VecDeque::new();

    fn visit(
        surface: &[bool],
        outside: &mut [bool],
        queue: &mut VecDeque<(usize, usize, usize)>,
        idx: usize,
        at: (usize, usize, usize),
    ) {
        if !surface[idx] && !outside[idx] {
            outside[idx] = true;
            queue.push_back(at);
        }
    }

    // Seed with every domain-boundary voxel.
    for iy in 0..ny {
        for ix in 0..nx {
            for iz in [0, nz - 1] {
                visit(surface, &mut outside, &mut queue, index(ix, iy, iz), (ix, iy, iz));
            }
        }
    }
    for iz in 0..nz {
        for ix in 0..nx {
            for iy in [0, ny - 1] {
                visit(surface, &mut outside, &mut queue, index(ix, iy, iz), (ix, iy, iz));
            }
        }
        for iy in 0..ny {
            for ix in [0, nx - 1] {
                visit(surface, &mut outside, &mut queue, index(ix, iy, iz), (ix, iy, iz));
            }
        }
    }

    while let Some((ix, iy, iz)) = queue.pop_front() {
        if ix > 0 {
            visit(surface, &mut outside, &mut queue, index(ix - 1, iy, iz), (ix - 1, iy, iz));
        }
        if ix + 1 < nx {
            visit(surface, &mut outside, &mut queue, index(ix + 1, iy, iz), (ix + 1, iy, iz));
        }
        if iy > 0 {
            visit(surface, &mut outside, &mut queue, index(ix, iy - 1, iz), (ix, iy - 1, iz));
        }
        if iy + 1 < ny {
            visit(surface, &mut outside, &mut queue, index(ix, iy + 1, iz), (ix, iy + 1, iz));
        }
        if iz > 0 {
            visit(surface, &mut outside, &mut queue, index(ix, iy, iz - 1), (ix, iy, iz - 1));
        }
        if iz + 1 < nz {
            visit(surface, &mut outside, &mut queue, index(ix, iy, iz + 1), (ix, iy, iz + 1));
        }
    }

    outside.iter().map(|&o| !o).collect()
}

/// Rasterize a mesh into a filled solid mask.
pub(crate) fn mesh_solid_mask(mesh: &TriMesh, grid: &UnitCellGrid) -> Vec<bool> {
    let surface = rasterize_surface(mesh, grid);
    fill_interior(&surface, grid.dims())
}

/// Build a signed-distance field from a filled solid mask.
///
/// `U = (dist_to_solid - dist_to_void) * voxel_size`: negative inside the
/// solid, positive outside, with magnitude approximating the Euclidean
/// distance to the surface.
pub(crate) fn signed_field_from_mask(solid: &[bool], grid: &UnitCellGrid) -> Vec<f64> {
    let dims = grid.dims();
    let h = grid.voxel_size();
    let void: Vec<bool> = solid.iter().map(|&s| !s).collect();

    let to_solid = squared_edt_3d(solid, dims);
    let to_void = squared_edt_3d(&void, dims);

    to_solid
        .iter()
        .zip(to_void.iter())
        .map(|(&ds, &dv)| (ds.sqrt() - dv.sqrt()) * h)
        .collect()
}
