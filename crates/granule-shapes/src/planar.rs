//! Rectangles and blocks: regular grids, filled or as multi-layer walls.
//!
//! Grids are corner-origin with `round(extent/dl) + 1` points per axis.
//! Thick variants wrap the stated (inner) box in `n_thick` boundary
//! layers, layer `k` being the boundary grid of the box grown by `k·dl`
//! on every side, so a wall built around a fluid box leaves the box
//! itself untouched.

use granule_core::sizing::segment_count;
use granule_core::types::{check_extent, check_spacing};
use granule_core::{Dim, Geometry, GeometryError, Plane};

/// Grid over `[u0, u0+lu] × [v0, v0+lv]` in `plane`; `boundary_only`
/// keeps just the outline.
fn plane_grid(
    points: &mut Vec<[f64; 3]>,
    plane: Plane,
    origin: (f64, f64),
    extents: (f64, f64),
    dl: f64,
    boundary_only: bool,
) {
    let (nu, su) = segment_count(extents.0, dl);
    let (nv, sv) = segment_count(extents.1, dl);
    for i in 0..nu {
        for j in 0..nv {
            if boundary_only && i != 0 && i != nu - 1 && j != 0 && j != nv - 1 {
                continue;
            }
            points.push(plane.embed(origin.0 + i as f64 * su, origin.1 + j as f64 * sv));
        }
    }
}

fn rect_checked(
    length: f64,
    width: f64,
    dl: f64,
) -> Result<(), GeometryError> {
    check_spacing(dl)?;
    check_extent("rectangle length", length)?;
    check_extent("rectangle width", width)?;
    Ok(())
}

/// The outline of a `length × width` rectangle spanning `[0, length] ×
/// [0, width]`.
pub fn rectangle(
    length: f64,
    width: f64,
    dl: f64,
    plane: Plane,
) -> Result<Geometry, GeometryError> {
    rect_checked(length, width, dl)?;
    let mut points = Vec::new();
    plane_grid(&mut points, plane, (0.0, 0.0), (length, width), dl, true);
    Ok(Geometry::new(points, plane_dim(plane), dl))
}

/// A solid `length × width` grid: `round(length/dl)+1` by
/// `round(width/dl)+1` points.
pub fn filled_rectangle(
    length: f64,
    width: f64,
    dl: f64,
    plane: Plane,
) -> Result<Geometry, GeometryError> {
    rect_checked(length, width, dl)?;
    let mut points = Vec::new();
    plane_grid(&mut points, plane, (0.0, 0.0), (length, width), dl, false);
    Ok(Geometry::new(points, plane_dim(plane), dl))
}

/// A rectangular wall: `n_thick` outline layers growing outward from the
/// stated inner `length × width` box.
pub fn thick_rectangle(
    length: f64,
    width: f64,
    n_thick: usize,
    dl: f64,
    plane: Plane,
) -> Result<Geometry, GeometryError> {
    rect_checked(length, width, dl)?;
    if n_thick == 0 {
        return Err(GeometryError::EmptyLayerCount);
    }
    let mut points = Vec::new();
    for k in 0..n_thick {
        let pad = k as f64 * dl;
        plane_grid(
            &mut points,
            plane,
            (-pad, -pad),
            (length + 2.0 * pad, width + 2.0 * pad),
            dl,
            true,
        );
    }
    Ok(Geometry::new(points, plane_dim(plane), dl))
}

/// A solid `lx × ly × lz` grid spanning `[0, lx] × [0, ly] × [0, lz]`.
pub fn block(lx: f64, ly: f64, lz: f64, dl: f64) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("block x extent", lx)?;
    check_extent("block y extent", ly)?;
    check_extent("block z extent", lz)?;
    let mut points = Vec::new();
    box_grid(&mut points, (0.0, 0.0, 0.0), (lx, ly, lz), dl, false);
    Ok(Geometry::new(points, Dim::Three, dl))
}

/// A box wall: `n_thick` shells growing outward from the stated inner
/// box, each shell the boundary of the grid over the grown box.
pub fn thick_block_wall(
    lx: f64,
    ly: f64,
    lz: f64,
    n_thick: usize,
    dl: f64,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("block x extent", lx)?;
    check_extent("block y extent", ly)?;
    check_extent("block z extent", lz)?;
    if n_thick == 0 {
        return Err(GeometryError::EmptyLayerCount);
    }
    let mut points = Vec::new();
    for k in 0..n_thick {
        let pad = k as f64 * dl;
        box_grid(
            &mut points,
            (-pad, -pad, -pad),
            (lx + 2.0 * pad, ly + 2.0 * pad, lz + 2.0 * pad),
            dl,
            true,
        );
    }
    Ok(Geometry::new(points, Dim::Three, dl))
}

fn box_grid(
    points: &mut Vec<[f64; 3]>,
    origin: (f64, f64, f64),
    extents: (f64, f64, f64),
    dl: f64,
    boundary_only: bool,
) {
    let (nx, sx) = segment_count(extents.0, dl);
    let (ny, sy) = segment_count(extents.1, dl);
    let (nz, sz) = segment_count(extents.2, dl);
    for i in 0..nx {
        for j in 0..ny {
            for h in 0..nz {
                if boundary_only
                    && i != 0
                    && i != nx - 1
                    && j != 0
                    && j != ny - 1
                    && h != 0
                    && h != nz - 1
                {
                    continue;
                }
                points.push([
                    origin.0 + i as f64 * sx,
                    origin.1 + j as f64 * sy,
                    origin.2 + h as f64 * sz,
                ]);
            }
        }
    }
}

fn plane_dim(plane: Plane) -> Dim {
    if plane == Plane::Xoy {
        Dim::Two
    } else {
        Dim::Three
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use granule_core::Axis;

    #[test]
    fn filled_rectangle_grid_counts() {
        // The dam-break box: 0.01 × 0.006 at 1e-4 spacing is a 101 × 61 grid.
        let g = filled_rectangle(0.01, 0.006, 1e-4, Plane::Xoy).unwrap();
        assert_eq!(g.size(), 101 * 61);
        assert_eq!(g.dim(), Dim::Two);
        assert_relative_eq!(g.extent(Axis::X), 0.01, max_relative = 1e-12);
        assert_relative_eq!(g.extent(Axis::Y), 0.006, max_relative = 1e-12);
    }

    #[test]
    fn rectangle_is_the_grid_boundary() {
        let g = rectangle(0.4, 0.3, 0.1, Plane::Xoy).unwrap();
        // 5 × 4 grid boundary: 2·5 + 2·4 − 4 corners counted once.
        assert_eq!(g.size(), 14);
    }

    #[test]
    fn degenerate_extents_clamp_to_single_rows() {
        assert_eq!(filled_rectangle(0.0, 0.3, 0.1, Plane::Xoy).unwrap().size(), 4);
        assert_eq!(filled_rectangle(0.0, 0.0, 0.1, Plane::Xoy).unwrap().size(), 1);
    }

    #[test]
    fn thick_rectangle_layer_counts() {
        // The dam-break wall: two layers around the 0.01 × 0.006 box.
        let g = thick_rectangle(0.01, 0.006, 2, 1e-4, Plane::Xoy).unwrap();
        let layer0 = 2 * 101 + 2 * 61 - 4;
        let layer1 = 2 * 103 + 2 * 63 - 4;
        assert_eq!(g.size(), layer0 + layer1);
        // Inner box untouched, outer bound grown by one spacing.
        let (lo, hi) = g.bounds().unwrap();
        assert_relative_eq!(lo[0], -1e-4, max_relative = 1e-12);
        assert_relative_eq!(hi[1], 0.0061, max_relative = 1e-12);
        assert!(thick_rectangle(0.01, 0.006, 0, 1e-4, Plane::Xoy).is_err());
    }

    #[test]
    fn thick_rectangle_single_layer_is_the_outline() {
        let wall = thick_rectangle(0.4, 0.3, 1, 0.1, Plane::Xoy).unwrap();
        let outline = rectangle(0.4, 0.3, 0.1, Plane::Xoy).unwrap();
        assert_eq!(wall.points(), outline.points());
    }

    #[test]
    fn block_grid_counts() {
        let g = block(0.2, 0.3, 0.4, 0.1).unwrap();
        assert_eq!(g.size(), 3 * 4 * 5);
        assert_eq!(g.dim(), Dim::Three);
    }

    #[test]
    fn thick_block_wall_shell_counts() {
        let g = thick_block_wall(0.2, 0.2, 0.2, 2, 0.1).unwrap();
        // 3³ boundary plus 5³ − 3³ for the grown shell.
        assert_eq!(g.size(), (27 - 1) + (125 - 27));
        assert!(thick_block_wall(0.2, 0.2, 0.2, 0, 0.1).is_err());
    }

    #[test]
    fn wall_spacing_is_uniform() {
        let g = thick_rectangle(0.01, 0.006, 2, 1e-4, Plane::Xoy).unwrap();
        let sep = g.min_separation().unwrap();
        assert!(sep >= 0.95e-4 && sep <= 1.05e-4, "sep = {sep}");
    }

    #[test]
    fn generators_reject_bad_parameters() {
        assert!(filled_rectangle(-0.1, 0.3, 0.1, Plane::Xoy).is_err());
        assert!(block(0.1, 0.1, f64::INFINITY, 0.1).is_err());
        assert!(rectangle(0.1, 0.1, -0.1, Plane::Xoy).is_err());
    }
}
