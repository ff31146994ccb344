//! Linear and circular generators: lines, arcs, rings, discs, annuli.
//!
//! These are the 2-D workhorses of a seeding script (dam walls, fluid
//! columns, pipe cross-sections) and the building blocks the revolved
//! generators compose into 3-D shapes.

use granule_core::sizing::{ring_count, segment_count};
use granule_core::types::{check_extent, check_spacing};
use granule_core::{AngleRange, Dim, Geometry, GeometryError, Plane};

fn plane_dim(plane: Plane) -> Dim {
    if plane == Plane::Xoy {
        Dim::Two
    } else {
        Dim::Three
    }
}

/// Push one closed ring of `n` points at `radius` around the in-plane
/// origin, starting at `start` radians. A zero radius collapses to the
/// centre point.
fn push_plane_ring(
    points: &mut Vec<[f64; 3]>,
    plane: Plane,
    radius: f64,
    n: usize,
    start: f64,
) {
    let step = std::f64::consts::TAU / n as f64;
    for j in 0..n {
        let theta = start + j as f64 * step;
        points.push(plane.embed(radius * theta.cos(), radius * theta.sin()));
    }
}

/// Evenly spaced points along the segment from `start` to `end`, both
/// endpoints included.
pub fn line(start: [f64; 3], end: [f64; 3], dl: f64) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    let delta = [end[0] - start[0], end[1] - start[1], end[2] - start[2]];
    let length = (delta[0] * delta[0] + delta[1] * delta[1] + delta[2] * delta[2]).sqrt();
    check_extent("line length", length)?;

    let (n, _) = segment_count(length, dl);
    let mut points = Vec::with_capacity(n);
    for k in 0..n {
        let t = if n > 1 { k as f64 / (n - 1) as f64 } else { 0.0 };
        points.push([
            start[0] + t * delta[0],
            start[1] + t * delta[1],
            start[2] + t * delta[2],
        ]);
    }
    let dim = if start[2] == 0.0 && end[2] == 0.0 {
        Dim::Two
    } else {
        Dim::Three
    };
    Ok(Geometry::new(points, dim, dl))
}

/// A line together with its mirror image about `plane` at `position`,
/// as a single geometry. Handy for symmetric channel walls.
pub fn symm_lines(
    start: [f64; 3],
    end: [f64; 3],
    dl: f64,
    plane: Plane,
    position: f64,
) -> Result<Geometry, GeometryError> {
    let base = line(start, end, dl)?;
    let mirrored = base.mirror(plane, position);
    let mut points = base.points().to_vec();
    points.extend_from_slice(mirrored.points());
    Ok(Geometry::new(points, base.dim().max(mirrored.dim()), dl))
}

/// Evenly spaced angular samples on a circular arc of radius `r`.
///
/// A full 360° range is sampled as a closed ring sized by
/// [`ring_count`]; a partial range as an open arc (both endpoints
/// inclusive) sized by [`segment_count`] on the arc length.
pub fn arc(r: f64, range: AngleRange, dl: f64, plane: Plane) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("arc radius", r)?;
    range.validate()?;

    let mut points = Vec::new();
    if range.is_full() {
        let (n, _) = ring_count(std::f64::consts::TAU * r, dl);
        push_plane_ring(&mut points, plane, r, n, range.start_rad());
    } else {
        let (n, _) = segment_count(r * range.span_rad(), dl);
        for k in 0..n {
            let t = if n > 1 { k as f64 / (n - 1) as f64 } else { 0.0 };
            let theta = range.start_rad() + t * range.span_rad();
            points.push(plane.embed(r * theta.cos(), r * theta.sin()));
        }
    }
    Ok(Geometry::new(points, plane_dim(plane), dl))
}

/// A closed ring of radius `r`, its point count sized by [`ring_count`]
/// on the circumference `2πr`.
pub fn circle(r: f64, dl: f64, plane: Plane) -> Result<Geometry, GeometryError> {
    arc(r, AngleRange::FULL, dl, plane)
}

/// A solid disc: concentric rings from the centre point out to `r`, each
/// ring's count recomputed at its own radius so the spacing stays
/// uniform radially as well as circumferentially.
pub fn filled_circle(r: f64, dl: f64, plane: Plane) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("disc radius", r)?;

    let (n_shells, dr) = segment_count(r, dl);
    let mut points = Vec::new();
    for s in 0..n_shells {
        let radius = s as f64 * dr;
        let (n, _) = ring_count(std::f64::consts::TAU * radius, dl);
        push_plane_ring(&mut points, plane, radius, n, 0.0);
    }
    Ok(Geometry::new(points, plane_dim(plane), dl))
}

/// A multi-layer ring: `n_thick` concentric rings growing outward from
/// radius `r` in steps of `dl`. The wall counterpart of [`circle`].
pub fn thick_ring(
    r: f64,
    n_thick: usize,
    dl: f64,
    plane: Plane,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("ring radius", r)?;
    if n_thick == 0 {
        return Err(GeometryError::EmptyLayerCount);
    }

    let mut points = Vec::new();
    for layer in 0..n_thick {
        let radius = r + layer as f64 * dl;
        let (n, _) = ring_count(std::f64::consts::TAU * radius, dl);
        push_plane_ring(&mut points, plane, radius, n, 0.0);
    }
    Ok(Geometry::new(points, plane_dim(plane), dl))
}

/// A filled annulus centred on the origin: rings at every radius within
/// `r_minor` of `r_major`. This is the 2-D cross-section analogue of the
/// filled torus.
pub fn torus2d(
    r_major: f64,
    r_minor: f64,
    dl: f64,
    plane: Plane,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("annulus major radius", r_major)?;
    check_extent("annulus minor radius", r_minor)?;
    check_extent("annulus inner radius", r_major - r_minor)?;

    let (n_shells, dr) = segment_count(r_minor, dl);
    let mut points = Vec::new();
    for s in -(n_shells as i64 - 1)..=(n_shells as i64 - 1) {
        let radius = r_major + s as f64 * dr;
        let (n, _) = ring_count(std::f64::consts::TAU * radius, dl);
        push_plane_ring(&mut points, plane, radius, n, 0.0);
    }
    Ok(Geometry::new(points, plane_dim(plane), dl))
}
