//! Revolved generators: cylinders, tori, and spheres, composed from
//! rings.
//!
//! Every shape here is a stack of circular rings. Ring point counts
//! always come from [`ring_count`] at the ring's own radius, so the
//! circumferential spacing matches the axial/radial spacing everywhere:
//! a filled cylinder's inner shells carry fewer points than its outer
//! wall, a sphere's polar rings fewer than its equator, and the
//! degenerate zero-radius ring is a single particle on the axis.
//!
//! Tori take an optional angular sub-range along the major circle for
//! partial segments (elbow joints), and an optional per-ring point-count
//! override so a torus elbow can reuse the ring count of the cylinder it
//! mates with.

use nalgebra::Vector3;

use granule_core::sizing::{ring_count, segment_count};
use granule_core::types::{check_extent, check_spacing};
use granule_core::{AngleRange, Axis, Dim, Geometry, GeometryError, Plane};

use std::f64::consts::{PI, TAU};

/// Push one ring of `n` points at `radius` around `centre`, in the plane
/// spanned by the orthonormal pair `(u, v)`.
fn push_ring(
    points: &mut Vec<[f64; 3]>,
    centre: Vector3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
    radius: f64,
    n: usize,
) {
    let step = TAU / n as f64;
    for j in 0..n {
        let theta = j as f64 * step;
        let p = centre + (u * theta.cos() + v * theta.sin()) * radius;
        points.push([p.x, p.y, p.z]);
    }
}

// ── Cylinders ───────────────────────────────────────────────────

/// The lateral surface of a cylinder of radius `r`, starting at the
/// origin and extending `l_axis` along `+axis`.
///
/// Rows of rings are spaced by [`segment_count`] along the axis (both
/// end rings included, so the realised extent is exactly `l_axis`); the
/// per-ring point count comes from [`ring_count`] on the circumference.
pub fn cylinder_side(
    r: f64,
    l_axis: f64,
    dl: f64,
    axis: Axis,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("cylinder radius", r)?;
    check_extent("cylinder axis length", l_axis)?;

    let mut points = Vec::new();
    cylinder_shell(&mut points, r, l_axis, dl, axis);
    Ok(Geometry::new(points, Dim::Three, dl))
}

/// A cylindrical wall: `n_thick` concentric lateral surfaces growing
/// outward from radius `r` in steps of `dl`.
pub fn thick_cylinder_side(
    r: f64,
    l_axis: f64,
    n_thick: usize,
    dl: f64,
    axis: Axis,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("cylinder radius", r)?;
    check_extent("cylinder axis length", l_axis)?;
    if n_thick == 0 {
        return Err(GeometryError::EmptyLayerCount);
    }

    let mut points = Vec::new();
    for layer in 0..n_thick {
        cylinder_shell(&mut points, r + layer as f64 * dl, l_axis, dl, axis);
    }
    Ok(Geometry::new(points, Dim::Three, dl))
}

/// A solid cylinder: every axial row carries a full disc of concentric
/// shells down to the single particle on the axis.
pub fn filled_cylinder(
    r: f64,
    l_axis: f64,
    dl: f64,
    axis: Axis,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("cylinder radius", r)?;
    check_extent("cylinder axis length", l_axis)?;

    let (u, v) = axis.ring_basis();
    let w = axis.unit();
    let (n_rows, row_step) = segment_count(l_axis, dl);
    let (n_shells, dr) = segment_count(r, dl);

    let mut points = Vec::new();
    for k in 0..n_rows {
        let centre = w * (k as f64 * row_step);
        for s in 0..n_shells {
            let radius = s as f64 * dr;
            let (n, _) = ring_count(TAU * radius, dl);
            push_ring(&mut points, centre, u, v, radius, n);
        }
    }
    Ok(Geometry::new(points, Dim::Three, dl))
}

fn cylinder_shell(points: &mut Vec<[f64; 3]>, radius: f64, l_axis: f64, dl: f64, axis: Axis) {
    let (u, v) = axis.ring_basis();
    let w = axis.unit();
    let (n_rows, row_step) = segment_count(l_axis, dl);
    let (n, _) = ring_count(TAU * radius, dl);
    for k in 0..n_rows {
        push_ring(points, w * (k as f64 * row_step), u, v, radius, n);
    }
}

// ── Tori ────────────────────────────────────────────────────────

/// The surface of a torus whose major circle of radius `r_major` lies in
/// `plane`, centred on the origin.
///
/// Stations along the major circle come from [`ring_count`] on the major
/// circumference, or — when `phi_range` restricts the revolution to a
/// partial segment — from [`segment_count`] on the sub-arc, both
/// endpoints inclusive. At each station a minor ring of `n_ring` points
/// (default: [`ring_count`] on the minor circumference) is laid in the
/// plane spanned by the local radial direction and the plane normal.
/// Pass the ring count of an adjoining cylinder as `n_ring` to make a
/// pipe elbow whose particles line up with the straight runs.
pub fn torus_surface(
    r_major: f64,
    r_minor: f64,
    dl: f64,
    plane: Plane,
    phi_range: Option<AngleRange>,
    n_ring: Option<usize>,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("torus major radius", r_major)?;
    check_extent("torus minor radius", r_minor)?;
    let n_minor = minor_ring_count(r_minor, dl, n_ring)?;
    let stations = torus_stations(r_major, phi_range, dl)?;

    let mut points = Vec::new();
    push_torus_shell(&mut points, plane, r_major, r_minor, &stations, n_minor);
    Ok(Geometry::new(points, Dim::Three, dl))
}

/// A torus wall: `n_thick` surfaces growing outward from minor radius
/// `r_minor` in steps of `dl`, each with its own ring count.
pub fn thick_torus_wall(
    r_major: f64,
    r_minor: f64,
    n_thick: usize,
    dl: f64,
    plane: Plane,
    phi_range: Option<AngleRange>,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("torus major radius", r_major)?;
    check_extent("torus minor radius", r_minor)?;
    if n_thick == 0 {
        return Err(GeometryError::EmptyLayerCount);
    }
    let stations = torus_stations(r_major, phi_range, dl)?;

    let mut points = Vec::new();
    for layer in 0..n_thick {
        let radius = r_minor + layer as f64 * dl;
        let (n, _) = ring_count(TAU * radius, dl);
        push_torus_shell(&mut points, plane, r_major, radius, &stations, n);
    }
    Ok(Geometry::new(points, Dim::Three, dl))
}

/// A solid torus: minor shells from the spine circle out to `r_minor`.
pub fn filled_torus(
    r_major: f64,
    r_minor: f64,
    dl: f64,
    plane: Plane,
    phi_range: Option<AngleRange>,
) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("torus major radius", r_major)?;
    check_extent("torus minor radius", r_minor)?;
    let stations = torus_stations(r_major, phi_range, dl)?;
    let (n_shells, dr) = segment_count(r_minor, dl);

    let mut points = Vec::new();
    for s in 0..n_shells {
        let radius = s as f64 * dr;
        let (n, _) = ring_count(TAU * radius, dl);
        push_torus_shell(&mut points, plane, r_major, radius, &stations, n);
    }
    Ok(Geometry::new(points, Dim::Three, dl))
}

fn minor_ring_count(
    r_minor: f64,
    dl: f64,
    n_ring: Option<usize>,
) -> Result<usize, GeometryError> {
    match n_ring {
        Some(0) => Err(GeometryError::InvalidExtent {
            what: "torus ring point count",
            value: 0.0,
        }),
        Some(n) => Ok(n),
        None => Ok(ring_count(TAU * r_minor, dl).0),
    }
}

/// Major-circle station angles, in radians.
fn torus_stations(
    r_major: f64,
    phi_range: Option<AngleRange>,
    dl: f64,
) -> Result<Vec<f64>, GeometryError> {
    let range = phi_range.unwrap_or(AngleRange::FULL);
    range.validate()?;
    let stations = if range.is_full() {
        let (n, _) = ring_count(TAU * r_major, dl);
        let step = TAU / n as f64;
        (0..n).map(|k| range.start_rad() + k as f64 * step).collect()
    } else {
        let (n, _) = segment_count(r_major * range.span_rad(), dl);
        (0..n)
            .map(|k| {
                let t = if n > 1 { k as f64 / (n - 1) as f64 } else { 0.0 };
                range.start_rad() + t * range.span_rad()
            })
            .collect()
    };
    Ok(stations)
}

fn push_torus_shell(
    points: &mut Vec<[f64; 3]>,
    plane: Plane,
    r_major: f64,
    minor_radius: f64,
    stations: &[f64],
    n_minor: usize,
) {
    let (a, b) = plane.basis();
    let (u, v) = (a.unit(), b.unit());
    let w = plane.normal().unit();
    for &phi in stations {
        let e_r = u * phi.cos() + v * phi.sin();
        // Minor ring in the plane spanned by the radial direction and the
        // out-of-plane normal, centred on the spine.
        push_ring(points, e_r * r_major, e_r, w, minor_radius, n_minor);
    }
}

// ── Spheres ─────────────────────────────────────────────────────

/// The surface of a sphere of radius `r` centred on the origin.
///
/// Latitude rings are stationed by [`segment_count`] on the pole-to-pole
/// meridian `πr`; each ring's count comes from [`ring_count`] at its own
/// radius `r·sin θ`, which approximates uniform areal density and
/// collapses the poles to single particles.
pub fn sphere_surface(r: f64, dl: f64) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("sphere radius", r)?;

    let mut points = Vec::new();
    sphere_shell(&mut points, r, dl);
    Ok(Geometry::new(points, Dim::Three, dl))
}

/// A spherical wall: `n_thick` surfaces growing outward from radius `r`.
pub fn thick_sphere(r: f64, n_thick: usize, dl: f64) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("sphere radius", r)?;
    if n_thick == 0 {
        return Err(GeometryError::EmptyLayerCount);
    }

    let mut points = Vec::new();
    for layer in 0..n_thick {
        sphere_shell(&mut points, r + layer as f64 * dl, dl);
    }
    Ok(Geometry::new(points, Dim::Three, dl))
}

/// A solid ball: radial shells from the centre particle out to `r`.
pub fn filled_sphere(r: f64, dl: f64) -> Result<Geometry, GeometryError> {
    check_spacing(dl)?;
    check_extent("sphere radius", r)?;

    let (n_shells, dr) = segment_count(r, dl);
    let mut points = Vec::new();
    for s in 0..n_shells {
        sphere_shell(&mut points, s as f64 * dr, dl);
    }
    Ok(Geometry::new(points, Dim::Three, dl))
}

fn sphere_shell(points: &mut Vec<[f64; 3]>, r: f64, dl: f64) {
    let (u, v) = Axis::Z.ring_basis();
    let (n_lat, _) = segment_count(PI * r, dl);
    for k in 0..n_lat {
        let theta = if n_lat > 1 {
            k as f64 * PI / (n_lat - 1) as f64
        } else {
            0.0
        };
        let radius = r * theta.sin();
        let (n, _) = ring_count(TAU * radius, dl);
        push_ring(points, Vector3::z() * (r * theta.cos()), u, v, radius, n);
    }
}
