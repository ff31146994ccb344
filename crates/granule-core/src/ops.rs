//! Set algebra over point clouds.
//!
//! All operations are pure: inputs are borrowed immutably and a fresh
//! [`Geometry`] is returned. Proximity-based operations (subtract,
//! intersect) run against the hash grid in [`crate::index`] so that large
//! clouds are never compared all-pairs. Empty inputs flow through as
//! empty outputs; an invalid tolerance is a configuration error.

use log::debug;

use crate::geometry::Geometry;
use crate::index::PointGrid;
use crate::types::{check_tolerance, Dim, GeometryError};

/// Concatenate several clouds into one, preserving the provenance of
/// every point for later identity queries.
///
/// Each input contributes its own region table; nested composites are
/// spliced through, so a union of unions stays flat. Points are not
/// deduplicated — overlapping sources should be resolved with
/// [`subtract`] before or after the merge.
pub fn union(parts: &[&Geometry]) -> Geometry {
    let dim = parts
        .iter()
        .map(|g| g.dim())
        .fold(Dim::Two, Dim::max);
    let dl = parts.first().map_or(0.0, |g| g.spacing());
    let total: usize = parts.iter().map(|g| g.size()).sum();

    let mut points = Vec::with_capacity(total);
    let mut region_of = Vec::with_capacity(total);
    let mut regions = Vec::new();
    for g in parts {
        let base = regions.len() as u32;
        regions.extend(g.region_names().iter().cloned());
        points.extend_from_slice(g.points());
        region_of.extend(g.region_ids().iter().map(|&r| base + r));
    }

    debug!("union: {} parts, {} points, {} regions", parts.len(), total, regions.len());
    Geometry {
        points,
        region_of,
        regions: if regions.is_empty() { vec![String::new()] } else { regions },
        dim,
        dl,
        name: None,
    }
}

/// [`union`] with a name tag on the result.
pub fn union_named(parts: &[&Geometry], name: impl Into<String>) -> Geometry {
    let mut out = union(parts);
    out.name = Some(name.into());
    out
}

/// Remove every point of `a` whose distance to some point of `b` is at
/// most `rmax`; the remaining points of `a` keep their order and
/// identity tags.
///
/// `rmax` is the caller's overlap threshold, typically a small fraction
/// of the spacing: too large erases legitimate boundary particles, too
/// small leaves true duplicates behind.
pub fn subtract(a: &Geometry, b: &Geometry, rmax: f64) -> Result<Geometry, GeometryError> {
    let mask = proximity_mask(a, b, rmax)?;
    let kept = a.filtered(&mask.iter().map(|&near| !near).collect::<Vec<_>>());
    debug!(
        "subtract: kept {} of {} points (rmax = {rmax:e})",
        kept.size(),
        a.size()
    );
    Ok(kept)
}

/// Keep only the points of `a` within `rmax` of some point of `b` — the
/// exact complement of [`subtract`], so together they partition `a`.
pub fn intersect(a: &Geometry, b: &Geometry, rmax: f64) -> Result<Geometry, GeometryError> {
    let mask = proximity_mask(a, b, rmax)?;
    let kept = a.filtered(&mask);
    debug!(
        "intersect: kept {} of {} points (rmax = {rmax:e})",
        kept.size(),
        a.size()
    );
    Ok(kept)
}

/// For each point of `a`: does `b` hold a point within `rmax`?
fn proximity_mask(a: &Geometry, b: &Geometry, rmax: f64) -> Result<Vec<bool>, GeometryError> {
    check_tolerance(rmax)?;
    if b.is_empty() {
        return Ok(vec![false; a.size()]);
    }
    let grid = PointGrid::build(b.points(), rmax);
    Ok(a.points()
        .iter()
        .map(|p| grid.has_neighbour_within(p, rmax))
        .collect())
}

/// Concatenate `n_layers` copies of `base`, copy `k` shifted by
/// `k · step`. This is how thick walls are assembled from a single
/// boundary layer. Zero layers yield an empty cloud.
pub fn stack(base: &Geometry, n_layers: usize, step: [f64; 3]) -> Geometry {
    let mut out = Geometry {
        points: Vec::with_capacity(base.size() * n_layers),
        region_of: Vec::with_capacity(base.size() * n_layers),
        regions: base.region_names().to_vec(),
        dim: if step[2] != 0.0 && n_layers > 1 { Dim::Three } else { base.dim() },
        dl: base.spacing(),
        name: base.name().map(str::to_owned),
    };
    for k in 0..n_layers {
        let f = k as f64;
        for p in base.points() {
            out.points.push([p[0] + f * step[0], p[1] + f * step[1], p[2] + f * step[2]]);
        }
        out.region_of.extend_from_slice(base.region_ids());
    }
    out
}
