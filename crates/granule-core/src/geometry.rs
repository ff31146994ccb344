//! The point-cloud entity produced by every generator and operation.
//!
//! A [`Geometry`] is an ordered set of particle positions with spacing
//! metadata, an optional name tag, and per-point provenance (which named
//! source each point came from). It is immutable once constructed:
//! transforms and set-algebra operations return new instances, which
//! keeps composition safe when the same base cloud feeds several
//! downstream branches.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::index::PointGrid;
use crate::ops;
use crate::types::{Axis, Dim, GeometryError, Plane};

/// An immutable particle cloud.
///
/// The coordinate order is whatever the producing generator emitted and
/// is deterministic for fixed inputs. `region_of` runs parallel to
/// `points` at all times; every filtering operation applies one mask to
/// both, so identity tags can never desynchronise from coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub(crate) points: Vec<[f64; 3]>,
    pub(crate) region_of: Vec<u32>,
    pub(crate) regions: Vec<String>,
    pub(crate) dim: Dim,
    pub(crate) dl: f64,
    pub(crate) name: Option<String>,
}

impl Geometry {
    /// Wrap a point list as a single-region geometry.
    pub fn new(points: Vec<[f64; 3]>, dim: Dim, dl: f64) -> Self {
        let n = points.len();
        Geometry {
            points,
            region_of: vec![0; n],
            regions: vec![String::new()],
            dim,
            dl,
            name: None,
        }
    }

    /// An empty cloud.
    pub fn empty(dim: Dim, dl: f64) -> Self {
        Geometry::new(Vec::new(), dim, dl)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Number of particles.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Nominal particle spacing the cloud was generated for.
    pub fn spacing(&self) -> f64 {
        self.dl
    }

    pub fn dim(&self) -> Dim {
        self.dim
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All particle positions, in emission order.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Coordinates along one axis, in emission order.
    pub fn axis_coords(&self, axis: Axis) -> Vec<f64> {
        let i = axis.index();
        self.points.iter().map(|p| p[i]).collect()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.axis_coords(Axis::X)
    }

    pub fn ys(&self) -> Vec<f64> {
        self.axis_coords(Axis::Y)
    }

    pub fn zs(&self) -> Vec<f64> {
        self.axis_coords(Axis::Z)
    }

    /// Interleaved coordinate buffer for bulk transfer to a simulation
    /// engine: `x0, y0, [z0,] x1, y1, …` with two components per point
    /// for 2-D clouds and three for 3-D.
    pub fn flat_coords(&self) -> Vec<f64> {
        let c = self.dim.components();
        let mut out = Vec::with_capacity(self.points.len() * c);
        for p in &self.points {
            out.extend_from_slice(&p[..c]);
        }
        out
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty cloud.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let mut iter = self.points.iter();
        let first = *iter.next()?;
        let mut lo = first;
        let mut hi = first;
        for p in iter {
            for k in 0..3 {
                lo[k] = lo[k].min(p[k]);
                hi[k] = hi[k].max(p[k]);
            }
        }
        Some((lo, hi))
    }

    /// Realised extent along one axis (zero for empty clouds). This is
    /// how callers recover e.g. the achieved axial length of a cylinder.
    pub fn extent(&self, axis: Axis) -> f64 {
        match self.bounds() {
            Some((lo, hi)) => hi[axis.index()] - lo[axis.index()],
            None => 0.0,
        }
    }

    // ── Identity ────────────────────────────────────────────────

    /// Per-point region index, parallel to [`points`](Self::points) and
    /// to the flattened coordinate buffer.
    pub fn region_ids(&self) -> &[u32] {
        &self.region_of
    }

    /// Names of the originating sub-geometries, indexed by region id.
    pub fn region_names(&self) -> &[String] {
        &self.regions
    }

    /// Region id of the named source, if present.
    pub fn region_index(&self, name: &str) -> Option<u32> {
        self.regions.iter().position(|r| r == name).map(|i| i as u32)
    }

    // ── Transforms ──────────────────────────────────────────────

    /// Tag the cloud with a name. A fresh single-region cloud also gets
    /// its region renamed, so the tag survives later unions.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.regions.len() == 1 {
            self.regions[0] = name.clone();
        }
        self.name = Some(name);
        self
    }

    /// Translate every point. A non-zero `dz` promotes a 2-D cloud to
    /// 3-D.
    pub fn shift(&self, dx: f64, dy: f64, dz: f64) -> Geometry {
        let mut out = self.clone();
        for p in &mut out.points {
            p[0] += dx;
            p[1] += dy;
            p[2] += dz;
        }
        if dz != 0.0 {
            out.dim = Dim::Three;
        }
        out
    }

    /// Reflect every point across `plane` positioned at `position` along
    /// the plane's normal axis. Applying the same mirror twice restores
    /// the original coordinates.
    pub fn mirror(&self, plane: Plane, position: f64) -> Geometry {
        let axis = plane.normal().index();
        let mut out = self.clone();
        for p in &mut out.points {
            p[axis] = 2.0 * position - p[axis];
        }
        // Reflecting a planar cloud out of z = 0 makes it genuinely 3-D.
        if axis == 2 && position != 0.0 {
            out.dim = Dim::Three;
        }
        out
    }

    // ── Set algebra (delegating to `ops`) ───────────────────────

    /// Union with another cloud. See [`ops::union`].
    pub fn union_with(&self, other: &Geometry) -> Geometry {
        ops::union(&[self, other])
    }

    /// Remove every point within `rmax` of some point of `other`. See
    /// [`ops::subtract`].
    pub fn subtract(&self, other: &Geometry, rmax: f64) -> Result<Geometry, GeometryError> {
        ops::subtract(self, other, rmax)
    }

    /// Keep only points within `rmax` of some point of `other`. See
    /// [`ops::intersect`].
    pub fn intersect(&self, other: &Geometry, rmax: f64) -> Result<Geometry, GeometryError> {
        ops::intersect(self, other, rmax)
    }

    /// Keep the points satisfying `keep`. Identity tags follow the same
    /// mask.
    pub fn clip<F>(&self, keep: F) -> Geometry
    where
        F: Fn(&[f64; 3]) -> bool,
    {
        let mask: Vec<bool> = self.points.iter().map(keep).collect();
        self.filtered(&mask)
    }

    /// Keep the points inside the axis-aligned box `[min, max]`
    /// (inclusive).
    pub fn clip_box(&self, min: [f64; 3], max: [f64; 3]) -> Geometry {
        self.clip(|p| (0..3).all(|k| p[k] >= min[k] && p[k] <= max[k]))
    }

    /// Apply a retain-mask to points and identity tags in lockstep.
    pub(crate) fn filtered(&self, mask: &[bool]) -> Geometry {
        debug_assert_eq!(mask.len(), self.points.len());
        let mut out = Geometry {
            points: Vec::new(),
            region_of: Vec::new(),
            regions: self.regions.clone(),
            dim: self.dim,
            dl: self.dl,
            name: self.name.clone(),
        };
        for (i, &keep) in mask.iter().enumerate() {
            if keep {
                out.points.push(self.points[i]);
                out.region_of.push(self.region_of[i]);
            }
        }
        out
    }

    // ── Integrity diagnostics ───────────────────────────────────

    /// Exact nearest-neighbour minimum over the cloud, or `None` with
    /// fewer than two points. This is the quantity a downstream engine
    /// checks against its overlap threshold after ingestion.
    pub fn min_separation(&self) -> Option<f64> {
        if self.points.len() < 2 {
            return None;
        }
        let cell = if self.dl > 0.0 && self.dl.is_finite() { self.dl } else { 1.0 };
        let grid = PointGrid::build(&self.points, cell);
        let mut min: Option<f64> = None;
        for (i, p) in self.points.iter().enumerate() {
            if let Some(d) = grid.nearest_excluding(p, Some(i)) {
                min = Some(min.map_or(d, |m: f64| m.min(d)));
            }
        }
        min
    }

    /// Number of points whose nearest neighbour lies within `threshold`
    /// (the count a consumer would report as an overlap violation).
    pub fn overlap_count(&self, threshold: f64) -> Result<usize, GeometryError> {
        crate::types::check_tolerance(threshold)?;
        if self.points.len() < 2 {
            return Ok(0);
        }
        let grid = PointGrid::build(&self.points, threshold);
        Ok(self
            .points
            .iter()
            .enumerate()
            .filter(|&(i, p)| grid.has_other_within(p, threshold, i))
            .count())
    }
}

impl<'b> Add<&'b Geometry> for &Geometry {
    type Output = Geometry;

    /// `&a + &b` is shorthand for [`ops::union`] of the two clouds.
    fn add(self, rhs: &'b Geometry) -> Geometry {
        ops::union(&[self, rhs])
    }
}

impl Add for Geometry {
    type Output = Geometry;

    fn add(self, rhs: Geometry) -> Geometry {
        ops::union(&[&self, &rhs])
    }
}
