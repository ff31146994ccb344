//! # Granule Core
//!
//! The geometry engine of the Granule framework. This crate builds and
//! composes the discrete point clouds used as initial particle
//! configurations in particle-based solvers (SPH, rheology, DEM).
//!
//! ## Architecture
//!
//! Everything revolves around the [`Geometry`] entity: an immutable point
//! cloud with spacing metadata and per-point provenance. Shape generators
//! (in the companion `granule-shapes` crate) produce `Geometry` values;
//! the operations here combine and filter them. Operations never mutate
//! their inputs — each returns a fresh `Geometry`, so a base cloud can be
//! reused in several downstream compositions.
//!
//! ## Modules
//!
//! - [`types`] — Parameter types (axes, planes, angle ranges) and the
//!   error taxonomy.
//! - [`geometry`] — The `Geometry` entity: storage, queries, transforms.
//! - [`sizing`] — Ring/row sizing shared by every curved generator.
//! - [`index`] — Uniform hash-grid index for nearest-neighbour queries.
//! - [`ops`] — Set algebra: union, subtract, intersect, stack.

pub mod geometry;
pub mod index;
pub mod ops;
pub mod sizing;
pub mod types;

pub use geometry::Geometry;
pub use types::{AngleRange, Axis, Dim, GeometryError, Plane};
