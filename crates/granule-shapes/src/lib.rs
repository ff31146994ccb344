//! # Granule Shapes
//!
//! Shape generators for the Granule framework. Each generator is a pure
//! function of its geometric parameters and the particle spacing `dl`,
//! returning a [`granule_core::Geometry`] whose points lie on the shape
//! at (very nearly) the requested spacing.
//!
//! Surface, filled, and thick variants of a shape share the surface
//! generator: filled variants add interior shells, thick variants stack
//! offset boundary layers outward. All curved generators size their rings
//! with [`granule_core::sizing`], so rings, rows, and shells produced
//! independently stay mutually consistent in density.
//!
//! ## Conventions
//!
//! - Rectangles and blocks are corner-origin: they span `[0, length] ×
//!   [0, width] (× [0, height])`.
//! - Circles, discs, spheres, and tori are centred on the origin;
//!   cylinders start at the origin and extend along `+axis`.
//! - Thick variants grow outward from the named surface, so the stated
//!   dimensions are inner dimensions.
//! - Planar shapes in the XOY plane come out two-dimensional; everything
//!   else is three-dimensional. Use [`Geometry::shift`] and
//!   [`Geometry::mirror`] to place the result.
//!
//! ## Modules
//!
//! - [`linear`] — Lines, arcs, circles, discs, rings, annuli.
//! - [`planar`] — Rectangles and blocks, filled and thick.
//! - [`revolved`] — Cylinders, tori, spheres, built from rings.
//!
//! [`Geometry::shift`]: granule_core::Geometry::shift
//! [`Geometry::mirror`]: granule_core::Geometry::mirror

pub mod linear;
pub mod planar;
pub mod revolved;
