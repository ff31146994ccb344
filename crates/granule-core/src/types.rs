//! Parameter types shared across the Granule framework.
//!
//! These are the structured equivalents of the tokens a caller writes in a
//! seeding script: coordinate axes, coordinate planes, angular sub-ranges
//! for partial revolved shapes, and the error taxonomy every generator and
//! operation reports through.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by shape generators and set-algebra operations.
///
/// Configuration errors are reported at call time, never silently
/// coerced. Degenerate-but-valid geometry (an extent smaller than the
/// spacing) is *not* an error: it clamps to a single point, ring, or row.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("particle spacing must be positive and finite (got {dl})")]
    InvalidSpacing { dl: f64 },

    #[error("{what} must be non-negative and finite (got {value})")]
    InvalidExtent { what: &'static str, value: f64 },

    #[error("angle range must satisfy start < end with a span of at most 360 degrees (got {start_deg}..{end_deg})")]
    InvalidAngleRange { start_deg: f64, end_deg: f64 },

    #[error("overlap tolerance rmax must be positive and finite (got {rmax})")]
    InvalidTolerance { rmax: f64 },

    #[error("thick shapes need at least one particle layer")]
    EmptyLayerCount,
}

/// Validate a particle spacing parameter.
pub fn check_spacing(dl: f64) -> Result<(), GeometryError> {
    if dl > 0.0 && dl.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidSpacing { dl })
    }
}

/// Validate a length/radius parameter. Zero is allowed (degenerate
/// geometry clamps to a single point); negative or non-finite is not.
pub fn check_extent(what: &'static str, value: f64) -> Result<(), GeometryError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidExtent { what, value })
    }
}

/// Validate an overlap tolerance for subtract/intersect.
pub fn check_tolerance(rmax: f64) -> Result<(), GeometryError> {
    if rmax > 0.0 && rmax.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidTolerance { rmax })
    }
}

/// Spatial dimensionality of a point cloud.
///
/// Planar shapes generated in the XOY plane are two-dimensional; any other
/// plane, any revolved shape, or a later out-of-plane shift promotes the
/// cloud to three dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dim {
    Two,
    Three,
}

impl Dim {
    /// Number of coordinate components per point in flattened output.
    pub fn components(self) -> usize {
        match self {
            Dim::Two => 2,
            Dim::Three => 3,
        }
    }

    /// The higher-dimensional of two dimensionalities.
    pub fn max(self, other: Dim) -> Dim {
        if self == Dim::Three || other == Dim::Three {
            Dim::Three
        } else {
            Dim::Two
        }
    }
}

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of this axis in a `[f64; 3]` coordinate.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// Right-handed in-plane basis `(u, v)` for rings perpendicular to
    /// this axis, chosen so `u × v` points along the axis.
    pub fn ring_basis(self) -> (Vector3<f64>, Vector3<f64>) {
        match self {
            Axis::X => (Vector3::y(), Vector3::z()),
            Axis::Y => (Vector3::z(), Vector3::x()),
            Axis::Z => (Vector3::x(), Vector3::y()),
        }
    }
}

/// A coordinate plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plane {
    Xoy,
    Xoz,
    Yoz,
}

impl Plane {
    /// The axis normal to this plane.
    pub fn normal(self) -> Axis {
        match self {
            Plane::Xoy => Axis::Z,
            Plane::Xoz => Axis::Y,
            Plane::Yoz => Axis::X,
        }
    }

    /// The two in-plane axes `(u, v)`, in the order the plane is named:
    /// an angle of 0° points along `u`, 90° along `v`.
    pub fn basis(self) -> (Axis, Axis) {
        match self {
            Plane::Xoy => (Axis::X, Axis::Y),
            Plane::Xoz => (Axis::X, Axis::Z),
            Plane::Yoz => (Axis::Y, Axis::Z),
        }
    }

    /// Embed in-plane coordinates `(u, v)` as a 3-D point with zero
    /// out-of-plane component.
    pub fn embed(self, u: f64, v: f64) -> [f64; 3] {
        let (a, b) = self.basis();
        let mut p = [0.0; 3];
        p[a.index()] = u;
        p[b.index()] = v;
        p
    }
}

/// Angular sub-range for partial revolved shapes, in degrees.
///
/// `start_deg` must lie strictly below `end_deg` and the span must not
/// exceed 360°. A range spanning a full turn is sampled as a closed ring
/// (start inclusive, end exclusive); any partial range is sampled as an
/// open arc with both endpoints inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub start_deg: f64,
    pub end_deg: f64,
}

impl AngleRange {
    /// The full turn, `0°..360°`.
    pub const FULL: AngleRange = AngleRange {
        start_deg: 0.0,
        end_deg: 360.0,
    };

    /// Construct a validated range.
    pub fn new(start_deg: f64, end_deg: f64) -> Result<Self, GeometryError> {
        let range = AngleRange { start_deg, end_deg };
        range.validate()?;
        Ok(range)
    }

    /// Re-check the range invariants (fields are public, so a generator
    /// validates again at the call boundary).
    pub fn validate(&self) -> Result<(), GeometryError> {
        let ok = self.start_deg.is_finite()
            && self.end_deg.is_finite()
            && self.start_deg < self.end_deg
            && self.span_deg() <= 360.0 + 1e-9;
        if ok {
            Ok(())
        } else {
            Err(GeometryError::InvalidAngleRange {
                start_deg: self.start_deg,
                end_deg: self.end_deg,
            })
        }
    }

    pub fn span_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    pub fn start_rad(&self) -> f64 {
        self.start_deg.to_radians()
    }

    pub fn span_rad(&self) -> f64 {
        self.span_deg().to_radians()
    }

    /// Whether the range covers a full turn (to within a degree-scale
    /// rounding slack).
    pub fn is_full(&self) -> bool {
        (self.span_deg() - 360.0).abs() < 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_basis_follows_name_order() {
        assert_eq!(Plane::Xoy.basis(), (Axis::X, Axis::Y));
        assert_eq!(Plane::Xoz.basis(), (Axis::X, Axis::Z));
        assert_eq!(Plane::Yoz.basis(), (Axis::Y, Axis::Z));
        for plane in [Plane::Xoy, Plane::Xoz, Plane::Yoz] {
            let (a, b) = plane.basis();
            assert_ne!(a, plane.normal());
            assert_ne!(b, plane.normal());
        }
    }

    #[test]
    fn ring_basis_is_right_handed() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let (u, v) = axis.ring_basis();
            assert_eq!(u.cross(&v), axis.unit(), "{axis:?}");
        }
    }

    #[test]
    fn embed_places_components_on_plane_axes() {
        assert_eq!(Plane::Xoy.embed(1.0, 2.0), [1.0, 2.0, 0.0]);
        assert_eq!(Plane::Xoz.embed(1.0, 2.0), [1.0, 0.0, 2.0]);
        assert_eq!(Plane::Yoz.embed(1.0, 2.0), [0.0, 1.0, 2.0]);
    }

    #[test]
    fn angle_range_rejects_inverted_and_oversized() {
        assert!(AngleRange::new(90.0, 90.0).is_err());
        assert!(AngleRange::new(270.0, 180.0).is_err());
        assert!(AngleRange::new(0.0, 361.0).is_err());
        assert!(AngleRange::new(f64::NAN, 90.0).is_err());
    }

    #[test]
    fn angle_range_accepts_partial_and_full() {
        let quarter = AngleRange::new(180.0, 270.0).unwrap();
        assert!(!quarter.is_full());
        assert_eq!(quarter.span_deg(), 90.0);
        assert!(AngleRange::FULL.is_full());
    }

    #[test]
    fn serde_tokens_match_script_spelling() {
        let plane: Plane = serde_json::from_str("\"XOY\"").unwrap();
        assert_eq!(plane, Plane::Xoy);
        let axis: Axis = serde_json::from_str("\"z\"").unwrap();
        assert_eq!(axis, Axis::Z);
    }
}
