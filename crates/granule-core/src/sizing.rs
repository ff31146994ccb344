//! Ring and row sizing shared by every generator.
//!
//! Curved and straight extents are discretised with the same two rules so
//! that rings, rows, and shells produced independently agree in density:
//! closed loops use [`ring_count`], open extents use [`segment_count`].
//! Both pick the integer count whose achieved spacing is closest to the
//! requested one, then stretch the spacing to cover the extent exactly.

/// Point count for a closed ring of the given circumference, together
/// with the spacing actually achieved.
///
/// `n = round(C / dl)`, clamped to at least one point. Ties at
/// half-integers round away from zero, so `C = 2.5·dl` gives three
/// points. A circumference below the spacing collapses to a single point
/// rather than failing; this is what turns the innermost shell of a
/// filled shape, or the pole of a sphere, into one particle.
pub fn ring_count(circumference: f64, dl: f64) -> (usize, f64) {
    debug_assert!(dl > 0.0, "spacing must be positive");
    debug_assert!(circumference >= 0.0, "circumference must be non-negative");
    let n = (circumference / dl).round().max(1.0) as usize;
    (n, circumference / n as f64)
}

/// Point count for an open extent sampled inclusively at both ends,
/// together with the step actually achieved.
///
/// `n = round(L / dl) + 1` points; the step is `L / (n - 1)`, or zero for
/// the degenerate single-point case. A 0.01-long extent at `dl = 1e-4`
/// therefore yields 101 points stepped by exactly `1e-4`.
pub fn segment_count(length: f64, dl: f64) -> (usize, f64) {
    debug_assert!(dl > 0.0, "spacing must be positive");
    debug_assert!(length >= 0.0, "length must be non-negative");
    let n = (length / dl).round() as usize + 1;
    let step = if n > 1 { length / (n - 1) as f64 } else { 0.0 };
    (n, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ring_count_picks_closest_integer() {
        let dl = 1e-4;
        for c_over_dl in [1.2, 3.7, 10.0, 63.4, 997.1] {
            let c = c_over_dl * dl;
            let (n, actual) = ring_count(c, dl);
            let err = (actual - dl).abs();
            if n > 1 {
                assert!(err <= (c / (n - 1) as f64 - dl).abs(), "C/dl = {c_over_dl}");
            }
            assert!(err <= (c / (n + 1) as f64 - dl).abs(), "C/dl = {c_over_dl}");
        }
    }

    #[test]
    fn ring_count_half_integer_rounds_up() {
        // Pins the tie rule: C = 2.5 dl must give 3 points, not 2.
        let (n, actual) = ring_count(2.5, 1.0);
        assert_eq!(n, 3);
        assert_relative_eq!(actual, 2.5 / 3.0);
    }

    #[test]
    fn ring_count_degenerate_circumference_gives_one_point() {
        let (n, _) = ring_count(0.3, 1.0);
        assert_eq!(n, 1);
        let (n, actual) = ring_count(0.0, 1.0);
        assert_eq!(n, 1);
        assert_eq!(actual, 0.0);
    }

    #[test]
    fn segment_count_spans_extent_exactly() {
        let (n, step) = segment_count(0.01, 1e-4);
        assert_eq!(n, 101);
        assert_relative_eq!(step, 1e-4);
        assert_relative_eq!(step * (n - 1) as f64, 0.01);
    }

    #[test]
    fn segment_count_stretches_to_fit() {
        // 10.4 spacings round down to 10 intervals, each slightly stretched.
        let (n, step) = segment_count(1.04, 0.1);
        assert_eq!(n, 11);
        assert_relative_eq!(step, 0.104);
    }

    #[test]
    fn segment_count_degenerate_length_gives_one_point() {
        let (n, step) = segment_count(0.04, 0.1);
        assert_eq!(n, 1);
        assert_eq!(step, 0.0);
    }
}
