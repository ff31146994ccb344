//! Uniform hash-grid index for nearest-neighbour queries.
//!
//! Subtract/intersect must decide, for every point of one cloud, whether
//! the other cloud has a point within `rmax`. Clouds reach millions of
//! points at fine spacings, so the pairwise scan is replaced by a bucket
//! grid: points are hashed into cubic cells no smaller than the query
//! radius, and a query inspects only the 3×3×3 block of cells around the
//! probe point. The grid is built once per operation call.

use std::collections::HashMap;

/// Hash grid over a borrowed point slice.
pub struct PointGrid<'a> {
    cell: f64,
    buckets: HashMap<(i64, i64, i64), Vec<usize>>,
    points: &'a [[f64; 3]],
    /// Cell-index bounding box of the occupied cells, `None` when empty.
    key_bounds: Option<((i64, i64, i64), (i64, i64, i64))>,
}

fn dist2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

impl<'a> PointGrid<'a> {
    /// Build a grid with the given cell size. Queries up to `cell` in
    /// radius are answered exactly.
    pub fn build(points: &'a [[f64; 3]], cell: f64) -> Self {
        debug_assert!(cell > 0.0 && cell.is_finite(), "cell size must be positive");
        let mut buckets: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        let mut key_bounds: Option<((i64, i64, i64), (i64, i64, i64))> = None;
        for (i, p) in points.iter().enumerate() {
            let key = Self::key(p, cell);
            buckets.entry(key).or_default().push(i);
            key_bounds = Some(match key_bounds {
                None => (key, key),
                Some((lo, hi)) => (
                    (lo.0.min(key.0), lo.1.min(key.1), lo.2.min(key.2)),
                    (hi.0.max(key.0), hi.1.max(key.1), hi.2.max(key.2)),
                ),
            });
        }
        PointGrid { cell, buckets, points, key_bounds }
    }

    fn key(p: &[f64; 3], cell: f64) -> (i64, i64, i64) {
        (
            (p[0] / cell).floor() as i64,
            (p[1] / cell).floor() as i64,
            (p[2] / cell).floor() as i64,
        )
    }

    /// Whether any indexed point lies within `r` of `p` (inclusive).
    /// `r` must not exceed the cell size the grid was built with.
    pub fn has_neighbour_within(&self, p: &[f64; 3], r: f64) -> bool {
        self.probe(p, r, None)
    }

    /// Like [`has_neighbour_within`](Self::has_neighbour_within), but
    /// ignoring the indexed point `exclude` (for self-queries).
    pub fn has_other_within(&self, p: &[f64; 3], r: f64, exclude: usize) -> bool {
        self.probe(p, r, Some(exclude))
    }

    fn probe(&self, p: &[f64; 3], r: f64, exclude: Option<usize>) -> bool {
        debug_assert!(
            r <= self.cell * (1.0 + 1e-12),
            "query radius exceeds grid cell size"
        );
        let r2 = r * r;
        let (kx, ky, kz) = Self::key(p, self.cell);
        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                for dz in -1..=1i64 {
                    let Some(bucket) = self.buckets.get(&(kx + dx, ky + dy, kz + dz)) else {
                        continue;
                    };
                    for &j in bucket {
                        if Some(j) == exclude {
                            continue;
                        }
                        if dist2(&self.points[j], p) <= r2 {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Distance from `p` to the nearest indexed point other than
    /// `exclude`, or `None` if the index holds no other point.
    ///
    /// Searches outward in cube shells of cells; once a candidate is
    /// found, only the shells that could still hold a closer point are
    /// visited. A point in shell `k + 1` lies further than `k` cells from
    /// the probe, so the search stops as soon as the best distance drops
    /// below that bound.
    pub fn nearest_excluding(&self, p: &[f64; 3], exclude: Option<usize>) -> Option<f64> {
        let (kx, ky, kz) = Self::key(p, self.cell);
        let mut best: Option<f64> = None;
        let mut shell: i64 = 0;
        // The grid is finite; bound the walk by the furthest occupied cell.
        let (lo, hi) = self.key_bounds?;
        let max_shell = [
            (lo.0 - kx).abs().max((hi.0 - kx).abs()),
            (lo.1 - ky).abs().max((hi.1 - ky).abs()),
            (lo.2 - kz).abs().max((hi.2 - kz).abs()),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        while shell <= max_shell {
            // Shells 0..shell have been visited; anything in shell `s` or
            // beyond lies further than `(s - 1) · cell` from the probe.
            if let Some(b) = best {
                if shell > 0 && b <= (shell - 1) as f64 * self.cell {
                    break;
                }
            }
            for (dx, dy, dz) in ShellIter::new(shell) {
                let Some(bucket) = self.buckets.get(&(kx + dx, ky + dy, kz + dz)) else {
                    continue;
                };
                for &j in bucket {
                    if Some(j) == exclude {
                        continue;
                    }
                    let d2 = dist2(&self.points[j], p);
                    if best.map_or(true, |b| d2 < b * b) {
                        best = Some(d2.sqrt());
                    }
                }
            }
            shell += 1;
        }
        best
    }
}

/// Iterator over the cell offsets whose Chebyshev distance equals `shell`.
struct ShellIter {
    shell: i64,
    dx: i64,
    dy: i64,
    dz: i64,
    done: bool,
}

impl ShellIter {
    fn new(shell: i64) -> Self {
        ShellIter { shell, dx: -shell, dy: -shell, dz: -shell, done: false }
    }

    fn on_shell(&self) -> bool {
        self.dx.abs().max(self.dy.abs()).max(self.dz.abs()) == self.shell
    }

    fn advance(&mut self) {
        self.dz += 1;
        if self.dz > self.shell {
            self.dz = -self.shell;
            self.dy += 1;
            if self.dy > self.shell {
                self.dy = -self.shell;
                self.dx += 1;
                if self.dx > self.shell {
                    self.done = true;
                }
            }
        }
    }
}

impl Iterator for ShellIter {
    type Item = (i64, i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let offset = (self.dx, self.dy, self.dz);
            let hit = self.on_shell();
            self.advance();
            if hit {
                return Some(offset);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic scattered cloud, no two points deliberately close.
    fn scattered(n: usize) -> Vec<[f64; 3]> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                [
                    (t * 0.734).sin() * 3.0,
                    (t * 1.271).cos() * 3.0,
                    (t * 0.389).sin() * (t * 0.113).cos() * 3.0,
                ]
            })
            .collect()
    }

    fn brute_nearest(points: &[[f64; 3]], p: &[f64; 3], exclude: Option<usize>) -> Option<f64> {
        points
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != exclude)
            .map(|(_, q)| dist2(q, p).sqrt())
            .min_by(|a, b| a.total_cmp(b))
    }

    #[test]
    fn probe_matches_brute_force() {
        let points = scattered(200);
        let r = 0.25;
        let grid = PointGrid::build(&points, r);
        for (i, p) in points.iter().enumerate() {
            let brute = brute_nearest(&points, p, Some(i)).unwrap() <= r;
            assert_eq!(grid.has_other_within(p, r, i), brute, "point {i}");
        }
    }

    #[test]
    fn probe_is_inclusive_at_the_radius() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let grid = PointGrid::build(&points, 1.0);
        assert!(grid.has_other_within(&points[0], 1.0, 0));
        assert!(!grid.has_other_within(&points[0], 0.999, 0));
    }

    #[test]
    fn nearest_matches_brute_force() {
        let points = scattered(150);
        let grid = PointGrid::build(&points, 0.2);
        for (i, p) in points.iter().enumerate() {
            let expected = brute_nearest(&points, p, Some(i)).unwrap();
            let got = grid.nearest_excluding(p, Some(i)).unwrap();
            assert!((got - expected).abs() < 1e-12, "point {i}: {got} vs {expected}");
        }
    }

    #[test]
    fn nearest_on_singleton_index_is_none() {
        let points = vec![[1.0, 2.0, 3.0]];
        let grid = PointGrid::build(&points, 0.5);
        assert_eq!(grid.nearest_excluding(&points[0], Some(0)), None);
    }

    #[test]
    fn nearest_crosses_many_empty_shells() {
        let points = vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
        let grid = PointGrid::build(&points, 0.1);
        let d = grid.nearest_excluding(&points[0], Some(0)).unwrap();
        assert!((d - 10.0).abs() < 1e-12);
    }
}
