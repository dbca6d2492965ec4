//! Cubic Bezier math: evaluation, bounds, length.

use glam::dvec2;

use crate::defaults::{FIX_ERROR_SCALE, ROOT_EPSILON};
use crate::types::{Point, Rect};

/// Abscissae of the 12-point Gauss-Legendre rule on [-1, 1].
const GAUSS_T: [f64; 12] = [
    -0.1252, 0.1252, -0.3678, 0.3678, -0.5873, 0.5873, -0.7699, 0.7699, -0.9041, 0.9041, -0.9816,
    0.9816,
];
/// Weights matching [`GAUSS_T`].
const GAUSS_C: [f64; 12] = [
    0.2491, 0.2491, 0.2335, 0.2335, 0.2032, 0.2032, 0.1601, 0.1601, 0.1069, 0.1069, 0.0472,
    0.0472,
];

/// Round away accumulated floating error (to 1e-11).
#[inline]
pub fn fix_error(v: f64) -> f64 {
    (v * FIX_ERROR_SCALE).round() / FIX_ERROR_SCALE
}

/// A cubic Bezier segment in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub c1: Point,
    pub c2: Point,
    pub p1: Point,
}

impl CubicBezier {
    pub const fn new(p0: Point, c1: Point, c2: Point, p1: Point) -> Self {
        CubicBezier { p0, c1, c2, p1 }
    }

    /// A straight segment with control points on its endpoints.
    pub const fn line(from: Point, to: Point) -> Self {
        CubicBezier::new(from, from, to, to)
    }

    /// True when both control points sit on their adjacent endpoints.
    ///
    /// Such a curve is flattened to a single polyline segment.
    pub fn is_straight(&self) -> bool {
        self.p0 == self.c1 && self.c2 == self.p1
    }

    /// Point at parameter `t`, with tiny floating residue rounded away.
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        let p = self.p0 * a + self.c1 * b + self.c2 * c + self.p1 * d;
        dvec2(fix_error(p.x), fix_error(p.y))
    }

    /// First derivative at `t`.
    pub fn derivative(&self, t: f64) -> Point {
        dvec2(
            derivative_1d(t, self.p0.x, self.c1.x, self.c2.x, self.p1.x),
            derivative_1d(t, self.p0.y, self.c1.y, self.c2.y, self.p1.y),
        )
    }

    /// Length of the curve from `t = 0` to `t = z` (clamped to [0, 1]).
    pub fn arc_length(&self, z: f64) -> f64 {
        let z = z.clamp(0.0, 1.0);
        let z2 = z / 2.0;
        let sum: f64 = GAUSS_T
            .iter()
            .zip(GAUSS_C.iter())
            .map(|(&t, &c)| c * self.derivative(z2 * t + z2).length())
            .sum();
        z2 * sum
    }

    /// Length of the whole curve.
    pub fn length(&self) -> f64 {
        self.arc_length(1.0)
    }

    /// Tight axis-aligned bounds, including interior extrema.
    pub fn bounding_box(&self) -> Rect {
        let mut min = self.p0.min(self.p1);
        let mut max = self.p0.max(self.p1);

        let roots = extrema_1d(self.p0.x, self.c1.x, self.c2.x, self.p1.x)
            .chain(extrema_1d(self.p0.y, self.c1.y, self.c2.y, self.p1.y));
        for t in roots {
            let p = self.unrounded_point_at(t);
            min = min.min(p);
            max = max.max(p);
        }

        Rect::from_corners(min, max)
    }

    fn unrounded_point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        self.p0 * (mt * mt * mt)
            + self.c1 * (3.0 * mt * mt * t)
            + self.c2 * (3.0 * mt * t * t)
            + self.p1 * (t * t * t)
    }
}

fn derivative_1d(t: f64, p1: f64, p2: f64, p3: f64, p4: f64) -> f64 {
    let t1 = -3.0 * p1 + 9.0 * p2 - 9.0 * p3 + 3.0 * p4;
    let t2 = t * t1 + 6.0 * p1 - 12.0 * p2 + 6.0 * p3;
    t * t2 - 3.0 * p1 + 3.0 * p2
}

/// Parameters in (0, 1) where the derivative of a 1-D cubic vanishes.
fn extrema_1d(p0: f64, p1: f64, p2: f64, p3: f64) -> impl Iterator<Item = f64> {
    // derivative / 3 as a*t^2 + b*t + c
    let a = -3.0 * p0 + 9.0 * p1 - 9.0 * p2 + 3.0 * p3;
    let b = 6.0 * p0 - 12.0 * p1 + 6.0 * p2;
    let c = 3.0 * p1 - 3.0 * p0;

    let mut roots = [None, None];
    if a.abs() < ROOT_EPSILON {
        if b.abs() >= ROOT_EPSILON {
            roots[0] = Some(-c / b);
        }
    } else {
        let disc = b * b - 4.0 * c * a;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            roots[0] = Some((-b + sq) / (2.0 * a));
            roots[1] = Some((-b - sq) / (2.0 * a));
        }
    }

    roots.into_iter().flatten().filter(|t| *t > 0.0 && *t < 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulge() -> CubicBezier {
        CubicBezier::new(
            dvec2(0.0, 0.0),
            dvec2(0.0, 100.0),
            dvec2(100.0, 100.0),
            dvec2(100.0, 0.0),
        )
    }

    #[test]
    fn point_at_endpoints_and_middle() {
        let c = bulge();
        assert_eq!(c.point_at(0.0), dvec2(0.0, 0.0));
        assert_eq!(c.point_at(1.0), dvec2(100.0, 0.0));
        assert_eq!(c.point_at(0.5), dvec2(50.0, 75.0));
    }

    #[test]
    fn point_at_rounds_residue() {
        // evenly spaced control points: the curve is 0.3 * t on both axes
        let c = CubicBezier::new(
            dvec2(0.0, 0.0),
            dvec2(0.1, 0.1),
            dvec2(0.2, 0.2),
            dvec2(0.3, 0.3),
        );
        let p = c.point_at(1.0 / 3.0);
        assert_eq!(p, dvec2(0.1, 0.1));
    }

    #[test]
    fn bounding_box_includes_extrema() {
        let bbox = bulge().bounding_box();
        assert_eq!(bbox.x, 0.0);
        assert_eq!(bbox.y, 0.0);
        assert_eq!(bbox.width, 100.0);
        assert!((bbox.height - 75.0).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_of_line_is_its_span() {
        let bbox = CubicBezier::line(dvec2(10.0, 40.0), dvec2(30.0, 20.0)).bounding_box();
        assert_eq!(bbox, Rect::new(10.0, 20.0, 20.0, 20.0));
    }

    #[test]
    fn bounding_box_of_point() {
        let p = dvec2(5.0, 5.0);
        let bbox = CubicBezier::line(p, p).bounding_box();
        assert_eq!(bbox, Rect::new(5.0, 5.0, 0.0, 0.0));
    }

    #[test]
    fn arc_length_of_line() {
        let c = CubicBezier::line(dvec2(0.0, 0.0), dvec2(30.0, 40.0));
        // quadrature weights are truncated to four digits
        assert!((c.length() - 50.0).abs() < 0.05);
        assert!((c.arc_length(2.0) - c.length()).abs() < 1e-12);
        assert_eq!(c.arc_length(0.0), 0.0);
    }

    #[test]
    fn straight_detection() {
        assert!(CubicBezier::line(dvec2(0.0, 0.0), dvec2(1.0, 1.0)).is_straight());
        assert!(!bulge().is_straight());
    }
}
