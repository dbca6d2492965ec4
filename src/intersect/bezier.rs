//! Intersections of two cubic Beziers by polyline refinement.
//!
//! Each curve is flattened into a polyline of roughly [`POLYLINE_STEP`]-long
//! pieces (a single piece for straight curves). Every pair of pieces is
//! solved as a line/line intersection and the hit is mapped back to curve
//! parameters by interpolating the vertices' parameter stamps.

use std::collections::HashSet;

use glam::dvec2;

use crate::curve::{CubicBezier, fix_error};
use crate::defaults::{DEDUP_DIGITS, POLYLINE_STEP, VERTICAL_EPSILON};
use crate::types::{Axis, Point};

/// An intersection of two cubics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierHit {
    pub point: Point,
    /// Parameter on the first curve, in [0, 1].
    pub t1: f64,
    /// Parameter on the second curve, in [0, 1].
    pub t2: f64,
}

/// Solves one pair of straight pieces.
pub trait SegmentSolver {
    /// Intersection of `a` and `b`, if they cross within both spans.
    fn solve(&mut self, a: [Point; 2], b: [Point; 2]) -> Option<Point>;
}

/// Determinant line/line solver.
///
/// The crossing point is rounded to 1e-11 and accepted when it lies, at two
/// decimal places, within both pieces' bounding boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSolver;

impl SegmentSolver for LineSolver {
    fn solve(&mut self, a: [Point; 2], b: [Point; 2]) -> Option<Point> {
        let [p1, p2] = a;
        let [p3, p4] = b;
        let (a_min, a_max) = (p1.min(p2), p1.max(p2));
        let (b_min, b_max) = (p3.min(p4), p3.max(p4));

        if a_max.x < b_min.x || a_min.x > b_max.x || a_max.y < b_min.y || a_min.y > b_max.y {
            return None;
        }

        let cross_a = p1.x * p2.y - p1.y * p2.x;
        let cross_b = p3.x * p4.y - p3.y * p4.x;
        let nx = cross_a * (p3.x - p4.x) - (p1.x - p2.x) * cross_b;
        let ny = cross_a * (p3.y - p4.y) - (p1.y - p2.y) * cross_b;
        let den = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);

        if den == 0.0 {
            return None;
        }

        let p = dvec2(fix_error(nx / den), fix_error(ny / den));
        let q = dvec2(cents(p.x), cents(p.y));

        let within = |min: Point, max: Point| {
            q.x >= cents(min.x) && q.x <= cents(max.x) && q.y >= cents(min.y) && q.y <= cents(max.y)
        };
        if !within(a_min, a_max) || !within(b_min, b_max) {
            return None;
        }

        Some(p)
    }
}

/// Round to two decimal places.
fn cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Receives hits as they are found.
///
/// Collecting into a `Vec` keeps every hit; a `usize` only counts them.
pub trait HitSink {
    fn record(&mut self, hit: BezierHit);
}

impl HitSink for Vec<BezierHit> {
    fn record(&mut self, hit: BezierHit) {
        self.push(hit);
    }
}

impl HitSink for usize {
    fn record(&mut self, _hit: BezierHit) {
        *self += 1;
    }
}

/// A polyline vertex stamped with its curve parameter.
#[derive(Debug, Clone, Copy)]
struct Dot {
    p: Point,
    t: f64,
}

impl Dot {
    fn along(&self, axis: Axis) -> f64 {
        axis.of(self.p)
    }
}

/// Number of polyline pieces used for `curve`.
pub fn polyline_resolution(curve: &CubicBezier) -> usize {
    if curve.is_straight() {
        return 1;
    }
    let n = (curve.length() / POLYLINE_STEP).round();
    if n.is_finite() && n >= 1.0 { n as usize } else { 1 }
}

fn flatten(curve: &CubicBezier) -> Vec<Dot> {
    let n = polyline_resolution(curve);
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Dot { p: curve.point_at(t), t }
        })
        .collect()
}

/// Axis along which a piece is interpolated: y for nearly vertical pieces.
fn interpolation_axis(from: &Dot, to: &Dot) -> Axis {
    if (to.p.x - from.p.x).abs() < VERTICAL_EPSILON {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Map `hit` on the piece `from..to` back to a curve parameter.
fn parameter_at(hit: Point, from: &Dot, to: &Dot) -> f64 {
    let axis = interpolation_axis(from, to);
    let span = to.along(axis) - from.along(axis);
    from.t + ((axis.of(hit) - from.along(axis)) / span).abs() * (to.t - from.t)
}

/// Finds intersections between pairs of cubics.
#[derive(Debug, Clone, Default)]
pub struct BezierIntersector<S: SegmentSolver = LineSolver> {
    solver: S,
}

impl BezierIntersector<LineSolver> {
    pub fn new() -> Self {
        BezierIntersector { solver: LineSolver }
    }
}

impl<S: SegmentSolver> BezierIntersector<S> {
    pub fn with_solver(solver: S) -> Self {
        BezierIntersector { solver }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// All intersections of `a` and `b`.
    pub fn intersect(&mut self, a: &CubicBezier, b: &CubicBezier) -> Vec<BezierHit> {
        let mut hits = Vec::new();
        self.intersect_into(a, b, &mut hits);
        hits
    }

    /// Number of intersections of `a` and `b`.
    pub fn count(&mut self, a: &CubicBezier, b: &CubicBezier) -> usize {
        let mut count = 0usize;
        self.intersect_into(a, b, &mut count);
        count
    }

    /// Feed every intersection of `a` and `b` into `sink`.
    pub fn intersect_into<K: HitSink>(&mut self, a: &CubicBezier, b: &CubicBezier, sink: &mut K) {
        if !a.bounding_box().overlaps(&b.bounding_box()) {
            crate::log::trace!("bounding boxes disjoint, skipping curve pair");
            return;
        }

        let dots1 = flatten(a);
        let dots2 = flatten(b);
        let mut seen = HashSet::new();

        for piece1 in dots1.windows(2) {
            for piece2 in dots2.windows(2) {
                let (di, di1) = (&piece1[0], &piece1[1]);
                let (dj, dj1) = (&piece2[0], &piece2[1]);

                let Some(point) = self.solver.solve([di.p, di1.p], [dj.p, dj1.p]) else {
                    continue;
                };

                let key = format!(
                    "{:.prec$}#{:.prec$}",
                    point.x,
                    point.y,
                    prec = DEDUP_DIGITS
                );
                if !seen.insert(key) {
                    continue;
                }

                let t1 = parameter_at(point, di, di1);
                let t2 = parameter_at(point, dj, dj1);

                if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
                    sink.record(BezierHit { point, t1, t2 });
                }
            }
        }
    }
}
