//! Intersections between whole paths.
//!
//! Both paths are normalized to their canonical cubic form; every cubic of
//! the first path is then tested against every cubic of the second. Results
//! come out first-path-segment major, in the order they are found.

mod bezier;
mod crop;

use crate::path::{CanonicalPath, PathNormalizer, PathSpec, with_thread_normalizer};
use crate::types::Point;

pub use bezier::{BezierHit, BezierIntersector, HitSink, LineSolver, SegmentSolver, polyline_resolution};
pub use crop::{choose_crop_point, element_line_intersection};

/// An intersection between two paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub x: f64,
    pub y: f64,
    /// Parameter within the cubic of the first path.
    pub t1: f64,
    /// Parameter within the cubic of the second path.
    pub t2: f64,
    /// Index of that cubic in the first canonical path (moves count).
    pub segment1: usize,
    /// Index of that cubic in the second canonical path (moves count).
    pub segment2: usize,
}

impl Intersection {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Labels bezier hits with the segment indices of the pair that produced
/// them.
struct Labelled<'a> {
    out: &'a mut Vec<Intersection>,
    segment1: usize,
    segment2: usize,
}

impl HitSink for Labelled<'_> {
    fn record(&mut self, hit: BezierHit) {
        self.out.push(Intersection {
            x: hit.point.x,
            y: hit.point.y,
            t1: hit.t1,
            t2: hit.t2,
            segment1: self.segment1,
            segment2: self.segment2,
        });
    }
}

/// Intersections of two canonical paths.
pub fn intersect_canonical<S: SegmentSolver>(
    a: &CanonicalPath,
    b: &CanonicalPath,
    bezier: &mut BezierIntersector<S>,
) -> Vec<Intersection> {
    let mut out = Vec::new();
    for (segment1, curve1) in a.cubics() {
        for (segment2, curve2) in b.cubics() {
            let mut sink = Labelled { out: &mut out, segment1, segment2 };
            bezier.intersect_into(&curve1, &curve2, &mut sink);
        }
    }
    crate::log::trace!(hits = out.len(), "path intersections");
    out
}

/// Number of intersections of two canonical paths.
pub fn count_canonical<S: SegmentSolver>(
    a: &CanonicalPath,
    b: &CanonicalPath,
    bezier: &mut BezierIntersector<S>,
) -> usize {
    let mut count = 0usize;
    for (_, curve1) in a.cubics() {
        for (_, curve2) in b.cubics() {
            bezier.intersect_into(&curve1, &curve2, &mut count);
        }
    }
    count
}

/// Path intersection queries backed by an owned normalizer.
pub struct IntersectionEngine<S: SegmentSolver = LineSolver> {
    normalizer: PathNormalizer,
    bezier: BezierIntersector<S>,
}

impl IntersectionEngine<LineSolver> {
    pub fn new() -> Self {
        Self::with_normalizer(PathNormalizer::new())
    }

    pub fn with_normalizer(normalizer: PathNormalizer) -> Self {
        IntersectionEngine {
            normalizer,
            bezier: BezierIntersector::new(),
        }
    }
}

impl Default for IntersectionEngine<LineSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SegmentSolver> IntersectionEngine<S> {
    pub fn with_solver(normalizer: PathNormalizer, solver: S) -> Self {
        IntersectionEngine {
            normalizer,
            bezier: BezierIntersector::with_solver(solver),
        }
    }

    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    pub fn solver(&self) -> &S {
        self.bezier.solver()
    }

    /// Every intersection between `a` and `b`.
    ///
    /// ```
    /// use gridpath::intersect::IntersectionEngine;
    /// use gridpath::path::PathCommand;
    ///
    /// let mut engine = IntersectionEngine::new();
    /// let hits = engine.find_intersections(
    ///     "M0,0L100,100",
    ///     vec![PathCommand::move_to(0.0, 100.0), PathCommand::line_to(100.0, 0.0)],
    /// );
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!((hits[0].x, hits[0].y), (50.0, 50.0));
    /// ```
    pub fn find_intersections(
        &mut self,
        a: impl Into<PathSpec>,
        b: impl Into<PathSpec>,
    ) -> Vec<Intersection> {
        let a = self.normalizer.normalize(&a.into());
        let b = self.normalizer.normalize(&b.into());
        intersect_canonical(&a, &b, &mut self.bezier)
    }

    /// Number of intersections between `a` and `b`.
    pub fn count_intersections(&mut self, a: impl Into<PathSpec>, b: impl Into<PathSpec>) -> usize {
        let a = self.normalizer.normalize(&a.into());
        let b = self.normalizer.normalize(&b.into());
        count_canonical(&a, &b, &mut self.bezier)
    }
}

fn normalize_pair(a: PathSpec, b: PathSpec) -> (CanonicalPath, CanonicalPath) {
    with_thread_normalizer(|normalizer| (normalizer.normalize(&a), normalizer.normalize(&b)))
}

/// [`IntersectionEngine::find_intersections`] using this thread's shared
/// normalizer.
pub fn find_path_intersections(a: impl Into<PathSpec>, b: impl Into<PathSpec>) -> Vec<Intersection> {
    let (a, b) = normalize_pair(a.into(), b.into());
    intersect_canonical(&a, &b, &mut BezierIntersector::new())
}

/// [`IntersectionEngine::count_intersections`] using this thread's shared
/// normalizer.
pub fn count_path_intersections(a: impl Into<PathSpec>, b: impl Into<PathSpec>) -> usize {
    let (a, b) = normalize_pair(a.into(), b.into());
    count_canonical(&a, &b, &mut BezierIntersector::new())
}
