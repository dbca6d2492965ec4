//! Lower absolute segments to `MoveTo` + `CubicTo` only.

use super::{CanonicalPath, CanonicalSegment, CommandKind, Segment, arc_to_cubics};
use crate::types::Point;

/// Degree-raise a quadratic to a cubic.
fn quad_controls(from: Point, c: Point, to: Point) -> (Point, Point) {
    (from / 3.0 + c * (2.0 / 3.0), to / 3.0 + c * (2.0 / 3.0))
}

/// Running state while lowering one path.
struct Lowering {
    current: Point,
    subpath_start: Point,
    /// Second control point of the last emitted segment, for `S` reflection.
    last_control: Point,
    /// Control point of the last quadratic, for `T` reflection.
    last_quad: Option<Point>,
    previous: Option<CommandKind>,
    out: Vec<CanonicalSegment>,
}

impl Lowering {
    fn new() -> Self {
        Lowering {
            current: Point::ZERO,
            subpath_start: Point::ZERO,
            last_control: Point::ZERO,
            last_quad: None,
            previous: None,
            out: Vec::new(),
        }
    }

    fn cubic(&mut self, c1: Point, c2: Point, to: Point) {
        self.out.push(CanonicalSegment::CubicTo { c1, c2, to });
        self.last_control = c2;
        self.current = to;
    }

    fn line(&mut self, to: Point) {
        let from = self.current;
        self.cubic(from, to, to);
    }

    fn quad(&mut self, c: Point, to: Point) {
        let (c1, c2) = quad_controls(self.current, c, to);
        self.cubic(c1, c2, to);
        self.last_quad = Some(c);
    }

    fn push(&mut self, segment: Segment) {
        let kind = segment.kind();
        let follows = |a: CommandKind, b: CommandKind| matches!(self.previous, Some(k) if k == a || k == b);
        let smooth_cubic = follows(CommandKind::CubicTo, CommandKind::SmoothCubicTo);
        let smooth_quad = follows(CommandKind::QuadTo, CommandKind::SmoothQuadTo);

        if !matches!(kind, CommandKind::QuadTo | CommandKind::SmoothQuadTo) {
            self.last_quad = None;
        }

        match segment {
            Segment::MoveTo(p) => {
                self.out.push(CanonicalSegment::MoveTo(p));
                self.current = p;
                self.subpath_start = p;
                self.last_control = p;
            }
            Segment::LineTo(p) => self.line(p),
            Segment::Horizontal(x) => self.line(Point::new(x, self.current.y)),
            Segment::Vertical(y) => self.line(Point::new(self.current.x, y)),
            Segment::Close => self.line(self.subpath_start),
            Segment::CubicTo { c1, c2, to } => self.cubic(c1, c2, to),
            Segment::SmoothCubicTo { c2, to } => {
                let c1 = if smooth_cubic {
                    self.current * 2.0 - self.last_control
                } else {
                    self.current
                };
                self.cubic(c1, c2, to);
            }
            Segment::QuadTo { c, to } => self.quad(c, to),
            Segment::SmoothQuadTo(to) => {
                let c = match self.last_quad {
                    Some(q) if smooth_quad => self.current * 2.0 - q,
                    _ => self.current,
                };
                self.quad(c, to);
            }
            Segment::Arc(arc) => {
                for [c1, c2, to] in arc_to_cubics(self.current, &arc) {
                    self.cubic(c1, c2, to);
                }
            }
        }

        self.previous = Some(kind);
    }
}

/// Lower absolute segments (see [`super::to_absolute`]) into a canonical
/// path. Every drawing command becomes one or more cubics; lines become
/// cubics whose control points sit on their endpoints.
pub fn lower_to_cubics(segments: &[Segment]) -> CanonicalPath {
    let mut lowering = Lowering::new();
    for &segment in segments {
        lowering.push(segment);
    }
    CanonicalPath::new(lowering.out)
}
