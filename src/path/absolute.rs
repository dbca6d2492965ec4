//! Resolve relative commands against the running current point.

use glam::dvec2;

use super::{ArcTo, PathCommand, Segment};
use crate::types::Point;

/// Rewrite every command with absolute coordinates.
///
/// Tracks the current point and the start of the current subpath; `Close`
/// returns the current point to that start. Relative arcs only offset their
/// endpoint, relative `H`/`V` offset a single coordinate.
pub fn to_absolute(commands: &[PathCommand]) -> Vec<Segment> {
    let mut current = Point::ZERO;
    let mut subpath_start = Point::ZERO;
    let mut out = Vec::with_capacity(commands.len());

    for command in commands {
        let base = if command.relative { current } else { Point::ZERO };

        let segment = match command.segment {
            Segment::MoveTo(p) => Segment::MoveTo(base + p),
            Segment::LineTo(p) => Segment::LineTo(base + p),
            Segment::SmoothQuadTo(p) => Segment::SmoothQuadTo(base + p),
            Segment::Horizontal(x) => Segment::Horizontal(base.x + x),
            Segment::Vertical(y) => Segment::Vertical(base.y + y),
            Segment::CubicTo { c1, c2, to } => Segment::CubicTo {
                c1: base + c1,
                c2: base + c2,
                to: base + to,
            },
            Segment::SmoothCubicTo { c2, to } => Segment::SmoothCubicTo {
                c2: base + c2,
                to: base + to,
            },
            Segment::QuadTo { c, to } => Segment::QuadTo {
                c: base + c,
                to: base + to,
            },
            Segment::Arc(arc) => Segment::Arc(ArcTo {
                to: base + arc.to,
                ..arc
            }),
            Segment::Close => Segment::Close,
        };

        match segment {
            Segment::Close => current = subpath_start,
            Segment::Horizontal(x) => current = dvec2(x, current.y),
            Segment::Vertical(y) => current = dvec2(current.x, y),
            Segment::MoveTo(p) => {
                subpath_start = p;
                current = p;
            }
            Segment::LineTo(p) | Segment::SmoothQuadTo(p) => current = p,
            Segment::CubicTo { to, .. }
            | Segment::SmoothCubicTo { to, .. }
            | Segment::QuadTo { to, .. } => current = to,
            Segment::Arc(arc) => current = arc.to,
        }

        out.push(segment);
    }

    out
}
