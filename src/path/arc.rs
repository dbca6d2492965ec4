//! Elliptical arc to cubic Bezier conversion.
//!
//! Endpoint parameterization is converted to center parameterization
//! (SVG 1.1 implementation notes, F.6.5), then the sweep is cut into pieces
//! of at most 120 degrees, each approximated by one cubic.

use std::f64::consts::PI;

use glam::{DVec2, dvec2};

use super::ArcTo;
use crate::defaults::MAX_ARC_SWEEP_DEG;
use crate::types::Point;

/// Convert an arc starting at `from` into cubic segments.
///
/// Each entry is `[c1, c2, to]`; the first segment starts at `from` and each
/// following one at the previous `to`. A zero radius or an arc that ends
/// where it starts yields a single straight segment.
pub fn arc_to_cubics(from: Point, arc: &ArcTo) -> Vec<[Point; 3]> {
    let rx = arc.rx.abs();
    let ry = arc.ry.abs();
    if rx == 0.0 || ry == 0.0 || from == arc.to {
        return vec![[from, arc.to, arc.to]];
    }

    let rad = arc.rotation.to_radians();
    let p1 = rotate(from, -rad);
    let p2 = rotate(arc.to, -rad);

    let half = (p1 - p2) / 2.0;
    let (mut rx, mut ry) = (rx, ry);
    let h = (half.x * half.x) / (rx * rx) + (half.y * half.y) / (ry * ry);
    if h > 1.0 {
        let h = h.sqrt();
        rx *= h;
        ry *= h;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let num = rx2 * ry2 - rx2 * half.y * half.y - ry2 * half.x * half.x;
    let den = rx2 * half.y * half.y + ry2 * half.x * half.x;
    let k = sign * (num / den).abs().sqrt();
    let center = dvec2(
        k * rx * half.y / ry + (p1.x + p2.x) / 2.0,
        k * -ry * half.x / rx + (p1.y + p2.y) / 2.0,
    );

    let mut f1 = angle_on_ellipse(p1, center, ry);
    let mut f2 = angle_on_ellipse(p2, center, ry);
    if arc.sweep && f1 > f2 {
        f1 -= 2.0 * PI;
    }
    if !arc.sweep && f2 > f1 {
        f2 -= 2.0 * PI;
    }

    let frame = Ellipse { center, rx, ry, sweep: arc.sweep };
    let mut out = Vec::new();
    frame.split(p1, p2, f1, f2, &mut out);

    out.into_iter()
        .map(|[c1, c2, to]| [rotate(c1, rad), rotate(c2, rad), rotate(to, rad)])
        .collect()
}

/// An ellipse in its own axis-aligned frame.
struct Ellipse {
    center: Point,
    rx: f64,
    ry: f64,
    sweep: bool,
}

impl Ellipse {
    fn at(&self, angle: f64) -> Point {
        self.center + dvec2(self.rx * angle.cos(), self.ry * angle.sin())
    }

    /// Append cubics for the sweep `f1..f2` running from `start` to `end`.
    fn split(&self, start: Point, end: Point, f1: f64, f2: f64, out: &mut Vec<[Point; 3]>) {
        let max = MAX_ARC_SWEEP_DEG.to_radians();

        let (piece_end, piece_f2) = if (f2 - f1).abs() > max {
            let dir = if self.sweep && f2 > f1 { 1.0 } else { -1.0 };
            let f = f1 + max * dir;
            (self.at(f), Some(f))
        } else {
            (end, None)
        };
        let f_end = piece_f2.unwrap_or(f2);

        let df = f_end - f1;
        let t = (df / 4.0).tan();
        let hx = 4.0 / 3.0 * self.rx * t;
        let hy = 4.0 / 3.0 * self.ry * t;

        let c1 = start - dvec2(hx * f1.sin(), -hy * f1.cos());
        let c2 = piece_end + dvec2(hx * f_end.sin(), -hy * f_end.cos());
        out.push([c1, c2, piece_end]);

        if let Some(f) = piece_f2 {
            self.split(piece_end, end, f, f2, out);
        }
    }
}

/// Angle of `p` on the ellipse, in `[0, 2π)`.
fn angle_on_ellipse(p: Point, center: Point, ry: f64) -> f64 {
    // nine decimals keep asin inside its domain for points on the ellipse
    let s = (((p.y - center.y) / ry) * 1e9).round() / 1e9;
    let mut f = s.clamp(-1.0, 1.0).asin();
    if p.x < center.x {
        f = PI - f;
    }
    if f < 0.0 {
        f += 2.0 * PI;
    }
    f
}

fn rotate(p: Point, rad: f64) -> Point {
    if rad == 0.0 {
        return p;
    }
    DVec2::from_angle(rad).rotate(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, to: Point) -> ArcTo {
        ArcTo { rx, ry, rotation, large_arc, sweep, to }
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 0.01, "{a} != {b}");
    }

    #[test]
    fn semicircle_splits_at_120_degrees() {
        let cubics = arc_to_cubics(dvec2(0.0, 0.0), &arc(50.0, 50.0, 0.0, false, true, dvec2(100.0, 0.0)));
        assert_eq!(cubics.len(), 2);
        assert_close(cubics[0][2], dvec2(75.0, -43.30));
        assert_close(cubics[1][2], dvec2(100.0, 0.0));
        for [_, _, to] in &cubics {
            assert!((to.distance(dvec2(50.0, 0.0)) - 50.0).abs() < 1e-6);
        }
    }

    #[test]
    fn quarter_circle_is_one_cubic() {
        let cubics = arc_to_cubics(dvec2(0.0, 0.0), &arc(10.0, 10.0, 0.0, false, true, dvec2(10.0, 10.0)));
        assert_eq!(cubics.len(), 1);
        let [c1, c2, to] = cubics[0];
        assert_close(to, dvec2(10.0, 10.0));
        // tangents of a quarter circle centered at (0, 10) or (10, 0)
        assert!(c1.x.abs() < 1e-9 || c1.y.abs() < 1e-9);
        assert!((c2.x - 10.0).abs() < 1e-9 || (c2.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn small_radii_are_scaled_up() {
        let cubics = arc_to_cubics(dvec2(0.0, 0.0), &arc(1.0, 1.0, 0.0, false, true, dvec2(100.0, 0.0)));
        let end = cubics.last().map(|c| c[2]);
        assert_close(end.unwrap_or_default(), dvec2(100.0, 0.0));
        for [_, _, to] in &cubics {
            assert!((to.distance(dvec2(50.0, 0.0)) - 50.0).abs() < 1e-6);
        }
    }

    #[test]
    fn rotation_preserves_endpoints() {
        let cubics = arc_to_cubics(dvec2(10.0, 10.0), &arc(30.0, 10.0, 45.0, true, false, dvec2(40.0, 30.0)));
        assert!(!cubics.is_empty());
        assert_close(cubics[cubics.len() - 1][2], dvec2(40.0, 30.0));
    }

    #[test]
    fn degenerate_arcs_become_lines() {
        let from = dvec2(0.0, 0.0);
        let to = dvec2(10.0, 0.0);
        assert_eq!(arc_to_cubics(from, &arc(0.0, 5.0, 0.0, false, true, to)), vec![[from, to, to]]);
        assert_eq!(arc_to_cubics(from, &arc(5.0, 5.0, 0.0, false, true, from)), vec![[from, from, from]]);
    }

    #[test]
    fn sweep_flag_picks_the_side() {
        let from = dvec2(0.0, 0.0);
        let to = dvec2(100.0, 0.0);
        let up = arc_to_cubics(from, &arc(50.0, 50.0, 0.0, false, true, to));
        let down = arc_to_cubics(from, &arc(50.0, 50.0, 0.0, false, false, to));
        assert!(up[0][2].y < 0.0);
        assert!(down[0][2].y > 0.0);
    }
}
