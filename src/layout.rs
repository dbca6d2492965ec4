//! Point and rectangle helpers used around cropping and snapping.
//!
//! Coordinates that end up in the diagram (mids, crop points) are rounded
//! half up, see [`round_half_up`].

use std::fmt;

use glam::dvec2;

use crate::defaults::{ALIGNED_THRESHOLD, ON_LINE_ACCURACY, SNAP_TO_TOLERANCE};
use crate::types::{Point, Rect, Trbl, round_half_up};

/// Euclidean distance between two points.
pub fn point_distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// True if `r` lies on the line through `p` and `q`, within
/// [`ON_LINE_ACCURACY`] units.
pub fn points_on_line(p: Point, q: Point, r: Point) -> bool {
    points_on_line_within(p, q, r, ON_LINE_ACCURACY)
}

/// True if `r` is at most `accuracy` units away from the line through `p`
/// and `q`. Coincident `p` and `q` define no line.
pub fn points_on_line_within(p: Point, q: Point, r: Point, accuracy: f64) -> bool {
    let cross = (q - p).perp_dot(r - p);
    (cross / point_distance(p, q)).abs() <= accuracy
}

/// How a set of points lines up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Same y: the points sit on a horizontal line.
    Horizontal,
    /// Same x: the points sit on a vertical line.
    Vertical,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Horizontal => write!(f, "h"),
            Alignment::Vertical => write!(f, "v"),
        }
    }
}

/// Whether all `points` share an x (vertical) or a y (horizontal), within
/// [`ALIGNED_THRESHOLD`]. Vertical wins when both hold.
pub fn points_aligned(points: &[Point]) -> Option<Alignment> {
    let first = points.first()?;
    let aligned = |get: fn(&Point) -> f64| {
        points
            .iter()
            .all(|p| (get(first) - get(p)).abs() <= ALIGNED_THRESHOLD)
    };

    if aligned(|p| p.x) {
        Some(Alignment::Vertical)
    } else if aligned(|p| p.y) {
        Some(Alignment::Horizontal)
    } else {
        None
    }
}

/// Strict containment of `p` in `rect` grown by `tolerance` on every side.
pub fn point_in_rect(p: Point, rect: &Rect, tolerance: f64) -> bool {
    p.x > rect.x - tolerance
        && p.y > rect.y - tolerance
        && p.x < rect.x2() + tolerance
        && p.y < rect.y2() + tolerance
}

/// Rounded point halfway between `p` and `q`.
pub fn mid_point(p: Point, q: Point) -> Point {
    round_point(p + (q - p) / 2.0)
}

pub fn round_point(p: Point) -> Point {
    dvec2(round_half_up(p.x), round_half_up(p.y))
}

pub fn round_bounds(r: &Rect) -> Rect {
    Rect::new(
        round_half_up(r.x),
        round_half_up(r.y),
        round_half_up(r.width),
        round_half_up(r.height),
    )
}

pub fn as_trbl(r: &Rect) -> Trbl {
    r.trbl()
}

pub fn as_bounds(t: &Trbl) -> Rect {
    t.to_rect()
}

/// Rounded center of `r`.
pub fn bounds_mid(r: &Rect) -> Point {
    round_point(r.center())
}

/// The point halfway along a connection, measured by length.
///
/// Returns the only waypoint for a single-point connection and `None` for
/// an empty one. Not rounded.
pub fn connection_mid(waypoints: &[Point]) -> Option<Point> {
    let (&first, rest) = waypoints.split_first()?;
    if rest.is_empty() {
        return Some(first);
    }

    let total: f64 = waypoints.windows(2).map(|w| w[0].distance(w[1])).sum();
    let half = total / 2.0;

    let mut travelled = 0.0;
    for w in waypoints.windows(2) {
        let (start, end) = (w[0], w[1]);
        let length = start.distance(end);
        if travelled + length >= half {
            if length == 0.0 {
                return Some(start);
            }
            let progress = (half - travelled) / length;
            return Some(start + (end - start) * progress);
        }
        travelled += length;
    }

    waypoints.last().copied()
}

/// Position of a rectangle relative to a reference rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// The rectangles overlap (after padding) on both axes.
    Intersect,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::Top => "top",
            Orientation::Right => "right",
            Orientation::Bottom => "bottom",
            Orientation::Left => "left",
            Orientation::TopLeft => "top-left",
            Orientation::TopRight => "top-right",
            Orientation::BottomLeft => "bottom-left",
            Orientation::BottomRight => "bottom-right",
            Orientation::Intersect => "intersect",
        };
        write!(f, "{}", s)
    }
}

/// Where `rect` lies relative to `reference`.
///
/// `padding` widens the gap that must separate the two before a side is
/// reported (a negative padding narrows it), per axis.
pub fn orientation(rect: &Rect, reference: &Rect, padding: Point) -> Orientation {
    let r = rect.trbl();
    let reference = reference.trbl();

    let top = r.bottom + padding.y <= reference.top;
    let right = r.left - padding.x >= reference.right;
    let bottom = r.top - padding.y >= reference.bottom;
    let left = r.right + padding.x <= reference.left;

    match (top, bottom, left, right) {
        (true, _, true, _) => Orientation::TopLeft,
        (true, _, false, true) => Orientation::TopRight,
        (true, _, false, false) => Orientation::Top,
        (false, true, true, _) => Orientation::BottomLeft,
        (false, true, false, true) => Orientation::BottomRight,
        (false, true, false, false) => Orientation::Bottom,
        (false, false, true, _) => Orientation::Left,
        (false, false, false, true) => Orientation::Right,
        (false, false, false, false) => Orientation::Intersect,
    }
}

/// Drop waypoints that repeat the next one or lie on the line between their
/// neighbours.
pub fn filter_redundant_waypoints(waypoints: &[Point]) -> Vec<Point> {
    let mut points = waypoints.to_vec();
    let mut idx = 0;

    while idx < points.len() {
        let point = points[idx];
        let previous = idx.checked_sub(1).map(|i| points[i]);
        let next = points.get(idx + 1).copied();

        let duplicate = next.is_some_and(|n| point_distance(point, n) == 0.0);
        let on_line = matches!((previous, next), (Some(p), Some(n)) if points_on_line(p, n, point));

        if duplicate || on_line {
            points.remove(idx);
        } else {
            idx += 1;
        }
    }

    points
}

/// The first of `values` within [`SNAP_TO_TOLERANCE`] of `value`.
pub fn snap_to(value: f64, values: &[f64]) -> Option<f64> {
    snap_to_within(value, values, SNAP_TO_TOLERANCE)
}

/// The first of `values` within `tolerance` of `value`.
pub fn snap_to_within(value: f64, values: &[f64], tolerance: f64) -> Option<f64> {
    values
        .iter()
        .copied()
        .find(|candidate| (candidate - value).abs() <= tolerance)
}

pub fn top_left(r: &Rect) -> Point {
    dvec2(r.x, r.y)
}

pub fn bottom_right(r: &Rect) -> Point {
    dvec2(r.x2(), r.y2())
}

/// Rounded center of `r`, or `None` if its origin is not a number.
pub fn mid(r: &Rect) -> Option<Point> {
    if r.x.is_nan() || r.y.is_nan() {
        return None;
    }
    Some(bounds_mid(r))
}
