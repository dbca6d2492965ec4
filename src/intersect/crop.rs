//! Choosing where a connection is cropped against a shape outline.

use std::cmp::Ordering;

use super::{Intersection, find_path_intersections};
use crate::defaults::CROP_MERGE_DISTANCE;
use crate::layout::round_point;
use crate::path::PathSpec;
use crate::types::Point;

/// Where `line` should be cropped against `outline`.
///
/// With `crop_start` the line is taken to start inside the outline and the
/// point where it finally leaves it wins; otherwise the point where it first
/// enters the outline. Returns `None` when the paths do not meet.
pub fn element_line_intersection(
    outline: impl Into<PathSpec>,
    line: impl Into<PathSpec>,
    crop_start: bool,
) -> Option<Point> {
    let intersections = find_path_intersections(outline, line);
    choose_crop_point(&intersections, crop_start)
}

/// Pick the crop point among intersections of an outline (first path) and
/// a connection line (second path). The result is rounded.
///
/// One hit, or two hits closer than one unit, yields the first hit. More
/// hits are ordered along the line: by line segment, then from the end of
/// each segment towards its start (in steps of 1/100 of the segment).
pub fn choose_crop_point(intersections: &[Intersection], crop_start: bool) -> Option<Point> {
    match intersections {
        [] => None,
        [only] => Some(round_point(only.point())),
        [first, second] if first.point().distance(second.point()) < CROP_MERGE_DISTANCE => {
            Some(round_point(first.point()))
        }
        _ => {
            let mut sorted = intersections.to_vec();
            sorted.sort_by(crop_order);
            let chosen = if crop_start { sorted.first() } else { sorted.last() };
            chosen.map(|i| round_point(i.point()))
        }
    }
}

/// Distance of a hit from the end of its line segment, in hundredths.
fn remaining(i: &Intersection) -> i64 {
    let proximity = (i.t2 * 100.0).floor() as i64;
    let proximity = if proximity == 0 { 1 } else { proximity };
    100 - proximity
}

fn crop_order(a: &Intersection, b: &Intersection) -> Ordering {
    a.segment2
        .cmp(&b.segment2)
        .then_with(|| remaining(a).cmp(&remaining(b)))
}
