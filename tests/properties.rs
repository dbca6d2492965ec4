//! Property-based invariant tests for snapping and intersections.
//!
//! 1. Quantizing twice changes nothing.
//! 2. Snapped values are never more than half a grid step away.
//! 3. With an offset, `value + offset` lands on the grid.
//! 4. Bounded snapping stays within the bounds.
//! 5. Segment intersections are symmetric in their arguments.
//! 6. Polylines normalize to one straight cubic per line command.
//! 7. A cubic's bounding box contains every point on it.

use glam::dvec2;
use gridpath::curve::CubicBezier;
use gridpath::path::CanonicalSegment;
use gridpath::snap::{GridSnapping, RoundingMode, SnapOptions, quantize};
use gridpath::{find_path_intersections, normalize_path};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Values on a quarter-unit lattice, so every expected result is exact.
fn lattice_value() -> impl Strategy<Value = f64> {
    (-40_000i32..=40_000).prop_map(|k| k as f64 / 4.0)
}

fn coord() -> impl Strategy<Value = f64> {
    (-200i32..=200).prop_map(f64::from)
}

fn segment_path((x1, y1, x2, y2): (f64, f64, f64, f64)) -> String {
    format!("M{},{} L{},{}", x1, y1, x2, y2)
}

fn segment() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (coord(), coord(), coord(), coord())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Snapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn quantize_is_idempotent(value in lattice_value()) {
        for mode in [RoundingMode::Round, RoundingMode::Ceil, RoundingMode::Floor] {
            let once = quantize(value, 10.0, mode);
            prop_assert_eq!(quantize(once, 10.0, mode), once, "mode {:?}", mode);
        }
    }

    #[test]
    fn snapping_moves_at_most_half_a_step(value in lattice_value()) {
        let snapping = GridSnapping::default();
        let snapped = snapping.snap_value(value, &SnapOptions::default());
        prop_assert!((snapped - value).abs() <= 5.0, "{} -> {}", value, snapped);
        prop_assert_eq!(snapped.rem_euclid(10.0), 0.0);
    }

    #[test]
    fn offset_reference_lands_on_grid(value in lattice_value(), offset in -1000i32..=1000) {
        let snapping = GridSnapping::default();
        let offset = f64::from(offset);
        let snapped = snapping.snap_value(value, &SnapOptions::offset(offset));
        prop_assert_eq!((snapped + offset).rem_euclid(10.0), 0.0);
    }

    #[test]
    fn bounded_snapping_stays_in_bounds(
        value in lattice_value(),
        min in -5000i32..=5000,
        width in 10i32..=2000,
    ) {
        let snapping = GridSnapping::default();
        let min = f64::from(min);
        let max = min + f64::from(width);
        let options = SnapOptions { offset: None, min: Some(min), max: Some(max) };

        let snapped = snapping.snap_value(value, &options);
        prop_assert!(snapped >= min && snapped <= max, "{} not in [{}, {}]", snapped, min, max);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-7. Paths and intersections
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segment_intersections_are_symmetric(a in segment(), b in segment()) {
        let forward = find_path_intersections(segment_path(a), segment_path(b));
        let backward = find_path_intersections(segment_path(b), segment_path(a));

        prop_assert!(forward.len() <= 1);
        prop_assert_eq!(forward.len(), backward.len());
        for (f, r) in forward.iter().zip(&backward) {
            prop_assert!((f.x - r.x).abs() < 1e-6 && (f.y - r.y).abs() < 1e-6);
            prop_assert!((f.t1 - r.t2).abs() < 1e-6 && (f.t2 - r.t1).abs() < 1e-6);
        }
    }

    #[test]
    fn polylines_normalize_to_straight_cubics(
        points in proptest::collection::vec((coord(), coord()), 2..12),
    ) {
        let mut data = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            data.push_str(if i == 0 { "M" } else { "L" });
            data.push_str(&format!("{},{} ", x, y));
        }

        let path = normalize_path(data.as_str());
        prop_assert_eq!(path.len(), points.len());
        prop_assert_eq!(path.segments()[0], CanonicalSegment::MoveTo(dvec2(points[0].0, points[0].1)));

        let cubics: Vec<_> = path.cubics().collect();
        prop_assert_eq!(cubics.len(), points.len() - 1);
        for ((_, cubic), (x, y)) in cubics.iter().zip(&points[1..]) {
            prop_assert!(cubic.is_straight());
            prop_assert_eq!(cubic.p1, dvec2(*x, *y));
        }
    }

    #[test]
    fn bounding_box_contains_curve(
        p in proptest::array::uniform8(coord()),
        t in 0.0f64..=1.0,
    ) {
        let curve = CubicBezier::new(
            dvec2(p[0], p[1]),
            dvec2(p[2], p[3]),
            dvec2(p[4], p[5]),
            dvec2(p[6], p[7]),
        );
        let bbox = curve.bounding_box();
        let point = curve.point_at(t);
        let slack = 1e-6;

        prop_assert!(point.x >= bbox.x - slack && point.x <= bbox.x2() + slack);
        prop_assert!(point.y >= bbox.y - slack && point.y <= bbox.y2() + slack);
    }
}
