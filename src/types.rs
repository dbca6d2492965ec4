//! Geometric value types shared by the path and snapping engines.
//!
//! Points are plain `glam::DVec2` values. Rectangles keep the
//! `{x, y, width, height}` shape diagram elements use and tolerate negative
//! extents, which show up whenever a rect is built from a drag delta.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::SnapError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A point in diagram coordinates.
pub type Point = DVec2;

/// Grid spacing in diagram units. Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Spacing(f64);

impl Spacing {
    /// Create a Spacing (unchecked). Use `try_new` for user-provided values.
    pub(crate) const fn new(value: f64) -> Self {
        Spacing(value)
    }

    /// Create a Spacing with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(value: f64) -> Result<Self, NumericError> {
        if value.is_nan() {
            Err(NumericError::NaN)
        } else if value.is_infinite() {
            Err(NumericError::Infinite)
        } else if value == 0.0 {
            Err(NumericError::Zero)
        } else if value < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Spacing(value))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned rectangle `{x, y, width, height}`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// Smallest rect spanning two corner points, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Same area with non-negative extents.
    pub fn normalized(self) -> Self {
        Rect::from_corners(
            dvec2(self.x, self.y),
            dvec2(self.x + self.width, self.y + self.height),
        )
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn x2(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn y2(&self) -> f64 {
        self.y + self.height
    }

    /// Center of the rect, unrounded.
    pub fn center(&self) -> Point {
        dvec2(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Extent along `axis` (`width` for x, `height` for y).
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Origin coordinate along `axis`.
    pub fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        let r = self.normalized();
        p.x >= r.x && p.x <= r.x2() && p.y >= r.y && p.y <= r.y2()
    }

    /// Overlap test used to prune curve pairs.
    ///
    /// Two boxes overlap when a corner of one lies inside (or on) the other,
    /// or when they cross like a plus sign with every edge strictly inside
    /// the other's span.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();

        let corner_inside = |outer: &Rect, inner: &Rect| {
            outer.contains(dvec2(inner.x, inner.y))
                || outer.contains(dvec2(inner.x2(), inner.y))
                || outer.contains(dvec2(inner.x, inner.y2()))
                || outer.contains(dvec2(inner.x2(), inner.y2()))
        };

        if corner_inside(&b, &a) || corner_inside(&a, &b) {
            return true;
        }

        let x_cross = (a.x < b.x2() && a.x > b.x) || (b.x < a.x2() && b.x > a.x);
        let y_cross = (a.y < b.y2() && a.y > b.y) || (b.y < a.y2() && b.y > a.y);
        x_cross && y_cross
    }

    /// Convert to a `{top, right, bottom, left}` descriptor.
    pub fn trbl(&self) -> Trbl {
        Trbl {
            top: self.y,
            right: self.x2(),
            bottom: self.y2(),
            left: self.x,
        }
    }
}

/// A rectangle described by its edges.
///
/// Creation and resize bounds arrive in this form.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Trbl {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Trbl {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Trbl { top, right, bottom, left }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.right - self.left,
            self.bottom - self.top,
        )
    }
}

impl From<Rect> for Trbl {
    fn from(r: Rect) -> Self {
        r.trbl()
    }
}

/// One of the two snapping axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    pub fn is_horizontal(self) -> bool {
        self == Axis::X
    }

    /// The component of `p` along this axis.
    #[inline]
    pub fn of(self, p: Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

impl FromStr for Axis {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            other => Err(SnapError::InvalidAxis {
                name: other.to_string(),
            }),
        }
    }
}

/// A value per axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AxisPair<T> {
    pub x: T,
    pub y: T,
}

impl<T> AxisPair<T> {
    pub fn new(x: T, y: T) -> Self {
        AxisPair { x, y }
    }
}

impl<T> Index<Axis> for AxisPair<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl<T> IndexMut<Axis> for AxisPair<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// Round half up, the way diagram coordinates are rounded everywhere in this
/// crate (`-2.5` rounds to `-2`, not `-3`).
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_try_new_rejects_bad_values() {
        assert_eq!(Spacing::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Spacing::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(Spacing::try_new(0.0), Err(NumericError::Zero));
        assert_eq!(Spacing::try_new(-10.0), Err(NumericError::Negative));
        assert_eq!(Spacing::try_new(10.0).map(Spacing::get), Ok(10.0));
    }

    #[test]
    fn rect_normalizes_negative_extents() {
        let r = Rect::new(10.0, 10.0, -5.0, -20.0).normalized();
        assert_eq!(r, Rect::new(5.0, -10.0, 5.0, 20.0));
        assert!(Rect::new(10.0, 10.0, -5.0, -20.0).contains(dvec2(7.0, 0.0)));
    }

    #[test]
    fn rect_overlap_by_corner() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn rect_overlap_as_cross() {
        // no corner of either box lies inside the other
        let wide = Rect::new(0.0, 4.0, 20.0, 2.0);
        let tall = Rect::new(9.0, 0.0, 2.0, 10.0);
        assert!(wide.overlaps(&tall));
        assert!(tall.overlaps(&wide));
    }

    #[test]
    fn rect_overlap_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn rect_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn trbl_round_trip() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let t = r.trbl();
        assert_eq!(t, Trbl::new(20.0, 40.0, 60.0, 10.0));
        assert_eq!(t.to_rect(), r);
    }

    #[test]
    fn axis_parsing() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("y".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!(
            "z".parse::<Axis>(),
            Err(SnapError::InvalidAxis { name: "z".into() })
        );
    }

    #[test]
    fn axis_pair_indexing() {
        let mut pair = AxisPair::new(1, 2);
        pair[Axis::Y] = 5;
        assert_eq!(pair[Axis::X], 1);
        assert_eq!(pair[Axis::Y], 5);
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }
}
