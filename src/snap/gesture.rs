//! Per-gesture snapping inputs and the values derived from them.
//!
//! Offsets and min/max constraints depend on the shape and bounds at the
//! start of a gesture. They are derived the first time an axis is snapped
//! and reused for every later event of the same gesture.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use super::event::ShapeGeometry;
use crate::errors::SnapError;
use crate::types::{Axis, AxisPair, Trbl};

/// Which edge or corner a resize drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl ResizeDirection {
    pub fn is_north(self) -> bool {
        matches!(self, ResizeDirection::N | ResizeDirection::NE | ResizeDirection::NW)
    }

    pub fn is_west(self) -> bool {
        matches!(self, ResizeDirection::W | ResizeDirection::SW | ResizeDirection::NW)
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResizeDirection::N => "n",
            ResizeDirection::NE => "ne",
            ResizeDirection::E => "e",
            ResizeDirection::SE => "se",
            ResizeDirection::S => "s",
            ResizeDirection::SW => "sw",
            ResizeDirection::W => "w",
            ResizeDirection::NW => "nw",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ResizeDirection {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(ResizeDirection::N),
            "ne" => Ok(ResizeDirection::NE),
            "e" => Ok(ResizeDirection::E),
            "se" => Ok(ResizeDirection::SE),
            "s" => Ok(ResizeDirection::S),
            "sw" => Ok(ResizeDirection::SW),
            "w" => Ok(ResizeDirection::W),
            "nw" => Ok(ResizeDirection::NW),
            other => Err(SnapError::InvalidDirection {
                name: other.to_string(),
            }),
        }
    }
}

/// Smallest and largest bounds a resized shape may take.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeConstraints {
    pub min: Option<Trbl>,
    pub max: Option<Trbl>,
}

/// Bounds for one axis. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Values derived during a gesture, one slot per axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    constraints: AxisPair<Option<AxisConstraints>>,
    offset: AxisPair<Option<f64>>,
}

impl GestureState {
    /// Cached constraints for `axis`, if derived yet.
    pub fn constraints(&self, axis: Axis) -> Option<AxisConstraints> {
        self.constraints[axis]
    }

    /// Cached offset for `axis`, if derived yet.
    pub fn offset(&self, axis: Axis) -> Option<f64> {
        self.offset[axis]
    }

    pub(crate) fn constraints_or_insert_with(
        &mut self,
        axis: Axis,
        derive: impl FnOnce() -> AxisConstraints,
    ) -> AxisConstraints {
        *self.constraints[axis].get_or_insert_with(|| {
            let constraints = derive();
            crate::log::debug!(%axis, ?constraints, "cached snap constraints");
            constraints
        })
    }

    pub(crate) fn offset_or_insert_with(&mut self, axis: Axis, derive: impl FnOnce() -> f64) -> f64 {
        *self.offset[axis].get_or_insert_with(|| {
            let offset = derive();
            crate::log::debug!(%axis, offset, "cached snap offset");
            offset
        })
    }
}

/// Everything snapping knows about one interaction.
///
/// Create one per gesture (drag, resize, create, ...) and pass it to every
/// event of that gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureContext {
    /// Dragged edge or corner, for resizes.
    pub direction: Option<ResizeDirection>,
    /// Area a newly created shape must stay in.
    pub create_constraints: Option<Trbl>,
    pub resize_constraints: Option<ResizeConstraints>,
    /// Which part of the shape snaps (`"top-left"`, `"bottom-right"`, ...).
    /// The shape's center snaps when unset.
    pub snap_location: Option<String>,
    pub snapping: GestureState,
}

impl GestureContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: ResizeDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_create_constraints(mut self, bounds: Trbl) -> Self {
        self.create_constraints = Some(bounds);
        self
    }

    pub fn with_resize_constraints(mut self, constraints: ResizeConstraints) -> Self {
        self.resize_constraints = Some(constraints);
        self
    }

    pub fn with_snap_location(mut self, location: impl Into<String>) -> Self {
        self.snap_location = Some(location.into());
        self
    }
}

/// Lookup of elements already placed in the diagram.
pub trait ElementRegistry {
    fn contains(&self, id: &str) -> bool;
}

impl ElementRegistry for HashSet<String> {
    fn contains(&self, id: &str) -> bool {
        HashSet::contains(self, id)
    }
}

impl ElementRegistry for BTreeSet<String> {
    fn contains(&self, id: &str) -> bool {
        BTreeSet::contains(self, id)
    }
}

impl ElementRegistry for [&str] {
    fn contains(&self, id: &str) -> bool {
        self.iter().any(|known| *known == id)
    }
}

/// Min/max bounds for `axis` from creation and resize limits.
///
/// Creation bounds apply as-is. Resize limits depend on the dragged edge: a
/// west or north drag moves the low edge, which the minimum bounds cap from
/// above and the maximum bounds from below; any other drag moves the high
/// edge, the other way round. Resize limits override creation bounds.
pub fn derive_constraints(
    axis: Axis,
    direction: Option<ResizeDirection>,
    create: Option<&Trbl>,
    resize: Option<&ResizeConstraints>,
) -> AxisConstraints {
    let mut out = AxisConstraints::default();
    let low_edge = match axis {
        Axis::X => direction.is_some_and(ResizeDirection::is_west),
        Axis::Y => direction.is_some_and(ResizeDirection::is_north),
    };

    let low = |t: &Trbl| match axis {
        Axis::X => t.left,
        Axis::Y => t.top,
    };
    let high = |t: &Trbl| match axis {
        Axis::X => t.right,
        Axis::Y => t.bottom,
    };

    if let Some(create) = create {
        out.min = Some(low(create));
        out.max = Some(high(create));
    }

    let resize = resize.copied().unwrap_or_default();

    if let Some(min) = resize.min.as_ref() {
        if low_edge {
            out.max = Some(low(min));
        } else {
            out.min = Some(high(min));
        }
    }

    if let Some(max) = resize.max.as_ref() {
        if low_edge {
            out.min = Some(low(max));
        } else {
            out.max = Some(high(max));
        }
    }

    out
}

/// Offset that moves the snapping reference point of `shape` onto the grid.
///
/// Shapes not yet in the diagram (being created) snap by their center, so
/// their origin plus half their extent is added. A snap location naming an
/// edge shifts the reference by half the extent towards that edge.
pub fn derive_offset(
    axis: Axis,
    shape: Option<&ShapeGeometry>,
    placed: bool,
    location: Option<&str>,
) -> f64 {
    let Some(shape) = shape else {
        return 0.0;
    };

    let extent = shape.bounds.extent(axis);
    let mut offset = 0.0;

    if !placed {
        offset += shape.bounds.origin(axis) + extent / 2.0;
    }

    let Some(location) = location else {
        return offset;
    };

    let (low, high) = match axis {
        Axis::X => ("left", "right"),
        Axis::Y => ("top", "bottom"),
    };
    if location.contains(low) {
        offset -= extent / 2.0;
    } else if location.contains(high) {
        offset += extent / 2.0;
    }

    offset
}
