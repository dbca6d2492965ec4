//! The pointer event a snapping pass reads and rewrites.

use crate::errors::SnapError;
use crate::types::{Axis, AxisPair, Rect};

/// A snap result for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Snap {
    /// Snapped to this coordinate.
    To(f64),
    /// Explicitly left unsnapped; a later pass may still snap it.
    Release,
}

/// Per-axis snap results of one event. `None` means not looked at yet.
pub type SnapState = AxisPair<Option<Snap>>;

/// Geometry of the shape being dragged, created or resized.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    pub id: String,
    pub bounds: Rect,
}

impl ShapeGeometry {
    pub fn new(id: impl Into<String>, bounds: Rect) -> Self {
        ShapeGeometry {
            id: id.into(),
            bounds,
        }
    }
}

/// A move/end event of an interaction.
///
/// `x`/`y` is the pointer position and `dx`/`dy` the delta since the
/// gesture started; snapping shifts both by the same amount.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapEvent {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub snapped: SnapState,
    pub shape: Option<ShapeGeometry>,
    /// Set when the modifier that bypasses snapping is held.
    pub bypass: bool,
}

impl SnapEvent {
    pub fn new(x: f64, y: f64) -> Self {
        SnapEvent {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_delta(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn with_shape(mut self, shape: ShapeGeometry) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }

    /// Pointer coordinate along `axis`.
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn coord_and_delta_mut(&mut self, axis: Axis) -> (&mut f64, &mut f64) {
        match axis {
            Axis::X => (&mut self.x, &mut self.dx),
            Axis::Y => (&mut self.y, &mut self.dy),
        }
    }

    /// True once `axis` has been snapped to a value.
    pub fn is_snapped(&self, axis: Axis) -> bool {
        matches!(self.snapped[axis], Some(Snap::To(_)))
    }

    /// True once both axes have been snapped.
    pub fn is_fully_snapped(&self) -> bool {
        Axis::ALL.iter().all(|&axis| self.is_snapped(axis))
    }

    /// Record a snap result for `axis` and return the previous coordinate.
    ///
    /// Snapping to a value moves the coordinate and the delta by the same
    /// amount. Releasing only marks the axis.
    pub fn set_snapped(&mut self, axis: Axis, snap: Snap) -> Result<f64, SnapError> {
        let previous = self.coord(axis);

        if let Snap::To(value) = snap {
            if !value.is_finite() {
                return Err(SnapError::NonFiniteValue { axis, value });
            }
            let delta = value - previous;
            let (coord, d) = self.coord_and_delta_mut(axis);
            *coord += delta;
            *d += delta;
        }

        self.snapped[axis] = Some(snap);
        Ok(previous)
    }
}
