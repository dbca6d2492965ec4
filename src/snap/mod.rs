//! Grid snapping for interactive shape and connection editing.
//!
//! [`GridSnapping::handle`] is called for every move/end event of a gesture
//! (create, move, resize, connect, bendpoint or segment move). It snaps the
//! event's `x` and `y` onto the grid, honoring an offset (so that the
//! shape's center or a named corner lands on a grid line) and min/max
//! bounds. Both are derived on the first event of a gesture and kept in its
//! [`GestureContext`].

mod event;
mod gesture;
pub mod grid;
mod quantize;

use crate::defaults::SPACING;
use crate::errors::SnapError;
use crate::types::{Axis, Spacing};

pub use event::{ShapeGeometry, Snap, SnapEvent, SnapState};
pub use gesture::{
    AxisConstraints, ElementRegistry, GestureContext, GestureState, ResizeConstraints,
    ResizeDirection, derive_constraints, derive_offset,
};
pub use grid::Grid;
pub use quantize::{RoundingMode, quantize};

/// Configuration for [`GridSnapping`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnappingConfig {
    /// Whether snapping starts out active.
    pub active: bool,
    pub spacing: Spacing,
}

impl Default for GridSnappingConfig {
    fn default() -> Self {
        GridSnappingConfig {
            active: true,
            spacing: SPACING,
        }
    }
}

/// Optional adjustments for [`GridSnapping::snap_value`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapOptions {
    /// Added before snapping and removed afterwards, so that
    /// `value + offset` lands on the grid.
    pub offset: Option<f64>,
    /// Lowest allowed value (before the offset is applied).
    pub min: Option<f64>,
    /// Highest allowed value (before the offset is applied).
    pub max: Option<f64>,
}

impl SnapOptions {
    pub fn offset(offset: f64) -> Self {
        SnapOptions {
            offset: Some(offset),
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, constraints: AxisConstraints) -> Self {
        self.min = constraints.min;
        self.max = constraints.max;
        self
    }
}

/// Handle returned by [`GridSnapping::on_active_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(bool)>;

/// Snaps interaction events to the grid.
pub struct GridSnapping {
    active: bool,
    spacing: Spacing,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl GridSnapping {
    pub fn new(config: &GridSnappingConfig) -> Self {
        GridSnapping {
            active: config.active,
            spacing: config.spacing,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Distance between grid lines.
    pub fn grid_spacing(&self) -> f64 {
        self.spacing.get()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn snapping on or off and notify every listener, even when the
    /// state does not change.
    pub fn set_active(&mut self, active: bool) {
        crate::log::debug!(active, "grid snapping toggled");
        self.active = active;
        for (_, listener) in &mut self.listeners {
            listener(active);
        }
    }

    pub fn toggle_active(&mut self) {
        self.set_active(!self.active);
    }

    /// Call `listener` with the new state whenever [`set_active`] runs.
    /// Listeners run in registration order.
    ///
    /// [`set_active`]: Self::set_active
    pub fn on_active_changed(&mut self, listener: impl FnMut(bool) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(known, _)| *known != id);
        self.listeners.len() != before
    }

    /// Snap `value` to the grid.
    ///
    /// `value + offset` is rounded to the nearest grid line and clamped to
    /// the grid lines inside `[min + offset, max + offset]`; the offset is
    /// then removed again.
    ///
    /// ```
    /// use gridpath::snap::{GridSnapping, GridSnappingConfig, SnapOptions};
    ///
    /// let snapping = GridSnapping::new(&GridSnappingConfig::default());
    /// assert_eq!(snapping.snap_value(17.0, &SnapOptions::default()), 20.0);
    /// assert_eq!(snapping.snap_value(17.0, &SnapOptions::offset(5.0)), 15.0);
    /// ```
    pub fn snap_value(&self, value: f64, options: &SnapOptions) -> f64 {
        let spacing = self.spacing.get();
        let offset = options.offset.unwrap_or(0.0);

        let mut value = quantize(value + offset, spacing, RoundingMode::Round);

        if let Some(min) = options.min {
            value = value.max(quantize(min + offset, spacing, RoundingMode::Ceil));
        }
        if let Some(max) = options.max {
            value = value.min(quantize(max + offset, spacing, RoundingMode::Floor));
        }

        value - offset
    }

    /// Snap one axis of `event` and mark it snapped.
    pub fn snap_event(
        &self,
        event: &mut SnapEvent,
        axis: Axis,
        options: &SnapOptions,
    ) -> Result<(), SnapError> {
        let snapped = self.snap_value(event.coord(axis), options);
        event.set_snapped(axis, Snap::To(snapped))?;
        Ok(())
    }

    /// Snap a move/end event of the gesture described by `gesture`.
    ///
    /// Does nothing while inactive or when the event bypasses snapping. Each
    /// axis that is not already snapped is snapped with the gesture's offset
    /// and constraints, x first.
    pub fn handle<R: ElementRegistry + ?Sized>(
        &self,
        event: &mut SnapEvent,
        gesture: &mut GestureContext,
        registry: &R,
    ) -> Result<(), SnapError> {
        if !self.active || event.bypass {
            return Ok(());
        }

        let GestureContext {
            direction,
            create_constraints,
            resize_constraints,
            snap_location,
            snapping: state,
        } = gesture;

        for axis in Axis::ALL {
            let offset = state.offset_or_insert_with(axis, || {
                let shape = event.shape.as_ref();
                let placed = shape.is_some_and(|s| registry.contains(&s.id));
                derive_offset(axis, shape, placed, snap_location.as_deref())
            });

            let constraints = state.constraints_or_insert_with(axis, || {
                derive_constraints(
                    axis,
                    *direction,
                    create_constraints.as_ref(),
                    resize_constraints.as_ref(),
                )
            });

            if !event.is_snapped(axis) {
                let options = SnapOptions::offset(offset).with_bounds(constraints);
                self.snap_event(event, axis, &options)?;
            }
        }

        Ok(())
    }
}

impl Default for GridSnapping {
    fn default() -> Self {
        Self::new(&GridSnappingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::*;
    use crate::types::Trbl;

    fn snapping() -> GridSnapping {
        GridSnapping::default()
    }

    fn no_elements() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn spacing_is_ten() {
        assert_eq!(snapping().grid_spacing(), 10.0);
    }

    #[test]
    fn snap_value_rounds_half_up() {
        let s = snapping();
        assert_eq!(s.snap_value(14.0, &SnapOptions::default()), 10.0);
        assert_eq!(s.snap_value(15.0, &SnapOptions::default()), 20.0);
        assert_eq!(s.snap_value(-15.0, &SnapOptions::default()), -10.0);
    }

    #[test]
    fn snap_value_clamps_to_inner_grid_lines() {
        let s = snapping();
        let options = SnapOptions { min: Some(23.0), max: Some(77.0), ..Default::default() };
        assert_eq!(s.snap_value(0.0, &options), 30.0);
        assert_eq!(s.snap_value(100.0, &options), 70.0);
        assert_eq!(s.snap_value(52.0, &options), 50.0);
    }

    #[test]
    fn snap_value_honors_zero_bounds() {
        let s = snapping();
        let options = SnapOptions { min: Some(0.0), ..Default::default() };
        assert_eq!(s.snap_value(-30.0, &options), 0.0);
    }

    #[test]
    fn snap_value_with_offset_and_bounds() {
        let s = snapping();
        let options = SnapOptions { offset: Some(5.0), min: Some(0.0), max: None };
        // value + offset = 7 -> 10, min + offset = 5 -> 10, minus offset
        assert_eq!(s.snap_value(2.0, &options), 5.0);
    }

    #[test]
    fn snap_event_updates_delta() {
        let s = snapping();
        let mut event = SnapEvent::new(43.0, 0.0).with_delta(13.0, 0.0);
        s.snap_event(&mut event, Axis::X, &SnapOptions::default()).unwrap();
        assert_eq!(event.x, 40.0);
        assert_eq!(event.dx, 10.0);
        assert!(event.is_snapped(Axis::X));
    }

    #[test]
    fn handle_snaps_both_axes() {
        let s = snapping();
        let mut gesture = GestureContext::new();
        let mut event = SnapEvent::new(43.0, 57.0);
        s.handle(&mut event, &mut gesture, &no_elements()).unwrap();
        assert_eq!((event.x, event.y), (40.0, 60.0));
        assert!(event.is_fully_snapped());
    }

    #[test]
    fn handle_skips_already_snapped_axis() {
        let s = snapping();
        let mut gesture = GestureContext::new();
        let mut event = SnapEvent::new(43.0, 57.0);
        event.set_snapped(Axis::X, Snap::To(43.0)).unwrap();
        s.handle(&mut event, &mut gesture, &no_elements()).unwrap();
        assert_eq!((event.x, event.y), (43.0, 60.0));
    }

    #[test]
    fn handle_resnaps_released_axis() {
        let s = snapping();
        let mut gesture = GestureContext::new();
        let mut event = SnapEvent::new(43.0, 57.0);
        event.set_snapped(Axis::X, Snap::Release).unwrap();
        s.handle(&mut event, &mut gesture, &no_elements()).unwrap();
        assert_eq!(event.x, 40.0);
    }

    #[test]
    fn inactive_or_bypassed_events_pass_through() {
        let mut s = snapping();
        let mut gesture = GestureContext::new();

        let mut bypassed = SnapEvent::new(43.0, 57.0).with_bypass(true);
        s.handle(&mut bypassed, &mut gesture, &no_elements()).unwrap();
        assert_eq!((bypassed.x, bypassed.y), (43.0, 57.0));

        s.set_active(false);
        let mut event = SnapEvent::new(43.0, 57.0);
        s.handle(&mut event, &mut gesture, &no_elements()).unwrap();
        assert_eq!((event.x, event.y), (43.0, 57.0));
        assert_eq!(event.snapped, SnapState::default());
    }

    #[test]
    fn handle_respects_create_constraints() {
        let s = snapping();
        let mut gesture =
            GestureContext::new().with_create_constraints(Trbl::new(0.0, 100.0, 100.0, 0.0));
        let mut event = SnapEvent::new(180.0, -20.0);
        s.handle(&mut event, &mut gesture, &no_elements()).unwrap();
        assert_eq!((event.x, event.y), (100.0, 0.0));
    }

    #[test]
    fn listeners_run_in_order_on_every_set() {
        let mut s = snapping();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        s.on_active_changed(move |active| first.borrow_mut().push(("first", active)));
        let second = Rc::clone(&seen);
        let id = s.on_active_changed(move |active| second.borrow_mut().push(("second", active)));

        s.set_active(true);
        s.toggle_active();
        assert!(!s.is_active());
        assert_eq!(
            *seen.borrow(),
            vec![("first", true), ("second", true), ("first", false), ("second", false)]
        );

        assert!(s.remove_listener(id));
        assert!(!s.remove_listener(id));
        s.toggle_active();
        assert_eq!(seen.borrow().len(), 5);
    }

    #[test]
    fn custom_spacing() {
        let spacing = Spacing::try_new(25.0).unwrap();
        let s = GridSnapping::new(&GridSnappingConfig { spacing, ..Default::default() });
        assert_eq!(s.grid_spacing(), 25.0);
        assert_eq!(s.snap_value(60.0, &SnapOptions::default()), 50.0);
        assert_eq!(s.snap_value(63.0, &SnapOptions::default()), 75.0);
    }

    #[test]
    fn config_can_start_inactive() {
        let s = GridSnapping::new(&GridSnappingConfig { active: false, ..Default::default() });
        assert!(!s.is_active());
    }
}
