//! The visible grid behind the canvas.

use std::cell::RefCell;
use std::rc::Rc;

use super::{GridSnapping, ListenerId, RoundingMode, quantize};
use crate::defaults::GRID_EXTENT;
use crate::layout::bounds_mid;
use crate::types::{Rect, Spacing};

/// A fixed-size grid pattern kept centered on the viewport.
///
/// The pattern covers [`GRID_EXTENT`] units in each direction and is moved
/// in whole grid steps, so its lines stay put while the viewport scrolls.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    visible: bool,
    spacing: Spacing,
    rect: Rect,
}

impl Grid {
    pub fn new(spacing: Spacing, viewbox: &Rect) -> Self {
        let mut grid = Grid {
            visible: true,
            spacing,
            rect: Rect::default(),
        };
        grid.set_viewbox(viewbox);
        grid
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the grid; `None` flips the current state.
    /// Returns whether the visibility changed.
    pub fn toggle(&mut self, visible: Option<bool>) -> bool {
        let visible = visible.unwrap_or(!self.visible);
        if visible == self.visible {
            return false;
        }
        crate::log::trace!(visible, "grid visibility");
        self.visible = visible;
        true
    }

    /// Where the grid pattern goes for `viewbox`.
    pub fn placement(&self, viewbox: &Rect) -> Rect {
        let mid = bounds_mid(viewbox);
        let spacing = self.spacing.get();
        let half = GRID_EXTENT / 2.0;

        Rect::new(
            quantize(mid.x, spacing, RoundingMode::Round) - half,
            quantize(mid.y, spacing, RoundingMode::Round) - half,
            GRID_EXTENT,
            GRID_EXTENT,
        )
    }

    /// Recenter the grid after the viewport moved.
    pub fn set_viewbox(&mut self, viewbox: &Rect) {
        self.rect = self.placement(viewbox);
    }

    /// Current placement of the grid pattern.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Keep `grid` visible exactly while `snapping` is active.
    pub fn attach(grid: &Rc<RefCell<Grid>>, snapping: &mut GridSnapping) -> ListenerId {
        grid.borrow_mut().toggle(Some(snapping.is_active()));

        let grid = Rc::clone(grid);
        snapping.on_active_changed(move |active| {
            grid.borrow_mut().toggle(Some(active));
        })
    }
}
