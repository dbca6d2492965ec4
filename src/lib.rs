//! Geometry engines for interactive diagram editors.
//!
//! - [`path`] turns SVG path data into a canonical list of absolute cubic
//!   Béziers, with an LRU cache in front.
//! - [`intersect`] finds where two paths cross and picks the point where a
//!   connection is cropped at a shape outline.
//! - [`snap`] snaps pointer events of create, move and resize gestures onto
//!   a grid, honoring shape offsets and min/max bounds.
//! - [`layout`] has the small point and rectangle helpers the editor uses
//!   around those.
//!
//! ```
//! use gridpath::{count_path_intersections, element_line_intersection};
//!
//! let square = "M0,0 L100,0 L100,100 L0,100 Z";
//! assert_eq!(count_path_intersections(square, "M-50,50 L150,50"), 2);
//!
//! let crop = element_line_intersection(square, "M50,50 L200,50", true).unwrap();
//! assert_eq!((crop.x, crop.y), (100.0, 50.0));
//! ```

pub mod curve;
pub mod defaults;
pub mod errors;
pub mod intersect;
pub mod layout;
mod log;
pub mod path;
pub mod snap;
pub mod types;

pub use errors::{PathError, SnapError};
pub use intersect::{
    Intersection, IntersectionEngine, count_path_intersections, element_line_intersection,
    find_path_intersections,
};
pub use path::{CanonicalPath, PathCommand, PathNormalizer, PathSpec, normalize_path};
pub use snap::{GestureContext, Grid, GridSnapping, GridSnappingConfig, SnapEvent, SnapOptions};
pub use types::{Axis, Point, Rect, Trbl};
