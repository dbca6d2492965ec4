//! Default sizes and tuning constants (diagram units unless noted)

use crate::types::Spacing;

/// Distance between grid dots.
pub const SPACING: Spacing = Spacing::new(10.0);

/// Target length of one polyline step when flattening a curve.
pub const POLYLINE_STEP: f64 = 5.0;
/// A polyline segment whose x extent is below this is treated as vertical.
pub const VERTICAL_EPSILON: f64 = 0.01;
/// Decimal digits in the key used to drop duplicate hits.
pub const DEDUP_DIGITS: usize = 9;
/// Floating results are rounded to this many decimal places.
pub const FIX_ERROR_SCALE: f64 = 1e11;
/// Leading coefficients below this are treated as zero when solving.
pub const ROOT_EPSILON: f64 = 1e-12;
/// Largest arc sweep (degrees) covered by a single cubic.
pub const MAX_ARC_SWEEP_DEG: f64 = 120.0;

/// Normalized paths kept by a [`crate::path::PathNormalizer`].
pub const NORMALIZER_CACHE_CAPACITY: usize = 1000;

/// Two crop candidates closer than this count as one.
pub const CROP_MERGE_DISTANCE: f64 = 1.0;

/// Points within this distance on an axis count as aligned.
pub const ALIGNED_THRESHOLD: f64 = 2.0;
/// Default accuracy of [`crate::layout::points_on_line`].
pub const ON_LINE_ACCURACY: f64 = 5.0;
/// Default tolerance of [`crate::layout::snap_to`].
pub const SNAP_TO_TOLERANCE: f64 = 10.0;

/// Width and height of the grid overlay rectangle.
pub const GRID_EXTENT: f64 = 100_000.0;
