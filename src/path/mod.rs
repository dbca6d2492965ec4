//! Path descriptions and their canonical cubic form.
//!
//! Callers describe paths either as SVG path data (`"M0,0L100,100"`) or as a
//! sequence of already tokenized [`PathCommand`]s. Both are resolved once,
//! through [`PathNormalizer`], into a [`CanonicalPath`]: absolute `MoveTo`
//! and `CubicTo` segments only. Everything downstream (bounding boxes,
//! intersections, cropping) works on the canonical form.

mod absolute;
mod arc;
mod lower;
mod normalizer;
mod parse;

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;

use glam::dvec2;

use crate::curve::CubicBezier;
use crate::errors::PathError;
use crate::types::Point;

pub use absolute::to_absolute;
pub use arc::arc_to_cubics;
pub use lower::lower_to_cubics;
pub use normalizer::{CacheStats, NormalizerConfig, PathNormalizer, normalize_uncached};
pub use parse::parse_path_string;

/// The command letters of the path mini-language, without case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    Horizontal,
    Vertical,
    CubicTo,
    SmoothCubicTo,
    QuadTo,
    SmoothQuadTo,
    Arc,
    Close,
}

impl CommandKind {
    /// Look up a command letter (either case).
    pub fn from_letter(letter: char) -> Option<Self> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::Horizontal,
            'V' => CommandKind::Vertical,
            'C' => CommandKind::CubicTo,
            'S' => CommandKind::SmoothCubicTo,
            'Q' => CommandKind::QuadTo,
            'T' => CommandKind::SmoothQuadTo,
            'A' => CommandKind::Arc,
            'Z' => CommandKind::Close,
            _ => return None,
        };
        Some(kind)
    }

    /// Number of numeric arguments one instance of the command takes.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::Arc => 7,
            CommandKind::CubicTo => 6,
            CommandKind::SmoothCubicTo | CommandKind::QuadTo => 4,
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadTo => 2,
            CommandKind::Horizontal | CommandKind::Vertical => 1,
            CommandKind::Close => 0,
        }
    }

    /// The letter for this command, upper case for absolute coordinates.
    pub fn letter(self, relative: bool) -> char {
        let upper = match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::Horizontal => 'H',
            CommandKind::Vertical => 'V',
            CommandKind::CubicTo => 'C',
            CommandKind::SmoothCubicTo => 'S',
            CommandKind::QuadTo => 'Q',
            CommandKind::SmoothQuadTo => 'T',
            CommandKind::Arc => 'A',
            CommandKind::Close => 'Z',
        };
        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }
}

/// Elliptical arc parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcTo {
    pub rx: f64,
    pub ry: f64,
    /// x-axis rotation in degrees
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// One drawing command with its arguments.
///
/// Coordinates are absolute or relative depending on the owning
/// [`PathCommand`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    Horizontal(f64),
    Vertical(f64),
    CubicTo { c1: Point, c2: Point, to: Point },
    SmoothCubicTo { c2: Point, to: Point },
    QuadTo { c: Point, to: Point },
    SmoothQuadTo(Point),
    Arc(ArcTo),
    Close,
}

impl Segment {
    pub fn kind(&self) -> CommandKind {
        match self {
            Segment::MoveTo(_) => CommandKind::MoveTo,
            Segment::LineTo(_) => CommandKind::LineTo,
            Segment::Horizontal(_) => CommandKind::Horizontal,
            Segment::Vertical(_) => CommandKind::Vertical,
            Segment::CubicTo { .. } => CommandKind::CubicTo,
            Segment::SmoothCubicTo { .. } => CommandKind::SmoothCubicTo,
            Segment::QuadTo { .. } => CommandKind::QuadTo,
            Segment::SmoothQuadTo(_) => CommandKind::SmoothQuadTo,
            Segment::Arc(_) => CommandKind::Arc,
            Segment::Close => CommandKind::Close,
        }
    }

    /// Build a segment from exactly `kind.arity()` arguments.
    fn from_args(kind: CommandKind, a: &[f64]) -> Segment {
        debug_assert_eq!(a.len(), kind.arity());
        match kind {
            CommandKind::MoveTo => Segment::MoveTo(dvec2(a[0], a[1])),
            CommandKind::LineTo => Segment::LineTo(dvec2(a[0], a[1])),
            CommandKind::Horizontal => Segment::Horizontal(a[0]),
            CommandKind::Vertical => Segment::Vertical(a[0]),
            CommandKind::CubicTo => Segment::CubicTo {
                c1: dvec2(a[0], a[1]),
                c2: dvec2(a[2], a[3]),
                to: dvec2(a[4], a[5]),
            },
            CommandKind::SmoothCubicTo => Segment::SmoothCubicTo {
                c2: dvec2(a[0], a[1]),
                to: dvec2(a[2], a[3]),
            },
            CommandKind::QuadTo => Segment::QuadTo {
                c: dvec2(a[0], a[1]),
                to: dvec2(a[2], a[3]),
            },
            CommandKind::SmoothQuadTo => Segment::SmoothQuadTo(dvec2(a[0], a[1])),
            CommandKind::Arc => Segment::Arc(ArcTo {
                rx: a[0],
                ry: a[1],
                rotation: a[2],
                large_arc: a[3] != 0.0,
                sweep: a[4] != 0.0,
                to: dvec2(a[5], a[6]),
            }),
            CommandKind::Close => Segment::Close,
        }
    }

    /// The numeric arguments, in path data order.
    pub fn args(&self) -> Vec<f64> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) | Segment::SmoothQuadTo(p) => vec![p.x, p.y],
            Segment::Horizontal(v) | Segment::Vertical(v) => vec![v],
            Segment::CubicTo { c1, c2, to } => vec![c1.x, c1.y, c2.x, c2.y, to.x, to.y],
            Segment::SmoothCubicTo { c2: c, to } | Segment::QuadTo { c, to } => {
                vec![c.x, c.y, to.x, to.y]
            }
            Segment::Arc(a) => vec![
                a.rx,
                a.ry,
                a.rotation,
                flag(a.large_arc),
                flag(a.sweep),
                a.to.x,
                a.to.y,
            ],
            Segment::Close => Vec::new(),
        }
    }
}

/// A tokenized path command: a segment plus whether its coordinates are
/// relative to the current point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCommand {
    pub segment: Segment,
    pub relative: bool,
}

impl PathCommand {
    pub fn absolute(segment: Segment) -> Self {
        PathCommand { segment, relative: false }
    }

    pub fn relative(segment: Segment) -> Self {
        PathCommand { segment, relative: true }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Self::absolute(Segment::MoveTo(dvec2(x, y)))
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        Self::absolute(Segment::LineTo(dvec2(x, y)))
    }

    pub fn curve_to(c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        Self::absolute(Segment::CubicTo {
            c1: dvec2(c1x, c1y),
            c2: dvec2(c2x, c2y),
            to: dvec2(x, y),
        })
    }

    pub fn close() -> Self {
        Self::absolute(Segment::Close)
    }

    /// Build a command from the `[letter, ...args]` form.
    ///
    /// ```
    /// use gridpath::path::PathCommand;
    ///
    /// let cmd = PathCommand::from_parts('l', &[10.0, 5.0]).unwrap();
    /// assert!(cmd.relative);
    /// assert_eq!(cmd.to_string(), "l10,5");
    /// ```
    pub fn from_parts(letter: char, args: &[f64]) -> Result<Self, PathError> {
        let kind =
            CommandKind::from_letter(letter).ok_or(PathError::UnknownCommand { command: letter })?;
        if args.len() != kind.arity() {
            return Err(PathError::Arity {
                command: letter,
                expected: kind.arity(),
                got: args.len(),
            });
        }
        Ok(PathCommand {
            segment: Segment::from_args(kind, args),
            relative: letter.is_ascii_lowercase(),
        })
    }

    pub fn letter(&self) -> char {
        self.segment.kind().letter(self.relative)
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        write_args(f, &self.segment.args())
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[f64]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

/// A path as handed to the engines: raw path data or tokenized commands.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSpec {
    Raw(String),
    Segments(Vec<PathCommand>),
}

impl PathSpec {
    /// The tokenized commands. Raw data that fails to tokenize yields no
    /// commands (and a warning).
    pub fn commands(&self) -> Cow<'_, [PathCommand]> {
        match self {
            PathSpec::Segments(commands) => Cow::Borrowed(commands.as_slice()),
            PathSpec::Raw(source) => match parse_path_string(source) {
                Ok(commands) => Cow::Owned(commands),
                Err(_err) => {
                    crate::log::warn!(error = %_err, source = source.as_str(), "unreadable path data");
                    Cow::Owned(Vec::new())
                }
            },
        }
    }
}

impl From<&str> for PathSpec {
    fn from(s: &str) -> Self {
        PathSpec::Raw(s.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(s: String) -> Self {
        PathSpec::Raw(s)
    }
}

impl From<Vec<PathCommand>> for PathSpec {
    fn from(commands: Vec<PathCommand>) -> Self {
        PathSpec::Segments(commands)
    }
}

impl From<&[PathCommand]> for PathSpec {
    fn from(commands: &[PathCommand]) -> Self {
        PathSpec::Segments(commands.to_vec())
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Raw(s) => write!(f, "{}", s),
            PathSpec::Segments(commands) => {
                for cmd in commands {
                    write!(f, "{}", cmd)?;
                }
                Ok(())
            }
        }
    }
}

/// A segment of a canonical path. Coordinates are absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanonicalSegment {
    MoveTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
}

impl CanonicalSegment {
    /// Where the segment leaves the current point.
    pub fn end(&self) -> Point {
        match *self {
            CanonicalSegment::MoveTo(p) => p,
            CanonicalSegment::CubicTo { to, .. } => to,
        }
    }

    /// A cubic whose control points coincide with its endpoints.
    pub fn line(from: Point, to: Point) -> Self {
        CanonicalSegment::CubicTo { c1: from, c2: to, to }
    }
}

/// A path made only of absolute `MoveTo` and `CubicTo` segments.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPath(Vec<CanonicalSegment>);

impl CanonicalPath {
    pub fn new(segments: Vec<CanonicalSegment>) -> Self {
        CanonicalPath(segments)
    }

    /// The single-point path returned for empty or unreadable input.
    pub fn origin() -> Self {
        CanonicalPath(vec![CanonicalSegment::MoveTo(Point::ZERO)])
    }

    pub fn segments(&self) -> &[CanonicalSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every cubic with its index in [`segments`](Self::segments), starting
    /// from the running current point (the origin before any move).
    pub fn cubics(&self) -> impl Iterator<Item = (usize, CubicBezier)> + '_ {
        let mut current = Point::ZERO;
        self.0.iter().enumerate().filter_map(move |(index, segment)| match *segment {
            CanonicalSegment::MoveTo(p) => {
                current = p;
                None
            }
            CanonicalSegment::CubicTo { c1, c2, to } => {
                let cubic = CubicBezier::new(current, c1, c2, to);
                current = to;
                Some((index, cubic))
            }
        })
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            match *segment {
                CanonicalSegment::MoveTo(p) => {
                    write!(f, "M")?;
                    write_args(f, &[p.x, p.y])?;
                }
                CanonicalSegment::CubicTo { c1, c2, to } => {
                    write!(f, "C")?;
                    write_args(f, &[c1.x, c1.y, c2.x, c2.y, to.x, to.y])?;
                }
            }
        }
        Ok(())
    }
}

thread_local! {
    static NORMALIZER: RefCell<PathNormalizer> = RefCell::new(PathNormalizer::new());
}

/// Run `f` with this thread's shared normalizer.
pub(crate) fn with_thread_normalizer<R>(f: impl FnOnce(&mut PathNormalizer) -> R) -> R {
    NORMALIZER.with_borrow_mut(f)
}

/// Normalize a path using this thread's shared, memoizing normalizer.
pub fn normalize_path(spec: impl Into<PathSpec>) -> CanonicalPath {
    let spec = spec.into();
    with_thread_normalizer(|normalizer| normalizer.normalize(&spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_from_parts_checks_arity() {
        assert!(matches!(
            PathCommand::from_parts('C', &[1.0, 2.0]),
            Err(PathError::Arity { command: 'C', expected: 6, got: 2 })
        ));
        assert!(matches!(
            PathCommand::from_parts('X', &[]),
            Err(PathError::UnknownCommand { command: 'X' })
        ));
    }

    #[test]
    fn arc_flags_round_trip_through_display() {
        let cmd = PathCommand::from_parts('a', &[5.0, 5.0, 30.0, 1.0, 0.0, 10.0, 0.0]).unwrap();
        assert_eq!(cmd.to_string(), "a5,5,30,1,0,10,0");
    }

    #[test]
    fn segments_spec_displays_as_path_data() {
        let spec = PathSpec::from(vec![PathCommand::move_to(0.0, 100.0), PathCommand::line_to(100.0, 0.0)]);
        assert_eq!(spec.to_string(), "M0,100L100,0");
    }

    #[test]
    fn cubics_skip_moves_and_track_current_point() {
        let path = CanonicalPath::new(vec![
            CanonicalSegment::MoveTo(dvec2(1.0, 1.0)),
            CanonicalSegment::line(dvec2(1.0, 1.0), dvec2(5.0, 1.0)),
            CanonicalSegment::MoveTo(dvec2(9.0, 9.0)),
            CanonicalSegment::line(dvec2(9.0, 9.0), dvec2(9.0, 0.0)),
        ]);
        let cubics: Vec<_> = path.cubics().collect();
        assert_eq!(cubics.len(), 2);
        assert_eq!(cubics[0].0, 1);
        assert_eq!(cubics[0].1.p0, dvec2(1.0, 1.0));
        assert_eq!(cubics[1].0, 3);
        assert_eq!(cubics[1].1.p0, dvec2(9.0, 9.0));
    }

    #[test]
    fn thread_normalizer_memoizes() {
        let before = with_thread_normalizer(|n| n.stats());
        normalize_path("M3,3L7,7");
        normalize_path("M3,3L7,7");
        let after = with_thread_normalizer(|n| n.stats());
        assert!(after.hits > before.hits);
    }
}
