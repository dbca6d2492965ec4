//! Error types with diagnostics using miette
//!
//! Path syntax errors carry the source text and a span so they render as
//! annotated snippets. Snap errors are precondition violations raised by the
//! event-writing helpers.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::Axis;

// ============================================================================
// Path Errors
// ============================================================================

/// Errors from the strict path parsing API.
///
/// The lenient [`crate::path::PathNormalizer`] never surfaces these; it logs
/// and falls back to a single-point path instead.
#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error("invalid path data: {message}")]
    #[diagnostic(
        code(gridpath::path::syntax),
        help("path data is a sequence of command letters (MLHVCSQTAZ, upper or lower case) followed by numbers")
    )]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("could not read past here")]
        span: SourceSpan,
    },

    #[error("command '{command}' takes {expected} arguments, got {got}")]
    #[diagnostic(code(gridpath::path::arity))]
    Arity {
        command: char,
        expected: usize,
        got: usize,
    },

    #[error("unknown path command '{command}'")]
    #[diagnostic(
        code(gridpath::path::unknown_command),
        help("known commands are M, L, H, V, C, S, Q, T, A and Z")
    )]
    UnknownCommand { command: char },
}

impl PathError {
    /// Build a syntax error pointing at `offset` within `source`.
    pub(crate) fn syntax(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(source.len());
        let len = if offset < source.len() { 1 } else { 0 };
        PathError::Syntax {
            message: message.into(),
            src: NamedSource::new("<path>", source.to_string()),
            span: (offset, len).into(),
        }
    }
}

// ============================================================================
// Snap Errors
// ============================================================================

/// Precondition violations when writing snap results into an event.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SnapError {
    #[error("axis must be in [x, y], got {name:?}")]
    #[diagnostic(code(gridpath::snap::invalid_axis))]
    InvalidAxis { name: String },

    #[error("resize direction must be one of n, ne, e, se, s, sw, w, nw, got {name:?}")]
    #[diagnostic(code(gridpath::snap::invalid_direction))]
    InvalidDirection { name: String },

    #[error("snapped value for axis {axis} must be a finite number, got {value}")]
    #[diagnostic(
        code(gridpath::snap::non_finite_value),
        help("use Snap::Release to mark an axis as explicitly unsnapped")
    )]
    NonFiniteValue { axis: Axis, value: f64 },
}
