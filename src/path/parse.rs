//! Tokenize path data with the pest grammar in `path.pest`.

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::{CommandKind, PathCommand, Segment};
use crate::errors::PathError;

#[derive(Parser)]
#[grammar = "path.pest"]
struct PathDataParser;

/// Tokenize SVG path data into commands.
///
/// Arguments are consumed in chunks of the command's arity; a trailing
/// incomplete chunk is dropped. A move followed by more than one coordinate
/// pair continues as implicit line commands. Unknown command letters are
/// skipped.
///
/// ```
/// use gridpath::path::{parse_path_string, PathCommand};
///
/// let commands = parse_path_string("M0,0 10,10 20,0").unwrap();
/// assert_eq!(commands, vec![
///     PathCommand::move_to(0.0, 0.0),
///     PathCommand::line_to(10.0, 10.0),
///     PathCommand::line_to(20.0, 0.0),
/// ]);
/// ```
pub fn parse_path_string(source: &str) -> Result<Vec<PathCommand>, PathError> {
    let pairs = PathDataParser::parse(Rule::path, source).map_err(|e| {
        let offset = match e.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        PathError::syntax(source, offset, "unexpected character")
    })?;

    let mut commands = Vec::new();
    for pair in pairs.flat_map(|p| p.into_inner()) {
        if pair.as_rule() == Rule::command {
            parse_command(source, pair, &mut commands)?;
        }
    }
    Ok(commands)
}

fn parse_command(
    source: &str,
    pair: Pair<'_, Rule>,
    out: &mut Vec<PathCommand>,
) -> Result<(), PathError> {
    let mut inner = pair.into_inner();
    let Some(letter) = inner.next().and_then(|p| p.as_str().chars().next()) else {
        return Ok(());
    };

    let mut args = Vec::new();
    for number in inner {
        let value = number.as_str().parse::<f64>().map_err(|_| {
            PathError::syntax(source, number.as_span().start(), "invalid number")
        })?;
        args.push(value);
    }

    let Some(mut kind) = CommandKind::from_letter(letter) else {
        crate::log::debug!(%letter, "skipping unknown path command");
        return Ok(());
    };
    let relative = letter.is_ascii_lowercase();
    let mut args = args.as_slice();

    if kind == CommandKind::Close {
        out.push(PathCommand { segment: Segment::Close, relative });
        return Ok(());
    }

    if kind == CommandKind::MoveTo && args.len() > 2 {
        out.push(PathCommand {
            segment: Segment::from_args(kind, &args[..2]),
            relative,
        });
        args = &args[2..];
        kind = CommandKind::LineTo;
    }

    for chunk in args.chunks_exact(kind.arity()) {
        out.push(PathCommand {
            segment: Segment::from_args(kind, chunk),
            relative,
        });
    }
    Ok(())
}
