//! Parsing of SVG path data (`d` attributes) into [`PathCommand`]s.
//!
//! Only the move, line, horizontal, vertical, curve and smooth curve
//! commands are understood. Letters are case-insensitive and operands are
//! taken as written. Any other letter degrades to a line.
use std::sync::LazyLock;

use kurbo::Point;
use regex::Regex;

use crate::{
    common::{parse_number, CommandKind, PathCommand},
    Svg2SfdError,
};

static COMMAND_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"([a-zA-Z])").unwrap()
});
static NEGATIVE_AFTER_DIGIT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"([0-9])-").unwrap()
});
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    // Close markers are separators too: contours are split before parsing.
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"[\s,zZ]+").unwrap()
});
static CONTOUR_END: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"[zZ]").unwrap()
});

/// A path command letter as written in the source, before `h`, `v` and `s`
/// are resolved into the segment kinds of [`CommandKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Letter {
    Move,
    Line,
    Horizontal,
    Vertical,
    Curve,
    SmoothCurve,
}

impl Letter {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'm' => Some(Letter::Move),
            'l' => Some(Letter::Line),
            'h' => Some(Letter::Horizontal),
            'v' => Some(Letter::Vertical),
            'c' => Some(Letter::Curve),
            's' => Some(Letter::SmoothCurve),
            _ => None,
        }
    }

    fn arity(&self) -> usize {
        match self {
            Letter::Move | Letter::Line => 2,
            Letter::Horizontal | Letter::Vertical => 1,
            Letter::Curve => 6,
            Letter::SmoothCurve => 4,
        }
    }

    fn as_char(&self) -> char {
        match self {
            Letter::Move => 'm',
            Letter::Line => 'l',
            Letter::Horizontal => 'h',
            Letter::Vertical => 'v',
            Letter::Curve => 'c',
            Letter::SmoothCurve => 's',
        }
    }
}

/// Split path data into flat tokens: single command letters and numbers.
fn tokenize(d: &str) -> Vec<String> {
    let spaced = COMMAND_LETTER.replace_all(d, " ${1} ");
    let spaced = NEGATIVE_AFTER_DIGIT.replace_all(&spaced, "${1} -");
    SEPARATOR
        .split(&spaced)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn as_letter_token(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

/// Parser state threaded through the token stream: the letter that bare
/// operand runs repeat, and the commands emitted so far.
struct PathParser {
    letter: Letter,
    commands: Vec<PathCommand>,
}

impl PathParser {
    fn new() -> Self {
        PathParser {
            letter: Letter::Line,
            commands: vec![],
        }
    }

    /// Consume one command (and its letter, if present) from the front of
    /// `tokens`, returning the unconsumed remainder.
    fn step<'a>(&mut self, tokens: &'a [String]) -> Result<&'a [String], Svg2SfdError> {
        let operands = match tokens.first().and_then(|t| as_letter_token(t)) {
            Some(c) => {
                self.letter = Letter::from_char(c).unwrap_or_else(|| {
                    log::debug!("Unsupported path command '{}', treating as a line", c);
                    Letter::Line
                });
                &tokens[1..]
            }
            None => tokens,
        };
        if operands.is_empty() {
            // A trailing letter with nothing after it
            return Ok(operands);
        }
        let arity = self.letter.arity();
        if operands.len() < arity {
            return Err(Svg2SfdError::MissingOperands {
                command: self.letter.as_char(),
                expected: arity,
                found: operands.len(),
            });
        }
        let (taken, rest) = operands.split_at(arity);
        let values = taken
            .iter()
            .map(|t| parse_number(t))
            .collect::<Result<Vec<f64>, _>>()?;
        let command = self.resolve(values)?;
        self.commands.push(command);
        Ok(rest)
    }

    fn current_point(&self) -> Result<Point, Svg2SfdError> {
        self.commands
            .last()
            .map(|c| c.end_point())
            .ok_or(Svg2SfdError::NoCurrentPoint {
                command: self.letter.as_char(),
            })
    }

    /// Turn the operands of the current letter into a move, line or curve.
    fn resolve(&self, values: Vec<f64>) -> Result<PathCommand, Svg2SfdError> {
        match self.letter {
            Letter::Move => PathCommand::new(CommandKind::Move, values),
            Letter::Line => PathCommand::new(CommandKind::Line, values),
            Letter::Curve => PathCommand::new(CommandKind::Curve, values),
            Letter::Horizontal => {
                let current = self.current_point()?;
                Ok(PathCommand::line_to(Point::new(values[0], current.y)))
            }
            Letter::Vertical => {
                let current = self.current_point()?;
                Ok(PathCommand::line_to(Point::new(current.x, values[0])))
            }
            Letter::SmoothCurve => {
                let current = self.current_point()?;
                let first_control = self
                    .commands
                    .last()
                    .and_then(|c| c.last_control())
                    .map(|c| current + (current - c))
                    .unwrap_or(current);
                Ok(PathCommand::curve_to(
                    first_control,
                    Point::new(values[0], values[1]),
                    Point::new(values[2], values[3]),
                ))
            }
        }
    }
}

/// Parse one contour's worth of path data into absolute segment commands.
pub fn parse_path(d: &str) -> Result<Vec<PathCommand>, Svg2SfdError> {
    let tokens = tokenize(d);
    let mut parser = PathParser::new();
    let mut rest = tokens.as_slice();
    while !rest.is_empty() {
        rest = parser.step(rest)?;
    }
    Ok(parser.commands)
}

/// Split path data on its close markers and parse each non-empty piece as
/// its own contour.
pub fn parse_contours(d: &str) -> Result<Vec<Vec<PathCommand>>, Svg2SfdError> {
    CONTOUR_END
        .split(d)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(parse_path)
        .collect()
}
