use kurbo::Point;

use crate::Svg2SfdError;

/// Trailing flag written after the segment letter of every spline line.
///
/// FontForge reads it as point flags; it is always `1` here and never computed.
pub const SEGMENT_FLAG: u8 = 1;

/// The segment kinds that survive path parsing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommandKind {
    Move,
    Line,
    Curve,
}

impl CommandKind {
    /// Number of coordinate operands a command of this kind carries.
    pub fn arity(&self) -> usize {
        match self {
            CommandKind::Move | CommandKind::Line => 2,
            CommandKind::Curve => 6,
        }
    }

    /// The lowercase letter used for this kind in SFD spline sets.
    pub fn letter(&self) -> char {
        match self {
            CommandKind::Move => 'm',
            CommandKind::Line => 'l',
            CommandKind::Curve => 'c',
        }
    }
}

/// One absolute-coordinate outline segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    operands: Vec<f64>,
    pub flags: u8,
}

impl PathCommand {
    /// Build a command, checking the operand count against the kind's arity.
    pub fn new(kind: CommandKind, operands: Vec<f64>) -> Result<Self, Svg2SfdError> {
        if operands.len() != kind.arity() {
            return Err(Svg2SfdError::MissingOperands {
                command: kind.letter(),
                expected: kind.arity(),
                found: operands.len(),
            });
        }
        Ok(PathCommand {
            kind,
            operands,
            flags: SEGMENT_FLAG,
        })
    }

    pub fn move_to(p: Point) -> Self {
        PathCommand {
            kind: CommandKind::Move,
            operands: vec![p.x, p.y],
            flags: SEGMENT_FLAG,
        }
    }

    pub fn line_to(p: Point) -> Self {
        PathCommand {
            kind: CommandKind::Line,
            operands: vec![p.x, p.y],
            flags: SEGMENT_FLAG,
        }
    }

    pub fn curve_to(c1: Point, c2: Point, end: Point) -> Self {
        PathCommand {
            kind: CommandKind::Curve,
            operands: vec![c1.x, c1.y, c2.x, c2.y, end.x, end.y],
            flags: SEGMENT_FLAG,
        }
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    /// The operands taken as (x, y) pairs.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.operands
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
    }

    /// The point this segment ends on.
    pub fn end_point(&self) -> Point {
        // Every kind has an even, non-zero arity, so there is always a last pair.
        let n = self.operands.len();
        Point::new(self.operands[n - 2], self.operands[n - 1])
    }

    /// For a curve, its second control point.
    pub fn last_control(&self) -> Option<Point> {
        match self.kind {
            CommandKind::Curve => self.points().nth(1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arity_is_checked() {
        let err = PathCommand::new(CommandKind::Curve, vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            Svg2SfdError::MissingOperands {
                command: 'c',
                expected: 6,
                found: 2
            }
        ));
        assert!(PathCommand::new(CommandKind::Line, vec![1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_points() {
        let curve = PathCommand::curve_to(
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 6.0),
        );
        assert_eq!(curve.points().count(), 3);
        assert_eq!(curve.end_point(), Point::new(5.0, 6.0));
        assert_eq!(curve.last_control(), Some(Point::new(3.0, 4.0)));
        assert_eq!(curve.flags, SEGMENT_FLAG);
        assert_eq!(PathCommand::move_to(Point::new(1.0, 1.0)).last_control(), None);
    }

    #[test]
    fn test_end_point_is_the_last_pair() {
        let cases = [
            (CommandKind::Move, vec![-1.0, 2.0], Point::new(-1.0, 2.0)),
            (CommandKind::Line, vec![0.0, 0.0], Point::ZERO),
            (
                CommandKind::Curve,
                vec![1.0, 2.0, 3.0, 4.0, -5.5, 0.0],
                Point::new(-5.5, 0.0),
            ),
        ];
        for (kind, operands, expected) in cases {
            let command = PathCommand::new(kind, operands).unwrap();
            assert_eq!(command.end_point(), expected, "{kind:?}");
        }
    }
}
