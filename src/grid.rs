//! Re-basing of document-absolute outlines into glyph space.
//!
//! Glyphs are drawn on a sprite sheet of 1000×1000 unit cells. Each contour
//! is moved from the cell that contains it to the origin, flipped to y-up
//! against an 800 unit baseline, and rendered as SFD spline lines.
use std::fmt;

use kurbo::{Point, Rect};

use crate::{
    common::{CommandKind, PathCommand, SEGMENT_FLAG},
    Svg2SfdError,
};

/// Width and height of one glyph cell, in source units.
pub const CELL_SIZE: u32 = 1000;

/// Source y coordinate (relative to the cell) that maps onto font y = 0 is
/// `BASELINE`; the flip is `y' = BASELINE - y`.
pub const BASELINE: f64 = 800.0;

/// Origin of a cell in source coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

impl GridCell {
    /// Whether `bounds` lies inside this cell. The far edges are exclusive.
    pub fn contains(&self, bounds: &Rect) -> bool {
        let (x, y) = (self.x as f64, self.y as f64);
        let size = CELL_SIZE as f64;
        bounds.x0 >= x && bounds.x1 < x + size && bounds.y0 >= y && bounds.y1 < y + size
    }
}

/// The cell layout of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: u32,
    pub rows: u32,
}

impl Grid {
    /// A grid with as many whole cells as fit in the document.
    pub fn for_document(width: u32, height: u32) -> Self {
        Grid {
            columns: width / CELL_SIZE,
            rows: height / CELL_SIZE,
        }
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| GridCell {
                x: column * CELL_SIZE,
                y: row * CELL_SIZE,
            })
        })
    }

    /// The cell that wholly contains `bounds`, if any.
    ///
    /// Cells do not overlap, so the only candidate is the one holding the
    /// near corner of `bounds`.
    pub fn locate(&self, bounds: &Rect) -> Option<GridCell> {
        if !(bounds.x0 >= 0.0 && bounds.y0 >= 0.0) {
            return None;
        }
        let size = CELL_SIZE as f64;
        let column = (bounds.x0 / size).floor();
        let row = (bounds.y0 / size).floor();
        if column >= self.columns as f64 || row >= self.rows as f64 {
            return None;
        }
        let cell = GridCell {
            x: column as u32 * CELL_SIZE,
            y: row as u32 * CELL_SIZE,
        };
        cell.contains(bounds).then_some(cell)
    }

    /// Move a contour into glyph space and render it as spline records,
    /// closed by a line back to its first point.
    pub fn normalize(&self, commands: &[PathCommand]) -> Result<Contour, Svg2SfdError> {
        let bounds = bounding_box(commands).ok_or(Svg2SfdError::EmptyContour)?;
        let cell = match self.locate(&bounds) {
            Some(cell) => {
                log::debug!("Contour {:?} sits in cell ({}, {})", bounds, cell.x, cell.y);
                cell
            }
            None => {
                if self.columns > 0 && self.rows > 0 {
                    log::warn!("Contour {:?} does not fit in any grid cell", bounds);
                }
                GridCell::default()
            }
        };

        let mut records: Vec<SplineRecord> = commands
            .iter()
            .map(|command| SplineRecord {
                coordinates: command
                    .points()
                    .flat_map(|p| {
                        let p = to_glyph_space(p, cell);
                        [format_number(p.x), format_number(p.y)]
                    })
                    .collect(),
                kind: command.kind,
                flags: command.flags,
            })
            .collect();
        if let Some(first) = records.first() {
            let closing = SplineRecord {
                kind: CommandKind::Line,
                flags: SEGMENT_FLAG,
                ..first.clone()
            };
            records.push(closing);
        }
        Ok(Contour { records })
    }
}

fn to_glyph_space(p: Point, cell: GridCell) -> Point {
    Point::new(p.x - cell.x as f64, BASELINE - (p.y - cell.y as f64))
}

/// The extent of every point of every command, control points included.
pub fn bounding_box(commands: &[PathCommand]) -> Option<Rect> {
    commands
        .iter()
        .flat_map(|c| c.points())
        .fold(None, |bounds: Option<Rect>, p| match bounds {
            Some(rect) => Some(rect.union_pt(p)),
            None => Some(Rect::from_points(p, p)),
        })
}

/// Render a coordinate with nine decimal places, then drop trailing zeros
/// and a trailing decimal point.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.9}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// One line of an SFD spline set: formatted coordinates, segment letter, flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineRecord {
    pub coordinates: Vec<String>,
    pub kind: CommandKind,
    pub flags: u8,
}

impl fmt::Display for SplineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for coordinate in &self.coordinates {
            write!(f, "{} ", coordinate)?;
        }
        write!(f, "{} {}", self.kind.letter(), self.flags)
    }
}

/// A normalized contour, including its closing record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub records: Vec<SplineRecord>,
}

impl Contour {
    /// The text lines of this contour; every line after the first is
    /// indented by one space.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.records.iter().enumerate().map(|(ix, record)| {
            if ix == 0 {
                record.to_string()
            } else {
                format!(" {}", record)
            }
        })
    }
}
