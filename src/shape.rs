use std::{f64::consts::SQRT_2, sync::LazyLock};

use kurbo::{Point, Vec2};
use regex::Regex;

use crate::{
    common::{parse_number, Element, PathCommand},
    path::parse_contours,
    Svg2SfdError,
};

/// Distance of a cubic Bézier control point from the on-curve point, as a
/// fraction of the radius, for a four-segment circle.
pub const CIRCLE_KAPPA: f64 = 4.0 * (SQRT_2 - 1.0) / 3.0;

static POINT_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"[\s,Z]+").unwrap()
});

/// A drawable child of a glyph group.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Raw `d` path data
    Path(String),
    Polygon(Vec<Point>),
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, radii: Vec2 },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Shape {
    /// Read a shape from an element. Elements that are not shapes give `None`.
    pub fn from_element(element: &Element) -> Result<Option<Shape>, Svg2SfdError> {
        let shape = match element.tag.as_str() {
            "path" => Shape::Path(element.require("d")?.to_string()),
            "polygon" => Shape::Polygon(parse_points(element)?),
            "circle" => Shape::Circle {
                center: Point::new(element.number("cx")?, element.number("cy")?),
                radius: element.number("r")?,
            },
            "ellipse" => Shape::Ellipse {
                center: Point::new(element.number("cx")?, element.number("cy")?),
                radii: Vec2::new(element.number("rx")?, element.number("ry")?),
            },
            "rect" => Shape::Rect {
                x: element.number("x")?,
                y: element.number("y")?,
                width: element.number("width")?,
                height: element.number("height")?,
            },
            _ => return Ok(None),
        };
        Ok(Some(shape))
    }

    /// The raw contours of this shape, in source coordinates.
    ///
    /// Paths may yield several contours (one per close marker); every other
    /// shape yields exactly one.
    pub fn contours(&self) -> Result<Vec<Vec<PathCommand>>, Svg2SfdError> {
        Ok(match self {
            Shape::Path(d) => parse_contours(d)?,
            Shape::Polygon(points) => vec![polygon(points)],
            Shape::Circle { center, radius } => vec![ellipse(*center, Vec2::new(*radius, *radius))],
            Shape::Ellipse { center, radii } => vec![ellipse(*center, *radii)],
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => vec![rect(*x, *y, *width, *height)],
        })
    }
}

fn parse_points(element: &Element) -> Result<Vec<Point>, Svg2SfdError> {
    let values = POINT_SEPARATOR
        .split(element.require("points")?)
        .filter(|t| !t.is_empty())
        .map(parse_number)
        .collect::<Result<Vec<f64>, _>>()?;
    if values.len() % 2 != 0 {
        return Err(Svg2SfdError::OddCoordinateCount {
            tag: element.tag.to_string(),
        });
    }
    Ok(values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

fn polygon(points: &[Point]) -> Vec<PathCommand> {
    points
        .iter()
        .enumerate()
        .map(|(ix, p)| {
            if ix == 0 {
                PathCommand::move_to(*p)
            } else {
                PathCommand::line_to(*p)
            }
        })
        .collect()
}

/// Four cubic segments starting from the leftmost point and running through
/// the top, right and bottom extrema (in y-down source space).
fn ellipse(center: Point, radii: Vec2) -> Vec<PathCommand> {
    let (cx, cy) = (center.x, center.y);
    let (rx, ry) = (radii.x, radii.y);
    let kx = CIRCLE_KAPPA * rx;
    let ky = CIRCLE_KAPPA * ry;
    vec![
        PathCommand::move_to(Point::new(cx - rx, cy)),
        PathCommand::curve_to(
            Point::new(cx - rx, cy - ky),
            Point::new(cx - kx, cy - ry),
            Point::new(cx, cy - ry),
        ),
        PathCommand::curve_to(
            Point::new(cx + kx, cy - ry),
            Point::new(cx + rx, cy - ky),
            Point::new(cx + rx, cy),
        ),
        PathCommand::curve_to(
            Point::new(cx + rx, cy + ky),
            Point::new(cx + kx, cy + ry),
            Point::new(cx, cy + ry),
        ),
        PathCommand::curve_to(
            Point::new(cx - kx, cy + ry),
            Point::new(cx - rx, cy + ky),
            Point::new(cx - rx, cy),
        ),
    ]
}

// No closing segment: the grid normalizer adds one to every contour.
fn rect(x: f64, y: f64, width: f64, height: f64) -> Vec<PathCommand> {
    vec![
        PathCommand::move_to(Point::new(x, y)),
        PathCommand::line_to(Point::new(x + width, y)),
        PathCommand::line_to(Point::new(x + width, y + height)),
        PathCommand::line_to(Point::new(x, y + height)),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::common::CommandKind;
    use pretty_assertions::assert_eq;

    fn single_contour(element: Element) -> Vec<PathCommand> {
        let shape = Shape::from_element(&element).unwrap().unwrap();
        let mut contours = shape.contours().unwrap();
        assert_eq!(contours.len(), 1);
        contours.remove(0)
    }

    #[test]
    fn test_polygon() {
        let commands = single_contour(
            Element::new("polygon").with_attribute("points", "0,0 100,0\n100, 100 Z"),
        );
        let kinds: Vec<CommandKind> = commands.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![CommandKind::Move, CommandKind::Line, CommandKind::Line]
        );
        assert_eq!(commands[2].operands(), &[100.0, 100.0]);
    }

    #[test]
    fn test_polygon_odd_points() {
        let element = Element::new("polygon").with_attribute("points", "0,0 100");
        assert!(matches!(
            Shape::from_element(&element),
            Err(Svg2SfdError::OddCoordinateCount { .. })
        ));
    }

    #[test]
    fn test_circle_visits_extrema() {
        let commands = single_contour(
            Element::new("circle")
                .with_attribute("cx", "500")
                .with_attribute("cy", "400")
                .with_attribute("r", "100"),
        );
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0].kind, CommandKind::Move);
        assert_eq!(commands[0].end_point(), Point::new(400.0, 400.0));
        let ends: Vec<Point> = commands[1..].iter().map(|c| c.end_point()).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(500.0, 300.0),
                Point::new(600.0, 400.0),
                Point::new(500.0, 500.0),
                Point::new(400.0, 400.0),
            ]
        );
        assert!(commands[1..].iter().all(|c| c.kind == CommandKind::Curve));
        let control = commands[1].points().next().unwrap();
        assert!((control.y - (400.0 - 55.228474983)).abs() < 1e-6);
    }

    #[test]
    fn test_ellipse_uses_independent_radii() {
        let commands = single_contour(
            Element::new("ellipse")
                .with_attribute("cx", "0")
                .with_attribute("cy", "0")
                .with_attribute("rx", "200")
                .with_attribute("ry", "100"),
        );
        assert_eq!(commands[0].end_point(), Point::new(-200.0, 0.0));
        assert_eq!(commands[2].end_point(), Point::new(200.0, 0.0));
        let first = commands[1].operands();
        assert_eq!(first[0], -200.0);
        assert!((first[1] + CIRCLE_KAPPA * 100.0).abs() < 1e-12);
        assert!((first[2] + CIRCLE_KAPPA * 200.0).abs() < 1e-12);
        assert_eq!(first[3], -100.0);
    }

    #[test]
    fn test_rect_winding() {
        let commands = single_contour(
            Element::new("rect")
                .with_attribute("x", "10")
                .with_attribute("y", "10")
                .with_attribute("width", "100")
                .with_attribute("height", "50"),
        );
        let ends: Vec<Point> = commands.iter().map(|c| c.end_point()).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(10.0, 10.0),
                Point::new(110.0, 10.0),
                Point::new(110.0, 60.0),
                Point::new(10.0, 60.0),
            ]
        );
    }

    #[test]
    fn test_non_shapes_and_missing_attributes() {
        assert_eq!(Shape::from_element(&Element::new("text")).unwrap(), None);
        assert!(matches!(
            Shape::from_element(&Element::new("rect").with_attribute("x", "1")),
            Err(Svg2SfdError::MissingAttribute { .. })
        ));
    }
}
