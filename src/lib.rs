//! # svg2sfd
//!
//! Convert an SVG "glyph sheet" into a FontForge SFD font source.
//!
//! The sheet is divided into 1000×1000 unit cells. Each top-level `<g>`
//! element of the SVG becomes one glyph, and each of its `path`, `polygon`,
//! `circle`, `ellipse` and `rect` children becomes one or more contours of
//! that glyph. Contours are moved out of the cell they are drawn in and
//! flipped so that y = 800 in the cell lands on the font baseline.
//!
//! ## Naming glyphs
//!
//! - A group id holding a codepoint (`U+263A`, `0x263A`) names the glyph
//!   after the id and encodes it in slots 257 and up.
//! - Any other id names the glyph after its first character.
//! - Groups without an id are named `A`, then `C`, `D`, ... in order.
//!
//! ```no_run
//! # use svg2sfd::{convert_file, BuildContext, FontOptions, Svg2SfdError};
//! # fn main() -> Result<(), Svg2SfdError> {
//! let options = FontOptions {
//!     name: Some("Sprite".to_string()),
//!     ..Default::default()
//! };
//! let font = convert_file("sheet.svg", &options, &BuildContext::from_environment())?;
//! font.save("sheet.sfd")?;
//! # Ok(())
//! # }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod common;
pub mod convertors;
mod error;
mod font;
mod glyph;
pub mod grid;
pub mod names;
pub mod path;
mod shape;

pub use crate::{
    common::{CommandKind, Element, PathCommand, SEGMENT_FLAG},
    error::Svg2SfdError,
    font::{FontDocument, Record},
    glyph::{assign_identities, Glyph, GlyphCounters, GlyphIdentity},
    grid::{format_number, Contour, Grid, GridCell, SplineRecord},
    names::{BuildContext, FontOptions},
    shape::Shape,
};
use std::path::PathBuf;

/// Convert a parsed SVG document into a font.
pub fn convert(
    root: &Element,
    options: &FontOptions,
    context: &BuildContext,
) -> Result<FontDocument, Svg2SfdError> {
    let (width, height) = convertors::svg::document_size(root)?;
    let grid = Grid::for_document(width, height);
    let groups: Vec<&Element> = root.children_tagged("g").collect();
    log::info!(
        "Found {} glyphs on a {}×{} grid",
        groups.len(),
        grid.columns,
        grid.rows
    );

    let identities = assign_identities(&groups)?;
    let glyphs = identities
        .into_iter()
        .zip(groups)
        .map(|(identity, group)| Glyph::from_group(identity, group, &grid))
        .collect::<Result<Vec<Glyph>, _>>()?;

    let names = options.resolve(context)?;
    Ok(FontDocument::new(&names, context, glyphs))
}

/// Load an SVG file and convert it into a font.
pub fn convert_file(
    filename: impl Into<PathBuf>,
    options: &FontOptions,
    context: &BuildContext,
) -> Result<FontDocument, Svg2SfdError> {
    let pb = filename.into();
    match pb.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => {
            let root = convertors::svg::load(pb)?;
            convert(&root, options, context)
        }
        _ => Err(Svg2SfdError::UnknownFileType { path: pb }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn context() -> BuildContext {
        BuildContext::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap(), "Test User")
    }

    #[test]
    fn test_single_rect() {
        let root = Element::new("svg")
            .with_attribute("width", "1000")
            .with_attribute("height", "1000")
            .with_child(
                Element::new("g").with_attribute("id", "A").with_child(
                    Element::new("rect")
                        .with_attribute("x", "10")
                        .with_attribute("y", "10")
                        .with_attribute("width", "100")
                        .with_attribute("height", "50"),
                ),
            );
        let font = convert(&root, &FontOptions::default(), &context()).unwrap();
        assert_eq!(font.glyphs.len(), 1);
        let lines: Vec<String> = font.glyphs[0].spline_lines().collect();
        assert_eq!(
            lines,
            vec![
                "10 790 m 1",
                " 110 790 l 1",
                " 110 740 l 1",
                " 10 740 l 1",
                " 10 790 l 1",
            ]
        );
    }

    #[test]
    fn test_only_top_level_groups_are_glyphs() {
        let root = Element::new("svg")
            .with_attribute("width", "1000")
            .with_attribute("height", "1000")
            .with_child(Element::new("defs").with_child(Element::new("g")))
            .with_child(Element::new("g").with_child(Element::new("g")));
        let font = convert(&root, &FontOptions::default(), &context()).unwrap();
        assert_eq!(font.glyphs.len(), 1);
        assert!(font.glyphs[0].contours.is_empty());
    }

    #[test]
    fn test_failures_abort_the_conversion() {
        let root = Element::new("svg")
            .with_attribute("width", "1000")
            .with_attribute("height", "1000")
            .with_child(
                Element::new("g").with_child(Element::new("path").with_attribute("d", "M0 0 L1 1")),
            )
            .with_child(
                Element::new("g").with_child(Element::new("path").with_attribute("d", "M0 0 Lx 1")),
            );
        let err = convert(&root, &FontOptions::default(), &context()).unwrap_err();
        assert!(err.is_malformed_geometry());
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            convert_file("sheet.png", &FontOptions::default(), &context()),
            Err(Svg2SfdError::UnknownFileType { .. })
        ));
    }
}
