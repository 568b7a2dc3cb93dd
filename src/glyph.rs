use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use crate::{
    common::Element,
    grid::{Contour, Grid},
    shape::Shape,
    Svg2SfdError,
};

static CODEPOINT_ID: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"(U\+|0x)([a-zA-Z0-9]+)").unwrap()
});

/// Encoding slots below this are reserved for single-character glyphs;
/// glyphs named by codepoint are numbered after it.
pub const CODEPOINT_SLOT_BASE: u32 = 256;

/// How a glyph is named and where it sits in the font's encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphIdentity {
    /// The `StartChar` name
    pub name: SmolStr,
    /// Slot in the font encoding
    pub index: u32,
    pub codepoint: u32,
    /// Position of the glyph in document order
    pub gid: usize,
}

/// Running counts carried from one glyph to the next while naming glyphs.
#[derive(Debug, Clone, Default)]
pub struct GlyphCounters {
    codepoint_glyphs: u32,
    auto_glyphs: u32,
}

impl GlyphCounters {
    /// Work out the identity of the glyph at `gid` from its group's id.
    pub fn identify(&mut self, gid: usize, id: Option<&str>) -> Result<GlyphIdentity, Svg2SfdError> {
        let id = id.filter(|id| !id.is_empty());
        if let Some(id) = id {
            if let Some(captures) = CODEPOINT_ID.captures(id) {
                let digits = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
                let codepoint =
                    u32::from_str_radix(digits, 16).map_err(|_| Svg2SfdError::BadCodepoint {
                        id: id.to_string(),
                    })?;
                self.codepoint_glyphs += 1;
                return Ok(GlyphIdentity {
                    name: id.into(),
                    index: CODEPOINT_SLOT_BASE + self.codepoint_glyphs,
                    codepoint,
                    gid,
                });
            }
        }
        let character = match id.and_then(|id| id.chars().next()) {
            Some(c) => c,
            None => self.next_auto_character()?,
        };
        Ok(GlyphIdentity {
            name: character.to_string().into(),
            index: character as u32,
            codepoint: character as u32,
            gid,
        })
    }

    // The first unnamed glyph is 'A'; after that the count is added to 'A'
    // after incrementing, so the second is 'C'. Changing this would change
    // the encoding of existing fonts.
    fn next_auto_character(&mut self) -> Result<char, Svg2SfdError> {
        self.auto_glyphs += 1;
        let offset = if self.auto_glyphs == 1 {
            0
        } else {
            self.auto_glyphs
        };
        char::from_u32('A' as u32 + offset).ok_or(Svg2SfdError::AutoNameExhausted {
            count: self.auto_glyphs,
        })
    }
}

/// Name every group in document order.
///
/// This runs over all groups before any outline work so the counters see
/// the glyphs in order however the outlines are processed afterwards.
pub fn assign_identities(groups: &[&Element]) -> Result<Vec<GlyphIdentity>, Svg2SfdError> {
    let mut counters = GlyphCounters::default();
    groups
        .iter()
        .enumerate()
        .map(|(gid, group)| counters.identify(gid, group.attribute("id")))
        .collect()
}

/// A named glyph with its normalized contours.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub identity: GlyphIdentity,
    pub contours: Vec<Contour>,
}

impl Glyph {
    /// Convert every shape child of `group`, in order, into contours.
    pub fn from_group(
        identity: GlyphIdentity,
        group: &Element,
        grid: &Grid,
    ) -> Result<Glyph, Svg2SfdError> {
        let mut contours = vec![];
        for child in &group.children {
            let Some(shape) = Shape::from_element(child)? else {
                log::warn!(
                    "Skipping unsupported <{}> element in glyph {}",
                    child.tag,
                    identity.name
                );
                continue;
            };
            for raw in shape.contours()? {
                contours.push(grid.normalize(&raw)?);
            }
        }
        log::debug!(
            "Glyph {} (encoding {} {} {}) has {} contours",
            identity.name,
            identity.index,
            identity.codepoint,
            identity.gid,
            contours.len()
        );
        Ok(Glyph { identity, contours })
    }

    /// All spline-set lines of the glyph, contour by contour.
    pub fn spline_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.contours.iter().flat_map(|c| c.lines())
    }
}
