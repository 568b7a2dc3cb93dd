use std::fmt;
use std::path::PathBuf;

use crate::{
    glyph::Glyph,
    grid::CELL_SIZE,
    names::{BuildContext, ResolvedNames},
    Svg2SfdError,
};

pub const SFD_VERSION: &str = "3.0";
pub const ENCODING: &str = "ISO8859-1";
/// Number of encoding slots declared in `BeginChars`
pub const ENCODING_SLOTS: u32 = 256;

/// A `Key: value` line of an SFD file. Lines with an empty value are
/// written as the bare key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Record {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn bare(key: impl Into<String>) -> Self {
        Record::new(key, "")
    }

    pub fn blank() -> Self {
        Record::bare("")
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}: {}", self.key, self.value)
        }
    }
}

/// A complete font ready to be written: font-level header records, the
/// glyphs, and the closing records.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDocument {
    pub header: Vec<Record>,
    pub glyphs: Vec<Glyph>,
    pub footer: Vec<Record>,
}

impl FontDocument {
    pub fn new(names: &ResolvedNames, context: &BuildContext, glyphs: Vec<Glyph>) -> Self {
        let timestamp = context.now.timestamp();
        let header = vec![
            Record::new("SplineFontDB", SFD_VERSION),
            Record::new("FontName", &names.name),
            Record::new("FullName", &names.name),
            Record::new("FamilyName", &names.family),
            Record::new("Copyright", &names.copyright),
            Record::new("Weight", &names.weight),
            Record::new("TTFWeight", names.weight_class),
            Record::new("Version", &names.version),
            Record::new("Ascent", CELL_SIZE * 4 / 5),
            Record::new("Descent", CELL_SIZE / 5),
            Record::new("CreationTime", timestamp),
            Record::new("ModificationTime", timestamp),
            Record::new("Encoding", ENCODING),
            Record::new("LayerCount", 2),
            Record::new("Layer", "0 0 \"Back\" 1"),
            Record::new("Layer", "1 0 \"Fore\" 0"),
            Record::new("AntiAlias", 1),
            Record::new("BeginChars", format!("{} {}", ENCODING_SLOTS, glyphs.len())),
            Record::blank(),
        ];
        let footer = vec![Record::bare("EndChars"), Record::bare("EndSplineFont")];
        FontDocument {
            header,
            glyphs,
            footer,
        }
    }

    /// The `StartChar` to `EndChar` block of one glyph.
    pub fn glyph_records(glyph: &Glyph) -> Vec<Record> {
        let identity = &glyph.identity;
        let mut records = vec![
            Record::new("StartChar", &identity.name),
            Record::new(
                "Encoding",
                format!("{} {} {}", identity.index, identity.codepoint, identity.gid),
            ),
            Record::new("Width", CELL_SIZE),
            Record::new("VWidth", 0),
            Record::new("Flags", "H"),
            Record::new("LayerCount", 2),
            Record::bare("Fore"),
            Record::bare("SplineSet"),
        ];
        records.extend(glyph.spline_lines().map(Record::bare));
        records.push(Record::bare("EndSplineSet"));
        records.push(Record::bare("EndChar"));
        records
    }

    /// Every record of the font in file order, with a blank record between
    /// consecutive glyphs.
    pub fn records(&self) -> Vec<Record> {
        let mut records = self.header.clone();
        for (ix, glyph) in self.glyphs.iter().enumerate() {
            if ix > 0 {
                records.push(Record::blank());
            }
            records.extend(Self::glyph_records(glyph));
        }
        records.extend(self.footer.iter().cloned());
        records
    }

    /// The font as SFD text.
    pub fn to_sfd(&self) -> String {
        crate::convertors::fontforge::as_sfd(self)
    }

    pub fn save<T: Into<PathBuf>>(&self, path: T) -> Result<(), Svg2SfdError> {
        crate::convertors::fontforge::save(self, &path.into())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        common::Element,
        glyph::{Glyph, GlyphCounters},
        grid::Grid,
        names::FontOptions,
    };
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn context() -> BuildContext {
        BuildContext::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap(), "Test User")
    }

    fn glyph(id: &str, d: &str) -> Glyph {
        let group = Element::new("g").with_child(Element::new("path").with_attribute("d", d));
        let identity = GlyphCounters::default().identify(0, Some(id)).unwrap();
        Glyph::from_group(identity, &group, &Grid::for_document(1000, 1000)).unwrap()
    }

    #[test]
    fn test_record_display() {
        assert_eq!(Record::new("Width", 1000).to_string(), "Width: 1000");
        assert_eq!(Record::bare("Fore").to_string(), "Fore");
        assert_eq!(Record::blank().to_string(), "");
    }

    #[test]
    fn test_header() {
        let options = FontOptions {
            name: Some("Sprite".to_string()),
            weight: Some("700".to_string()),
            ..Default::default()
        };
        let names = options.resolve(&context()).unwrap();
        let doc = FontDocument::new(&names, &context(), vec![]);
        let header: Vec<String> = doc.header.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            header,
            vec![
                "SplineFontDB: 3.0",
                "FontName: Sprite",
                "FullName: Sprite",
                "FamilyName: Family",
                "Copyright: Copyright (c) 2023 Test User",
                "Weight: Bold",
                "TTFWeight: 700",
                "Version: 1.0.1",
                "Ascent: 800",
                "Descent: 200",
                "CreationTime: 1700000000",
                "ModificationTime: 1700000000",
                "Encoding: ISO8859-1",
                "LayerCount: 2",
                "Layer: 0 0 \"Back\" 1",
                "Layer: 1 0 \"Fore\" 0",
                "AntiAlias: 1",
                "BeginChars: 256 0",
                "",
            ]
        );
    }

    #[test]
    fn test_glyphs_are_separated_by_blank_records() {
        let names = FontOptions::default().resolve(&context()).unwrap();
        let doc = FontDocument::new(
            &names,
            &context(),
            vec![glyph("a", "M0 0 L1 1"), glyph("b", "M0 0 L1 1")],
        );
        let records = doc.records();
        let tail: Vec<String> = records[doc.header.len()..]
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(
            tail,
            vec![
                "StartChar: a",
                "Encoding: 97 97 0",
                "Width: 1000",
                "VWidth: 0",
                "Flags: H",
                "LayerCount: 2",
                "Fore",
                "SplineSet",
                "0 800 m 1",
                " 1 799 l 1",
                " 0 800 l 1",
                "EndSplineSet",
                "EndChar",
                "",
                "StartChar: b",
                "Encoding: 98 98 0",
                "Width: 1000",
                "VWidth: 0",
                "Flags: H",
                "LayerCount: 2",
                "Fore",
                "SplineSet",
                "0 800 m 1",
                " 1 799 l 1",
                " 0 800 l 1",
                "EndSplineSet",
                "EndChar",
                "EndChars",
                "EndSplineFont",
            ]
        );
    }
}
