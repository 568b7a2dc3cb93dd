use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Svg2SfdError {
    #[error("IO Error: {0}")]
    IO(#[from] io::Error),

    #[error("Error parsing SVG: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("Error parsing options file: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Unknown file type for file {path:?}")]
    UnknownFileType { path: PathBuf },

    #[error("SVG root has no usable {attribute} attribute (found {value:?})")]
    BadDimension {
        attribute: &'static str,
        value: Option<String>,
    },

    #[error("<{tag}> element is missing the {attribute} attribute")]
    MissingAttribute { tag: String, attribute: String },

    #[error("Malformed number {value:?}")]
    MalformedNumber { value: String },

    #[error("Path command '{command}' expects {expected} operands, found {found}")]
    MissingOperands {
        command: char,
        expected: usize,
        found: usize,
    },

    #[error("Path command '{command}' has no current point to extend")]
    NoCurrentPoint { command: char },

    #[error("Odd number of coordinates in <{tag}> points")]
    OddCoordinateCount { tag: String },

    #[error("Contour has no segments")]
    EmptyContour,

    #[error("Glyph id {id:?} does not hold a hexadecimal codepoint")]
    BadCodepoint { id: String },

    #[error("No character left to name unnamed glyph number {count}")]
    AutoNameExhausted { count: u32 },

    #[error("Weight class {weight} is outside 100-999")]
    BadWeight { weight: String },
}

impl Svg2SfdError {
    /// True for failures in the geometry of an individual shape, as opposed to
    /// the document or options as a whole.
    pub fn is_malformed_geometry(&self) -> bool {
        matches!(
            self,
            Svg2SfdError::MissingAttribute { .. }
                | Svg2SfdError::MalformedNumber { .. }
                | Svg2SfdError::MissingOperands { .. }
                | Svg2SfdError::NoCurrentPoint { .. }
                | Svg2SfdError::OddCoordinateCount { .. }
                | Svg2SfdError::EmptyContour
        )
    }
}
