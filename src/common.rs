mod command;
mod element;

pub use command::{CommandKind, PathCommand, SEGMENT_FLAG};
pub use element::Element;

use crate::Svg2SfdError;

/// Parse a single numeric operand as it appears in an SVG attribute.
pub(crate) fn parse_number(value: &str) -> Result<f64, Svg2SfdError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Svg2SfdError::MalformedNumber {
            value: value.to_string(),
        })
}
