use std::path::Path;

use crate::{FontDocument, Svg2SfdError};

/// Render a font as FontForge SFD text: one record per line, with no
/// trailing newline.
pub fn as_sfd(font: &FontDocument) -> String {
    font.records()
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}

/// Write a font to an SFD file
pub fn save(font: &FontDocument, path: &Path) -> Result<(), Svg2SfdError> {
    log::info!("Saving {}", path.display());
    std::fs::write(path, as_sfd(font))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::names::{BuildContext, FontOptions};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_font() {
        let context = BuildContext::new(Utc.timestamp_opt(0, 0).unwrap(), "Nobody");
        let names = FontOptions::default().resolve(&context).unwrap();
        let sfd = as_sfd(&FontDocument::new(&names, &context, vec![]));
        assert!(sfd.starts_with("SplineFontDB: 3.0\nFontName: Font\n"));
        assert!(sfd.ends_with("BeginChars: 256 0\n\nEndChars\nEndSplineFont"));
    }
}
