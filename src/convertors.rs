/// FontForge SFD writer
pub mod fontforge;
/// SVG document loader
pub mod svg;
