use std::path::PathBuf;

use roxmltree::ParsingOptions;

use crate::{common::Element, Svg2SfdError};

fn to_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attribute in node.attributes() {
        element
            .attributes
            .insert(attribute.name().to_string(), attribute.value().to_string());
    }
    element.children = node
        .children()
        .filter(|n| n.is_element())
        .map(to_element)
        .collect();
    element
}

/// Parse SVG text into an [`Element`] tree rooted at the `<svg>` element.
///
/// Tags and attribute names are stored by local name, without namespaces.
pub fn parse(text: &str) -> Result<Element, Svg2SfdError> {
    let doc = roxmltree::Document::parse_with_options(
        text,
        ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )?;
    Ok(to_element(doc.root_element()))
}

/// Load an SVG file from a path
pub fn load(path: impl Into<PathBuf>) -> Result<Element, Svg2SfdError> {
    let path = path.into();
    log::info!("Loading {}", path.display());
    let text = std::fs::read_to_string(&path)?;
    parse(&text)
}

fn dimension(root: &Element, attribute: &'static str) -> Result<u32, Svg2SfdError> {
    let raw = root.attribute(attribute);
    let digits: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().map_err(|_| Svg2SfdError::BadDimension {
        attribute,
        value: raw.map(|v| v.to_string()),
    })
}

/// The width and height of the document in whole units. Every non-digit
/// character is dropped first, so `"2000px"` reads as 2000.
pub fn document_size(root: &Element) -> Result<(u32, u32), Svg2SfdError> {
    Ok((dimension(root, "width")?, dimension(root, "height")?))
}
