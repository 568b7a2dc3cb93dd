use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::{common::parse_number, Svg2SfdError};

/// A node of a parsed vector document: a local tag name, its attributes in
/// document order, and its child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: SmolStr,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Element {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }

    /// Fetch an attribute that the element cannot be converted without.
    pub fn require(&self, name: &str) -> Result<&str, Svg2SfdError> {
        self.attribute(name)
            .ok_or_else(|| Svg2SfdError::MissingAttribute {
                tag: self.tag.to_string(),
                attribute: name.to_string(),
            })
    }

    /// Fetch a required attribute and parse it as a number.
    pub fn number(&self, name: &str) -> Result<f64, Svg2SfdError> {
        parse_number(self.require(name)?)
    }

    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}
