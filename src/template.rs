//! Element trees described as data.
//!
//! An [`ElementTemplate`] is the JSON form of a series of nested element calls:
//!
//! ```json
//! {
//!   "name": "Sample",
//!   "attributes": { "xmlns:foo": "http://foo.org/ns/foo#" },
//!   "children": [
//!     { "name": "foo:Quz", "text": "stuff here" },
//!     { "name": "Count", "text": 3 }
//!   ]
//! }
//! ```
//!
//! Attribute order follows the order of the JSON object. Attribute values and text may be
//! strings, numbers or booleans; `null` is treated as absent.

use crate::element::Element;
use crate::err::{NestedXmlError, Result};
use crate::nested_writer::NestedXmlWriter;
use crate::settings::WriterSettings;
use crate::xml_output::XmlOutput;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementTemplate>,
}

impl ElementTemplate {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes this element (and its descendants) through `writer`.
    ///
    /// Follows the same rules as [`NestedXmlWriter::element`]: text content wins over children.
    pub fn render<W: XmlOutput>(&self, writer: &mut NestedXmlWriter<W>) -> Result<()> {
        let mut element: Element<'_, W> = Element::new();

        for (name, value) in &self.attributes {
            if let Some(value) = self.scalar(value, name)? {
                element = element.attr(name.as_str(), value);
            }
        }

        if let Some(text) = self.text.as_ref() {
            if let Some(text) = self.scalar(text, "text")? {
                element = element.text(text);
            }
        }

        if !self.children.is_empty() {
            element = element.children(|writer| {
                for child in &self.children {
                    child.render(writer)?;
                }
                Ok(())
            });
        }

        writer.element(&self.name, element)?;
        Ok(())
    }

    fn scalar(&self, value: &Value, field: &str) -> Result<Option<String>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Array(_) | Value::Object(_) => Err(NestedXmlError::InvalidTemplateValue {
                element: self.name.clone(),
                field: field.to_owned(),
            }),
        }
    }
}

/// Renders `template` as the root of a fresh document.
pub fn render_document(template: &ElementTemplate, settings: &WriterSettings) -> Result<String> {
    debug!("rendering template rooted at `{}`", template.name);
    let mut writer = NestedXmlWriter::with_settings(settings)?;
    template.render(&mut writer)?;
    writer.output()
}
