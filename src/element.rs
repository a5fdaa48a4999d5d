use crate::err::Result;
use crate::nested_writer::NestedXmlWriter;
use crate::xml_output::{QuickXmlOutput, XmlOutput};

use std::fmt;

/// Nested-builder closure, called with the writer positioned inside the element it belongs to.
pub type Children<'a, W> = Box<dyn FnOnce(&mut NestedXmlWriter<W>) -> Result<()> + 'a>;

/// Arguments of a single element call: attributes, text content and nested children.
///
/// Every field is optional. Setting a field twice keeps the last value, and text content takes
/// precedence over children: when both are set the children closure is never called.
///
/// ```
/// use nested_xml::{Element, NestedXmlWriter};
///
/// let mut writer = NestedXmlWriter::new()?;
/// writer.element(
///     "Root",
///     Element::new()
///         .attr("attr", "Test attribute...")
///         .children(|root| {
///             root.empty("Nested")?;
///             Ok(())
///         }),
/// )?;
///
/// assert!(writer.output()?.ends_with(r#"<Root attr="Test attribute..."><Nested/></Root>"#));
/// # Ok::<(), nested_xml::NestedXmlError>(())
/// ```
pub struct Element<'a, W: XmlOutput = QuickXmlOutput> {
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) text: Option<String>,
    pub(crate) children: Option<Children<'a, W>>,
}

impl<'a, W: XmlOutput> Element<'a, W> {
    pub fn new() -> Self {
        Element {
            attributes: Vec::new(),
            text: None,
            children: None,
        }
    }

    /// Adds an attribute. Names may be namespace qualified (`xmlns:foo`).
    ///
    /// Re-using a name replaces the earlier value but keeps its original position.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();

        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing_value)) => *existing_value = value,
            None => self.attributes.push((name, value)),
        }

        self
    }

    /// Adds every attribute from `attributes`, in iteration order.
    pub fn attrs<I, K, V>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        attributes
            .into_iter()
            .fold(self, |element, (name, value)| element.attr(name, value))
    }

    /// Sets the text content. Numbers and other `Display` values are written in their string form.
    pub fn text(mut self, text: impl fmt::Display) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Sets the closure that writes this element's children.
    pub fn children<F>(mut self, children: F) -> Self
    where
        F: FnOnce(&mut NestedXmlWriter<W>) -> Result<()> + 'a,
    {
        self.children = Some(Box::new(children));
        self
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn get_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }
}

impl<W: XmlOutput> Default for Element<'_, W> {
    fn default() -> Self {
        Element::new()
    }
}

impl<W: XmlOutput> fmt::Debug for Element<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("attributes", &self.attributes)
            .field("text", &self.text)
            .field("children", &self.children.as_ref().map(|_| ".."))
            .finish()
    }
}
