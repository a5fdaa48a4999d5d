use crate::element::Element;
use crate::err::{NestedXmlError, Result};
use crate::qname::qualify;
use crate::settings::WriterSettings;
use crate::xml_output::{QuickXmlOutput, XmlOutput};

use log::{debug, trace};
use std::fmt;

/// Builds an XML document through nested element calls.
///
/// Every call to [`element`](Self::element) writes exactly one well nested element. Children are
/// written by a closure that receives this same writer, positioned inside the element that was
/// just opened, so the shape of the calling code follows the shape of the document.
///
/// The writer handed to a children closure is only valid for the duration of that call;
/// the borrow checker rejects attempts to keep it around.
///
/// ```
/// use nested_xml::{Element, NestedXmlWriter};
///
/// let mut writer = NestedXmlWriter::new()?;
/// writer.element(
///     "Sample",
///     Element::new()
///         .attr("xmlns:foo", "http://foo.org/ns/foo#")
///         .children(|sample| {
///             sample.text("foo:Quz", "stuff here")?.empty("Other")?;
///             Ok(())
///         }),
/// )?;
///
/// assert_eq!(
///     writer.output()?,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
///      <Sample xmlns:foo=\"http://foo.org/ns/foo#\"><foo:Quz>stuff here</foo:Quz><Other/></Sample>"
/// );
/// # Ok::<(), nested_xml::NestedXmlError>(())
/// ```
pub struct NestedXmlWriter<W: XmlOutput = QuickXmlOutput> {
    writer: W,
    has_content: bool,
}

impl NestedXmlWriter<QuickXmlOutput> {
    /// Starts an in-memory document with the default settings (`1.0`, `UTF-8`, no indentation).
    pub fn new() -> Result<Self> {
        Self::with_settings(&WriterSettings::default())
    }

    pub fn with_settings(settings: &WriterSettings) -> Result<Self> {
        Self::start(QuickXmlOutput::with_settings(settings), settings)
    }
}

impl<W: XmlOutput> NestedXmlWriter<W> {
    /// Writes the XML declaration described by `settings` to `writer` and wraps it.
    pub fn start(mut writer: W, settings: &WriterSettings) -> Result<Self> {
        writer.start_document(settings.get_version(), settings.get_encoding())?;
        Ok(Self::from_output(writer))
    }

    /// Wraps an output whose document was already started.
    pub fn from_output(writer: W) -> Self {
        NestedXmlWriter {
            writer,
            has_content: false,
        }
    }

    /// Writes the element `name` (optionally `prefix:local`) with the given arguments.
    ///
    /// Non empty text content is written as the element's only child; otherwise the children
    /// closure (if any) is called once with this writer. Returns the writer itself, so siblings
    /// can be chained.
    ///
    /// Names that are not valid XML names are rejected with [`NestedXmlError::InvalidName`]
    /// before anything is written. If the children closure fails, its error is returned as-is
    /// and the element is left open.
    pub fn element(&mut self, name: &str, element: Element<'_, W>) -> Result<&mut Self> {
        let Element {
            attributes,
            text,
            children,
        } = element;

        let qualified = qualify(name);
        debug!("element: {}", qualified);

        match qualified.prefix {
            Some(prefix) => self.writer.start_element_ns(prefix, qualified.local)?,
            None => self.writer.start_element(qualified.local)?,
        }

        self.has_content = true;

        for (attribute_name, value) in &attributes {
            let attribute = qualify(attribute_name);
            match attribute.prefix {
                Some(prefix) => self
                    .writer
                    .write_attribute_ns(prefix, attribute.local, value)?,
                None => self.writer.write_attribute(attribute.local, value)?,
            }
        }

        match (text.filter(|text| !text.is_empty()), children) {
            (Some(text), children) => {
                if children.is_some() {
                    trace!("`{}` has text content, skipping its children", qualified);
                }
                self.writer.write_text(&text)?;
            }
            (None, Some(children)) => children(self)?,
            (None, None) => {}
        }

        self.writer.end_element()?;

        Ok(self)
    }

    /// Writes `<name/>`.
    pub fn empty(&mut self, name: &str) -> Result<&mut Self> {
        self.element(name, Element::new())
    }

    /// Writes `<name>text</name>`.
    pub fn text(&mut self, name: &str, text: impl fmt::Display) -> Result<&mut Self> {
        self.element(name, Element::new().text(text))
    }

    /// Writes `name` with children produced by `children`.
    pub fn children<F>(&mut self, name: &str, children: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.element(name, Element::new().children(children))
    }

    /// Returns true once any element was written. Never resets.
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// Returns the document written so far.
    ///
    /// Fails with [`NestedXmlError::EmptyDocument`] if no element was ever written, and with
    /// [`NestedXmlError::UnclosedElements`] while an element is still open (after a children
    /// closure failed), since neither document is well formed.
    pub fn output(&self) -> Result<String> {
        if !self.has_content {
            return Err(NestedXmlError::EmptyDocument);
        }

        let depth = self.writer.depth();
        if depth > 0 {
            return Err(NestedXmlError::UnclosedElements { depth });
        }

        self.writer.flush_to_string()
    }

    pub fn into_output(self) -> W {
        self.writer
    }
}
