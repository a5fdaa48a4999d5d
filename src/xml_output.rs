use crate::err::{NestedXmlError, Result};
use crate::qname::{QualifiedName, qualify};
use crate::settings::WriterSettings;

use log::trace;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// The streaming XML writer a [`NestedXmlWriter`](crate::NestedXmlWriter) drives.
///
/// Implementations own escaping, indentation and byte emission. Callers are expected to issue
/// well nested `start_element`/`end_element` pairs, with attributes written right after the
/// start of their element.
pub trait XmlOutput {
    fn start_document(&mut self, version: &str, encoding: Option<&str>) -> Result<()>;
    fn start_element(&mut self, name: &str) -> Result<()>;
    fn start_element_ns(&mut self, prefix: &str, local: &str) -> Result<()>;
    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()>;
    fn write_attribute_ns(&mut self, prefix: &str, local: &str, value: &str) -> Result<()>;
    fn write_text(&mut self, value: &str) -> Result<()>;
    fn end_element(&mut self) -> Result<()>;
    /// Number of elements started but not yet ended.
    fn depth(&self) -> usize;
    /// Returns everything written so far, without clearing it.
    fn flush_to_string(&self) -> Result<String>;
}

/// In-memory [`XmlOutput`] backed by `quick-xml`.
///
/// `quick-xml` writes a start tag in one piece, so the most recently started element is kept
/// pending until its content (or its end) is known. An element that is closed while still
/// pending is written as an empty element (`<Root/>`).
pub struct QuickXmlOutput {
    writer: Writer<Vec<u8>>,
    indent: bool,
    pending: Option<BytesStart<'static>>,
    open_elements: Vec<String>,
}

impl QuickXmlOutput {
    pub fn new() -> Self {
        Self::with_settings(&WriterSettings::default())
    }

    pub fn with_settings(settings: &WriterSettings) -> Self {
        let writer = if settings.should_indent() {
            Writer::new_with_indent(
                Vec::new(),
                settings.get_indent_char(),
                settings.get_indent_size(),
            )
        } else {
            Writer::new(Vec::new())
        };

        QuickXmlOutput {
            writer,
            indent: settings.should_indent(),
            pending: None,
            open_elements: Vec::new(),
        }
    }

    /// Consumes the output, returning the bytes written so far.
    pub fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

/// Element and attribute names must be `NCName`s, optionally joined by a single `:`.
fn ensure_valid_name(name: &str) -> Result<()> {
    if qualify(name).is_valid() {
        Ok(())
    } else {
        Err(NestedXmlError::InvalidName {
            name: name.to_owned(),
        })
    }
}

impl Default for QuickXmlOutput {
    fn default() -> Self {
        QuickXmlOutput::new()
    }
}

impl XmlOutput for QuickXmlOutput {
    fn start_document(&mut self, version: &str, encoding: Option<&str>) -> Result<()> {
        trace!("start_document: version={} encoding={:?}", version, encoding);
        self.writer
            .write_event(Event::Decl(BytesDecl::new(version, encoding, None)))?;

        // With indentation on `quick-xml` breaks the line before the root element by itself.
        if !self.indent {
            self.writer.get_mut().write_all(b"\n")?;
        }

        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<()> {
        trace!("start_element: {}", name);
        ensure_valid_name(name)?;
        self.flush_pending()?;

        self.pending = Some(BytesStart::new(name.to_owned()));
        self.open_elements.push(name.to_owned());
        Ok(())
    }

    fn start_element_ns(&mut self, prefix: &str, local: &str) -> Result<()> {
        let name = QualifiedName {
            prefix: Some(prefix),
            local,
        };
        self.start_element(&name.to_string())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        trace!("write_attribute: {}={:?}", name, value);
        ensure_valid_name(name)?;
        match self.pending.as_mut() {
            Some(start) => {
                start.push_attribute((name, value));
                Ok(())
            }
            None => Err(NestedXmlError::AttributeOutsideStartTag {
                name: name.to_owned(),
            }),
        }
    }

    fn write_attribute_ns(&mut self, prefix: &str, local: &str, value: &str) -> Result<()> {
        let name = QualifiedName {
            prefix: Some(prefix),
            local,
        };
        self.write_attribute(&name.to_string(), value)
    }

    fn write_text(&mut self, value: &str) -> Result<()> {
        trace!("write_text: {:?}", value);
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        Ok(())
    }

    fn end_element(&mut self) -> Result<()> {
        let name = self
            .open_elements
            .pop()
            .ok_or(NestedXmlError::UnbalancedEndElement)?;
        trace!("end_element: {}", name);

        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }

        Ok(())
    }

    fn depth(&self) -> usize {
        self.open_elements.len()
    }

    fn flush_to_string(&self) -> Result<String> {
        Ok(String::from_utf8(self.writer.get_ref().clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(output: &QuickXmlOutput) -> String {
        output.flush_to_string().unwrap()
    }

    #[test]
    fn test_declaration_is_followed_by_a_line_break() {
        let mut output = QuickXmlOutput::new();
        output.start_document("1.0", Some("UTF-8")).unwrap();

        assert_eq!(body(&output), "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    #[test]
    fn test_element_closed_while_pending_is_self_closing() {
        let mut output = QuickXmlOutput::new();
        output.start_element("Root").unwrap();
        output.write_attribute("attr", "1").unwrap();
        output.end_element().unwrap();

        assert_eq!(body(&output), r#"<Root attr="1"/>"#);
        assert_eq!(output.depth(), 0);
    }

    #[test]
    fn test_child_flushes_parent_start_tag() {
        let mut output = QuickXmlOutput::new();
        output.start_element_ns("foo", "Root").unwrap();
        output.write_attribute_ns("xmlns", "foo", "urn:foo").unwrap();
        output.start_element("Child").unwrap();
        assert_eq!(output.depth(), 2);
        output.end_element().unwrap();
        output.write_text("tail").unwrap();
        output.end_element().unwrap();

        assert_eq!(
            body(&output),
            r#"<foo:Root xmlns:foo="urn:foo"><Child/>tail</foo:Root>"#
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped_by_the_writer() {
        let mut output = QuickXmlOutput::new();
        output.start_element("Root").unwrap();
        output.write_attribute("q", "a \"quoted\" <value>").unwrap();
        output.write_text("1 < 2 & 3 > 2").unwrap();
        output.end_element().unwrap();

        assert_eq!(
            body(&output),
            r#"<Root q="a &quot;quoted&quot; &lt;value&gt;">1 &lt; 2 &amp; 3 &gt; 2</Root>"#
        );
    }

    #[test]
    fn test_attribute_without_start_tag_is_rejected() {
        let mut output = QuickXmlOutput::new();
        output.start_element("Root").unwrap();
        output.write_text("content").unwrap();

        let err = output.write_attribute("late", "1").unwrap_err();
        assert!(matches!(
            err,
            NestedXmlError::AttributeOutsideStartTag { ref name } if name == "late"
        ));
    }

    #[test]
    fn test_unbalanced_end_element_is_rejected() {
        let mut output = QuickXmlOutput::new();
        assert!(matches!(
            output.end_element(),
            Err(NestedXmlError::UnbalancedEndElement)
        ));
    }

    fn assert_invalid_name(result: Result<()>, expected: &str) {
        match result {
            Err(NestedXmlError::InvalidName { name }) => assert_eq!(name, expected),
            other => panic!("expected InvalidName for {:?}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_invalid_element_names_are_rejected() {
        let mut output = QuickXmlOutput::new();
        for name in ["", "a b", "a>b", ":local", "prefix:", "a:b:c", "1st"] {
            assert_invalid_name(output.start_element(name), name);
        }
        assert_invalid_name(output.start_element_ns("", "local"), ":local");
        assert_invalid_name(output.start_element_ns("a", "b:c"), "a:b:c");

        assert_eq!(output.depth(), 0);
        assert_eq!(body(&output), "");
    }

    #[test]
    fn test_invalid_attribute_names_are_rejected() {
        let mut output = QuickXmlOutput::new();
        output.start_element("Root").unwrap();
        assert_invalid_name(output.write_attribute("bad name", "1"), "bad name");
        assert_invalid_name(output.write_attribute("", "1"), "");
        assert_invalid_name(output.write_attribute_ns("xmlns", "", "urn:x"), "xmlns:");
        output.end_element().unwrap();

        assert_eq!(body(&output), "<Root/>");
    }

    #[test]
    fn test_unicode_and_punctuated_names_are_accepted() {
        let mut output = QuickXmlOutput::new();
        output.start_element("\u{e9}l\u{e9}ment").unwrap();
        output.write_attribute("xml:lang", "fr").unwrap();
        output.write_attribute("data-id.v2", "7").unwrap();
        output.start_element_ns("_ns", "child_1").unwrap();
        output.end_element().unwrap();
        output.end_element().unwrap();

        assert_eq!(
            body(&output),
            "<\u{e9}l\u{e9}ment xml:lang=\"fr\" data-id.v2=\"7\"><_ns:child_1/></\u{e9}l\u{e9}ment>"
        );
    }

    #[test]
    fn test_into_inner_returns_written_bytes() {
        let mut output = QuickXmlOutput::new();
        output.start_document("1.0", None).unwrap();
        output.start_element("Root").unwrap();
        output.end_element().unwrap();
        let written = body(&output);

        let bytes = output.into_inner();
        assert_eq!(bytes, written.as_bytes());
        assert_eq!(bytes, b"<?xml version=\"1.0\"?>\n<Root/>");
    }

    #[test]
    fn test_indented_output() {
        let settings = WriterSettings::new().indent(true);
        let mut output = QuickXmlOutput::with_settings(&settings);
        output.start_document("1.0", Some("UTF-8")).unwrap();
        output.start_element("Root").unwrap();
        output.start_element("Item").unwrap();
        output.write_text("x").unwrap();
        output.end_element().unwrap();
        output.start_element("Empty").unwrap();
        output.end_element().unwrap();
        output.end_element().unwrap();

        assert_eq!(
            body(&output),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Root>\n  <Item>x</Item>\n  <Empty/>\n</Root>"
        );
    }
}
