//! # nested-xml
//!
//! A fluent builder for well-formed, namespace-aware XML documents.
//!
//! Documents are described with nested function calls instead of explicit tree construction
//! or string concatenation. Each element call names the element, and optionally carries
//! attributes, text content, or a closure that writes the element's children.
//!
//! ```
//! use nested_xml::{Element, NestedXmlWriter};
//!
//! let mut writer = NestedXmlWriter::new()?;
//! writer.children("Root", |root| {
//!     root.children("Sibling1", |sibling| {
//!         sibling.empty("Child1")?;
//!         Ok(())
//!     })?
//!     .element("Sibling2", Element::new().attr("id", "2").text(42))?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(
//!     writer.output()?,
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
//!      <Root><Sibling1><Child1/></Sibling1><Sibling2 id=\"2\">42</Sibling2></Root>"
//! );
//! # Ok::<(), nested_xml::NestedXmlError>(())
//! ```
//!
//! Escaping, indentation and byte emission are delegated to `quick-xml`, see [`QuickXmlOutput`].

pub mod element;
pub mod err;
pub mod nested_writer;
pub mod qname;
pub mod settings;
pub mod template;
pub mod xml_output;

pub use element::{Children, Element};
pub use err::{NestedXmlError, Result};
pub use nested_writer::NestedXmlWriter;
pub use qname::{NAMESPACE_SEPARATOR, QualifiedName, is_ncname, qualify};
pub use settings::WriterSettings;
pub use template::{ElementTemplate, render_document};
pub use xml_output::{QuickXmlOutput, XmlOutput};
