use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NestedXmlError>;

#[derive(Debug, Error)]
pub enum NestedXmlError {
    /// A document with zero top-level elements is not valid XML.
    #[error("Document is empty, at least one element must be written before reading the output")]
    EmptyDocument,

    /// Errors related to Serialization
    // Since `quick-xml` does the escaping and byte emission for us, anything it rejects
    // is passed through as-is.
    #[error("Writing to XML failed with: {0}")]
    XmlOutput(#[from] quick_xml::Error),

    #[error("An I/O error has occurred: {0}")]
    Io(#[from] io::Error),

    #[error("Document buffer contains invalid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("`{name}` is not a valid XML name")]
    InvalidName { name: String },

    #[error("Document still has {depth} open element(s)")]
    UnclosedElements { depth: usize },

    #[error("Attribute `{name}` written while no start tag is open")]
    AttributeOutsideStartTag { name: String },

    #[error("`end_element` called without a matching open element")]
    UnbalancedEndElement,

    /// Errors related to element templates
    #[error("Failed to read element template: {0}")]
    Template(#[from] serde_json::Error),

    #[error("Element template `{element}`: {field} must be a string, number or boolean")]
    InvalidTemplateValue { element: String, field: String },
}
