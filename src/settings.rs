/// Document-level configuration for a [`NestedXmlWriter`](crate::NestedXmlWriter).
///
/// Settings are applied once, when the writer is created and the XML declaration is written.
///
/// ```
/// use nested_xml::WriterSettings;
///
/// let settings = WriterSettings::new().indent(true).indent_size(4);
/// assert!(settings.should_indent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSettings {
    version: String,
    encoding: Option<String>,
    indent: bool,
    indent_char: u8,
    indent_size: usize,
}

impl Default for WriterSettings {
    fn default() -> Self {
        WriterSettings {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            indent: false,
            indent_char: b' ',
            indent_size: 2,
        }
    }
}

impl WriterSettings {
    pub fn new() -> Self {
        WriterSettings::default()
    }

    /// Sets the `version` pseudo-attribute of the XML declaration.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the `encoding` pseudo-attribute of the XML declaration, `None` omits it.
    ///
    /// This only affects the declaration, the document is always produced as UTF-8.
    pub fn encoding(mut self, encoding: Option<impl Into<String>>) -> Self {
        self.encoding = encoding.map(Into::into);
        self
    }

    /// When set, output is pretty printed with one element per line.
    pub fn indent(mut self, pretty: bool) -> Self {
        self.indent = pretty;
        self
    }

    /// Character used for one level of indentation, must be ASCII.
    pub fn indent_char(mut self, indent_char: u8) -> Self {
        self.indent_char = indent_char;
        self
    }

    /// Number of `indent_char` repetitions per nesting level.
    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }

    pub fn get_encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn should_indent(&self) -> bool {
        self.indent
    }

    pub fn get_indent_char(&self) -> u8 {
        self.indent_char
    }

    pub fn get_indent_size(&self) -> usize {
        self.indent_size
    }
}
