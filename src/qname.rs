use std::fmt;

/// Separator between a namespace prefix and a local name (`xmlns:foo`, `foo:Quz`).
pub const NAMESPACE_SEPARATOR: char = ':';

/// An element or attribute name split into its namespace prefix and local part.
///
/// Borrowed from the raw identifier; computed per call and never stored.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct QualifiedName<'a> {
    pub prefix: Option<&'a str>,
    pub local: &'a str,
}

impl QualifiedName<'_> {
    pub fn is_prefixed(&self) -> bool {
        self.prefix.is_some()
    }

    /// Returns `true` if both the prefix (when present) and the local part are `NCName`s,
    /// i.e. the name can be written as an element or attribute name.
    pub fn is_valid(&self) -> bool {
        self.prefix.is_none_or(is_ncname) && is_ncname(self.local)
    }
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            Some(prefix) => write!(f, "{}{}{}", prefix, NAMESPACE_SEPARATOR, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// Qualify (a possibly namespaced) element or attribute name.
///
/// Splits at the first separator only, so `a:b:c` yields (`a`, `b:c`).
/// Names without a separator are returned unchanged as the local part.
///
/// ```
/// use nested_xml::qualify;
///
/// let name = qualify("xmlns:foo");
/// assert_eq!(name.prefix, Some("xmlns"));
/// assert_eq!(name.local, "foo");
/// ```
pub fn qualify(name: &str) -> QualifiedName<'_> {
    match name.split_once(NAMESPACE_SEPARATOR) {
        Some((prefix, local)) => QualifiedName {
            prefix: Some(prefix),
            local,
        },
        None => QualifiedName {
            prefix: None,
            local: name,
        },
    }
}

/// `NameStartChar` (XML 1.0 §2.3) without the namespace separator.
fn is_ncname_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z' |
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

/// `NameChar` (XML 1.0 §2.3) without the namespace separator.
fn is_ncname_char(c: char) -> bool {
    is_ncname_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' |
            '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

/// Returns `true` if `name` is a non-empty XML name containing no `:` (an `NCName`).
pub fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_ncname_start_char(first) && chars.all(is_ncname_char),
        None => false,
    }
}
