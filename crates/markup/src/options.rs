// ABOUTME: Parser and serializer configuration: the markup Dialect and SerializeOptions.
// ABOUTME: SerializeOptionsBuilder provides a fluent API for compact or pretty output.

use std::fmt;

/// Which markup flavour to parse or emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// A full HTML document; `html`, `head` and `body` are implied.
    #[default]
    Html,
    /// An HTML fragment parsed as-is, without implied structure.
    HtmlFragment,
    /// Well-formed XML.
    Xml,
}

impl Dialect {
    pub fn is_html(&self) -> bool {
        matches!(self, Dialect::Html | Dialect::HtmlFragment)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dialect::Html => "html",
            Dialect::HtmlFragment => "fragment",
            Dialect::Xml => "xml",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for Dialect {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "xml" | "lxml-xml" => Dialect::Xml,
            "fragment" | "html.parser" => Dialect::HtmlFragment,
            _ => Dialect::Html,
        }
    }
}

/// How a tree is turned back into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializeOptions {
    /// One element or text line per row, indented one space per level.
    pub pretty: bool,
    pub dialect: Dialect,
}

impl SerializeOptions {
    pub fn builder() -> SerializeOptionsBuilder {
        SerializeOptionsBuilder::new()
    }
}

/// Builder for [`SerializeOptions`].
#[derive(Debug, Clone, Default)]
pub struct SerializeOptionsBuilder {
    opts: SerializeOptions,
}

impl SerializeOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.opts.pretty = pretty;
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.opts.dialect = dialect;
        self
    }

    pub fn build(self) -> SerializeOptions {
        self.opts
    }
}
