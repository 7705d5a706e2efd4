// ABOUTME: Configuration for batch processing: input dialect and output formatting.
// ABOUTME: BatchOptionsBuilder provides a fluent API; defaults are HTML in, pretty HTML out.

use trellis_markup::{Dialect, SerializeOptions};

/// Options shared by every file of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub dialect: Dialect,
    pub pretty: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Html,
            pretty: true,
        }
    }
}

impl BatchOptions {
    pub fn builder() -> BatchOptionsBuilder {
        BatchOptionsBuilder::new()
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions::builder()
            .dialect(self.dialect)
            .pretty(self.pretty)
            .build()
    }
}

/// Builder for [`BatchOptions`].
#[derive(Debug, Clone, Default)]
pub struct BatchOptionsBuilder {
    opts: BatchOptions,
}

impl BatchOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup dialect used to parse and to write files.
    pub fn dialect(mut self, dialect: impl Into<Dialect>) -> Self {
        self.opts.dialect = dialect.into();
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.opts.pretty = pretty;
        self
    }

    pub fn build(self) -> BatchOptions {
        self.opts
    }
}
