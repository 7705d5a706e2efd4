// ABOUTME: File selection for directory processing: everything, glob patterns, a regex, or a closure.
// ABOUTME: Patterns are compiled once when the selector is built.

use std::fmt;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use crate::error::BatchError;

/// Decides which files of a directory walk get processed; the rest are copied.
///
/// Selectors see the full input path. Glob `*` also matches `/`, so
/// `*.html` selects HTML files at any depth.
#[derive(Default)]
pub enum FileSelector {
    #[default]
    All,
    Patterns(GlobSet),
    /// Must match the whole path.
    Regex(Regex),
    Custom(Box<dyn Fn(&Path) -> bool + Send + Sync>),
}

impl FileSelector {
    /// Select files matching any of the glob `patterns`.
    pub fn patterns<I, S>(patterns: I) -> Result<Self, BatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|e| {
                BatchError::selector(format!("invalid pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        let globset = builder
            .build()
            .map_err(|e| BatchError::selector(format!("failed to build globset: {}", e)))?;
        Ok(FileSelector::Patterns(globset))
    }

    /// Select files whose whole path matches `pattern`.
    pub fn regex(pattern: &str) -> Result<Self, BatchError> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored).map_err(|e| {
            BatchError::selector(format!("invalid regex '{}': {}", pattern, e))
        })?;
        Ok(FileSelector::Regex(regex))
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        FileSelector::Custom(Box::new(f))
    }

    pub fn is_selected(&self, path: &Path) -> bool {
        match self {
            FileSelector::All => true,
            FileSelector::Patterns(globs) => globs.is_match(path),
            FileSelector::Regex(regex) => regex.is_match(&path.to_string_lossy()),
            FileSelector::Custom(f) => f(path),
        }
    }
}

impl fmt::Debug for FileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSelector::All => f.write_str("All"),
            FileSelector::Patterns(globs) => write!(f, "Patterns({} globs)", globs.len()),
            FileSelector::Regex(regex) => f.debug_tuple("Regex").field(&regex.as_str()).finish(),
            FileSelector::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selects_everything() {
        assert!(FileSelector::All.is_selected(Path::new("/any/file.bin")));
    }

    #[test]
    fn test_patterns_cross_directories() {
        let selector = FileSelector::patterns(["*.html", "*.htm"]).unwrap();
        assert!(selector.is_selected(Path::new("/data/in/page.html")));
        assert!(selector.is_selected(Path::new("/data/in/nested/old.htm")));
        assert!(!selector.is_selected(Path::new("/data/in/style.css")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = FileSelector::patterns(["a[b"]);
        assert!(matches!(result, Err(BatchError::Selector(_))));
    }

    #[test]
    fn test_regex_requires_full_match() {
        let selector = FileSelector::regex(r".*/chapter\d+\.xml").unwrap();
        assert!(selector.is_selected(Path::new("/book/chapter12.xml")));
        assert!(!selector.is_selected(Path::new("/book/chapter12.xml.bak")));
        assert!(matches!(
            FileSelector::regex("("),
            Err(BatchError::Selector(_))
        ));
    }

    #[test]
    fn test_custom_selector() {
        let selector = FileSelector::custom(|p| p.extension().is_some_and(|e| e == "xhtml"));
        assert!(selector.is_selected(Path::new("a.xhtml")));
        assert!(!selector.is_selected(Path::new("a.html")));
    }
}
