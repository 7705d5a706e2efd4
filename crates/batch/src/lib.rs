// ABOUTME: File and directory driver for trellis rewrite pipelines.
// ABOUTME: Re-exports the public API: process_file, process_html_file, process_directory, options and selectors.

pub mod driver;
pub mod error;
pub mod options;
pub mod selector;

pub use crate::driver::{
    process_directory, process_file, process_html_file, DirectoryReport, FileOutcome,
};
pub use crate::error::BatchError;
pub use crate::options::{BatchOptions, BatchOptionsBuilder};
pub use crate::selector::FileSelector;
