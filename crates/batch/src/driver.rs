// ABOUTME: Batch driver applying a rewrite pipeline to files and whole directory trees.
// ABOUTME: Reads and parses input, runs the pipeline, serializes the single result and mirrors directories.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use trellis_markup::{parse_bytes, serialize, Dialect};
use trellis_tree::{Element, Node, Stage, DOCUMENT_NAME};
use walkdir::WalkDir;

use crate::error::BatchError;
use crate::options::BatchOptions;
use crate::selector::FileSelector;

/// What happened to a processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output was written; `discarded` extra result nodes were dropped.
    Written { discarded: usize },
    /// The pipeline produced nothing, so no output file exists.
    Empty,
}

/// Counts from a directory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryReport {
    pub processed: usize,
    pub copied: usize,
    pub empty: usize,
}

/// Parse `input`, run `pipeline` over the document and write the result to `output`.
///
/// Missing parent directories of `output` are created.
pub fn process_file<S>(
    pipeline: &mut S,
    options: &BatchOptions,
    input: &Path,
    output: &Path,
) -> Result<FileOutcome, BatchError>
where
    S: Stage + ?Sized,
{
    let bytes = fs::read(input).map_err(|e| BatchError::io(input, e))?;
    let document = parse_bytes(&bytes, options.dialect).map_err(|e| BatchError::markup(input, e))?;

    let results = pipeline.apply(vec![document]);
    let discarded = results.len().saturating_sub(1);
    let Some(mut root) = results.into_iter().next() else {
        warn!(input = %input.display(), "pipeline returned no nodes, nothing written");
        return Ok(FileOutcome::Empty);
    };
    if discarded > 0 {
        warn!(
            input = %input.display(),
            discarded,
            "pipeline returned more than one node, keeping the first"
        );
    }
    if !root.is_document() {
        warn!(
            input = %input.display(),
            name = root.name().unwrap_or("#text"),
            "pipeline result is not a document, wrapping it"
        );
        root = Node::from(Element::new(DOCUMENT_NAME).with_child(root));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BatchError::io(parent, e))?;
    }
    let text = serialize(&root, &options.serialize_options());
    fs::write(output, text).map_err(|e| BatchError::io(output, e))?;

    debug!(input = %input.display(), output = %output.display(), "processed file");
    Ok(FileOutcome::Written { discarded })
}

/// [`process_file`] for HTML parsed as-is, written back as pretty HTML.
///
/// The input is read as a fragment, so no `html`, `head` or `body`
/// elements or doctype are added that the file did not have.
pub fn process_html_file<S>(
    pipeline: &mut S,
    input: &Path,
    output: &Path,
) -> Result<FileOutcome, BatchError>
where
    S: Stage + ?Sized,
{
    let options = BatchOptions::builder()
        .dialect(Dialect::HtmlFragment)
        .build();
    process_file(pipeline, &options, input, output)
}

/// Mirror `input_dir` into `output_dir`, running `pipeline` over selected files.
///
/// Every directory is recreated, empty ones included. Files rejected by
/// `selector` are copied byte for byte.
pub fn process_directory<S>(
    pipeline: &mut S,
    options: &BatchOptions,
    input_dir: &Path,
    output_dir: &Path,
    selector: &FileSelector,
) -> Result<DirectoryReport, BatchError>
where
    S: Stage + ?Sized,
{
    let mut report = DirectoryReport::default();

    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = entry.map_err(BatchError::walk)?;
        let input = entry.path();
        let relative = input.strip_prefix(input_dir).map_err(BatchError::walk)?;
        let target = output_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BatchError::io(&target, e))?;
            continue;
        }

        if selector.is_selected(input) {
            match process_file(&mut *pipeline, options, input, &target)? {
                FileOutcome::Written { .. } => report.processed += 1,
                FileOutcome::Empty => report.empty += 1,
            }
        } else {
            fs::copy(input, &target).map_err(|e| BatchError::io(input, e))?;
            debug!(input = %input.display(), output = %target.display(), "copied file");
            report.copied += 1;
        }
    }

    debug!(
        processed = report.processed,
        copied = report.copied,
        empty = report.empty,
        "finished directory"
    );
    Ok(report)
}
