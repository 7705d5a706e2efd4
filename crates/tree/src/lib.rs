// ABOUTME: Core tree-rewrite engine for markup documents.
// ABOUTME: Re-exports the node model, rewrite primitives, pipelines, predicates, modifiers and cleaners.

//! Trellis tree - composable structural rewrites over markup trees.
//!
//! A document is a [`Node`] tree of elements and text leaves. Rewrite
//! primitives map one node to a sequence of nodes; [`Pipeline`] chains
//! sequence-to-sequence stages built from them. Parsing and serialization
//! live in `trellis-markup`, file handling in `trellis-batch`.

pub mod cleaners;
pub mod compare;
pub mod error;
pub mod modify;
pub mod node;
pub mod pipeline;
pub mod predicate;
pub mod rewrite;

pub use crate::cleaners::{clean_html, clean_html_pipeline};
pub use crate::compare::compare;
pub use crate::error::RewriteError;
pub use crate::modify::{Counter, NameGen};
pub use crate::node::{Attributes, Element, Node, DOCUMENT_NAME};
pub use crate::pipeline::{
    expect_single, join, single_to_multiple, single_to_multiple_opt, BoxedStage, Pipeline, Stage,
};
pub use crate::predicate::{Predicate, StringMatch, StringMatcher};
pub use crate::rewrite::{
    filter, flatten, join_children, lateral_effect, local_modify, local_modify_with, unwrap,
};
