// ABOUTME: Error types for rewrite pipelines.
// ABOUTME: Provides RewriteError with a Multiplicity variant for single-result callers.

use thiserror::Error;

/// Errors raised around pipeline runs.
///
/// Faults inside caller-supplied predicates or mutators are panics and
/// unwind through the run; they are never converted into this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// A caller needed exactly one top-level result and got `count`.
    #[error("expected exactly one result node, got {count}")]
    Multiplicity { count: usize },
}

impl RewriteError {
    pub fn multiplicity(count: usize) -> Self {
        RewriteError::Multiplicity { count }
    }
}
