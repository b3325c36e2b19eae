//! Error types for the mining pipeline.

use thiserror::Error;

/// Errors surfaced while preprocessing records or mining a tree.
///
/// There is no retry policy behind either variant: mining is a pure,
/// deterministic, in-memory computation, so both indicate a defect in the
/// input format or in tree construction and are surfaced immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MineError {
    /// A raw record was too short to hold an identifier, at least one item,
    /// and a label token. The whole build is aborted; skipping the record
    /// would corrupt the global support counts.
    #[error("record {index} has {len} fields, need an identifier, at least one item, and a label")]
    InvalidTransaction { index: usize, len: usize },

    /// A route or parent/child link was found inconsistent. Always fatal:
    /// this is a construction bug, not bad input.
    #[error("tree invariant violated: {0}")]
    InvariantViolation(String),
}

impl MineError {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        MineError::InvariantViolation(msg.into())
    }
}
