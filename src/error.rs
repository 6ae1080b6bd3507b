//! Errors surfaced by the orchestration layer.

use crate::core::InvalidWord;
use thiserror::Error;

/// Failure to obtain a usable word from the word source.
///
/// The orchestrator recovers from this by stepping back one page and raising
/// the load error flag; it never reaches a reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordFetchError {
    #[error("Word source unavailable: {0}")]
    Unavailable(String),

    #[error("Word source returned an unusable word: {0}")]
    InvalidWord(#[from] InvalidWord),
}

/// A gesture arrived that the current state cannot accept.
///
/// These indicate a presentation-layer bug, so nothing is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Letter pressed with no active round")]
    NoActiveRound,
}
