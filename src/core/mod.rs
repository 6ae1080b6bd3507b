//! Core state model.
//!
//! This module contains the pure data the rest of the crate moves around:
//! - Pages and the navigation stack
//! - Words, letter slots and the round in progress
//! - The closed set of actions
//!
//! Nothing in here performs I/O or reads the clock.

mod action;
mod letter;
mod page;
mod state;
mod word;

pub use action::Action;
pub use letter::{Letter, LetterLayout, Position};
pub use page::Page;
pub use state::{AppState, GamePhase, GameRound, PaginationState};
pub use word::{InvalidWord, Word, WordError, WORD_LENGTH};
