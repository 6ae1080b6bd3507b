//! The application state tree.
//!
//! Every value here is immutable once built: reducers produce new values and
//! never touch the ones they were given, so a snapshot handed to a subscriber
//! stays valid however many actions follow it.

use super::letter::{Letter, LetterLayout};
use super::page::Page;
use super::word::{Word, WORD_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Current page plus the pages that `Back` returns to, most recent last.
///
/// The page on screen is never also on top of `history`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct PaginationState {
    pub current_page: Page,
    pub history: Vec<Page>,
}

impl PaginationState {
    pub fn new(current_page: Page, history: Vec<Page>) -> Self {
        Self {
            current_page,
            history,
        }
    }
}

/// Progress of the round being played.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameRound {
    /// Letters committed so far, at most [`WORD_LENGTH`].
    pub answer: Vec<Letter>,
    pub possible_answers: BTreeSet<String>,
    pub layout: LetterLayout,
    /// Absolute deadline in milliseconds.
    pub finish_time: i64,
    pub score: u32,
}

impl GameRound {
    /// A fresh round on `word` with an empty answer.
    pub fn new(word: &Word, finish_time: i64, score: u32) -> Self {
        Self {
            answer: Vec::new(),
            possible_answers: word.possible_answers().clone(),
            layout: word.layout(),
            finish_time,
            score,
        }
    }

    pub fn is_answer_complete(&self) -> bool {
        self.answer.len() >= WORD_LENGTH
    }

    /// The committed letters as a string.
    pub fn answer_text(&self) -> String {
        self.answer.iter().map(|l| l.letter).collect()
    }

    /// The full answer, once all four letters are in.
    pub fn candidate(&self) -> Option<String> {
        (self.answer.len() == WORD_LENGTH).then(|| self.answer_text())
    }

    /// Milliseconds left before `finish_time`; negative once it has passed.
    pub fn time_remaining(&self, now: i64) -> i64 {
        self.finish_time - now
    }
}

/// Root of the state tree.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    pub pagination_state: PaginationState,
    pub game_state: Option<GameRound>,
    pub load_error: bool,
}

impl AppState {
    pub fn current_page(&self) -> Page {
        self.pagination_state.current_page
    }

    /// Where the session is in the gameplay lifecycle.
    pub fn phase(&self) -> GamePhase {
        if self.load_error {
            return GamePhase::LoadError;
        }
        match (self.current_page(), &self.game_state) {
            (Page::Loading, _) => GamePhase::Loading,
            (Page::Game, Some(_)) => GamePhase::Playing,
            (Page::Lose, _) => GamePhase::Lost,
            _ => GamePhase::Idle,
        }
    }
}

/// Lifecycle view derived from [`AppState`].
///
/// `Idle -> Loading -> Playing -> (Playing | LoadError | Lost)`, with
/// `LoadError` and `Lost` leading back to `Idle`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GamePhase {
    Idle,
    Loading,
    Playing,
    Lost,
    LoadError,
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Playing => "Playing",
            Self::Lost => "Lost",
            Self::LoadError => "LoadError",
        }
    }

    /// The round is over and only leaving the screen remains.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Lost)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::LoadError)
    }
}
