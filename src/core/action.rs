//! Everything that can happen to the application state.

use super::letter::Position;
use super::page::Page;
use super::word::Word;
use serde::{Deserialize, Serialize};

/// Input to the root reducer.
///
/// Actions are plain values built by the orchestrator and never modified
/// after construction.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Action {
    /// Show `page`. With `add_to_history` the page being left can be
    /// returned to with [`Action::Back`].
    Navigate { page: Page, add_to_history: bool },

    /// Return to the most recent page in history, or the menu.
    Back,

    /// Start a round on `word` that ends at `finish_time` (ms).
    InitGame { word: Word, finish_time: i64 },

    LeftPressed,
    TopPressed,
    RightPressed,
    BottomPressed,

    /// Discard the partial answer after a miss.
    ResetGame,

    /// Move to `word` after a win, adding `points` to the score and
    /// `bonus_time` (ms, may be negative) to the deadline.
    NextGame {
        word: Word,
        points: u32,
        bonus_time: i64,
    },

    LoadWordError,
    DismissLoadWordError,
}

impl Action {
    /// Navigate to `page`, keeping the current page in history.
    pub fn navigate(page: Page) -> Self {
        Self::Navigate {
            page,
            add_to_history: true,
        }
    }

    /// Navigate to `page` without making the current page revisitable.
    pub fn replace(page: Page) -> Self {
        Self::Navigate {
            page,
            add_to_history: false,
        }
    }

    /// The press action for a slot.
    pub fn pressed(position: Position) -> Self {
        match position {
            Position::Left => Self::LeftPressed,
            Position::Top => Self::TopPressed,
            Position::Right => Self::RightPressed,
            Position::Bottom => Self::BottomPressed,
        }
    }

    /// The slot a press action refers to, if it is one.
    pub fn pressed_position(&self) -> Option<Position> {
        match self {
            Self::LeftPressed => Some(Position::Left),
            Self::TopPressed => Some(Position::Top),
            Self::RightPressed => Some(Position::Right),
            Self::BottomPressed => Some(Position::Bottom),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "Navigate",
            Self::Back => "Back",
            Self::InitGame { .. } => "InitGame",
            Self::LeftPressed => "LeftPressed",
            Self::TopPressed => "TopPressed",
            Self::RightPressed => "RightPressed",
            Self::BottomPressed => "BottomPressed",
            Self::ResetGame => "ResetGame",
            Self::NextGame { .. } => "NextGame",
            Self::LoadWordError => "LoadWordError",
            Self::DismissLoadWordError => "DismissLoadWordError",
        }
    }
}
