//! Fourletters: the state core of a timed four-letter word game
//!
//! The player sees the four letters of a word on the four sides of the
//! screen and taps them in an order that spells a valid word before the
//! clock runs out. Each win scores a point, brings a new word and adds time,
//! capped at one full round.
//!
//! The crate follows a "pure core, imperative shell" layout with
//! unidirectional data flow:
//!
//! - **core**: immutable state tree, pages, words and the closed action set
//! - **reducer**: pure `(Action, State) -> State` functions per state slice
//! - **store**: holds the current snapshot, dispatches, notifies subscribers
//! - **effects**: the clock and word source collaborators
//! - **orchestrator**: maps gestures and async fetch results to actions
//!
//! # Example
//!
//! ```rust
//! use fourletters::config::GameConfig;
//! use fourletters::core::{GamePhase, Page};
//! use fourletters::effects::{ManualClock, StaticWordSource};
//! use fourletters::orchestrator::ActionCreator;
//! use fourletters::store::Store;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let words = StaticWordSource::from_pairs(&[
//!     ("stop", &["stop", "pots", "tops", "spot", "post", "opts"]),
//!     ("lamp", &["lamp", "palm"]),
//! ])
//! .unwrap();
//! let creator = ActionCreator::new(
//!     Store::default(),
//!     Arc::new(words),
//!     Arc::new(ManualClock::new(0)),
//!     GameConfig::default(),
//! );
//!
//! creator.initiate_game();
//! creator.pump().await;
//! assert_eq!(creator.store().state().phase(), GamePhase::Playing);
//!
//! // s-p-o-t
//! creator.left_letter_pressed().unwrap();
//! creator.bottom_letter_pressed().unwrap();
//! creator.right_letter_pressed().unwrap();
//! creator.top_letter_pressed().unwrap();
//! creator.pump().await;
//!
//! let state = creator.store().state();
//! assert_eq!(state.game_state.as_ref().unwrap().score, 1);
//! assert_eq!(state.current_page(), Page::Game);
//! # }
//! ```

pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod orchestrator;
pub mod reducer;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Action, AppState, Page};
pub use error::{ActionError, WordFetchError};
pub use orchestrator::ActionCreator;
pub use store::Store;
