//! Pure state transitions.
//!
//! Each slice of [`AppState`] has its own reducer. [`AppReducer`] runs all of
//! them against one action and merges the results into a new state; no
//! reducer ever fails or mutates its input.
//!
//! # Example
//!
//! ```rust
//! use fourletters::core::{Action, AppState, Page};
//! use fourletters::reducer::{AppReducer, Reducer};
//!
//! let state = AppState::default();
//! let next = AppReducer.reduce(&Action::navigate(Page::Loading), &state);
//!
//! assert_eq!(next.current_page(), Page::Loading);
//! assert_eq!(next.pagination_state.history, vec![Page::Menu]);
//! assert_eq!(state.current_page(), Page::Menu); // input untouched
//! ```

mod game;
mod load_error;
mod navigation;

pub use game::GameReducer;
pub use load_error::LoadErrorReducer;
pub use navigation::NavigationReducer;

use crate::core::{Action, AppState};

/// A pure transition over one slice of the state tree.
pub trait Reducer {
    type Slice;

    /// Compute the slice that follows `state` after `action`.
    fn reduce(&self, action: &Action, state: &Self::Slice) -> Self::Slice;
}

/// Root reducer combining the navigation, game and load-error slices.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppReducer;

impl Reducer for AppReducer {
    type Slice = AppState;

    fn reduce(&self, action: &Action, state: &AppState) -> AppState {
        AppState {
            pagination_state: NavigationReducer.reduce(action, &state.pagination_state),
            game_state: GameReducer.reduce(action, &state.game_state),
            load_error: LoadErrorReducer.reduce(action, &state.load_error),
        }
    }
}
