//! Page navigation slice.

use super::Reducer;
use crate::core::{Action, PaginationState};

/// Maintains the current page and the back stack.
///
/// `Navigate` pushes the page being left unless told not to; `Back` pops,
/// falling back to the menu when the stack is empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigationReducer;

impl Reducer for NavigationReducer {
    type Slice = PaginationState;

    fn reduce(&self, action: &Action, state: &PaginationState) -> PaginationState {
        match action {
            Action::Navigate {
                page,
                add_to_history,
            } => {
                let mut history = state.history.clone();
                if *add_to_history {
                    history.push(state.current_page);
                }
                PaginationState::new(*page, history)
            }
            Action::Back => {
                let mut history = state.history.clone();
                let current_page = history.pop().unwrap_or_default();
                PaginationState::new(current_page, history)
            }
            _ => state.clone(),
        }
    }
}
