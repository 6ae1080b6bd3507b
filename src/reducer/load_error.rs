//! Word-load error flag slice.

use super::Reducer;
use crate::core::Action;

/// Raises the load error flag on `LoadWordError` and clears it on dismissal.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadErrorReducer;

impl Reducer for LoadErrorReducer {
    type Slice = bool;

    fn reduce(&self, action: &Action, state: &bool) -> bool {
        match action {
            Action::LoadWordError => true,
            Action::DismissLoadWordError => false,
            _ => *state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_raised_and_dismissed() {
        let raised = LoadErrorReducer.reduce(&Action::LoadWordError, &false);
        assert!(raised);
        let dismissed = LoadErrorReducer.reduce(&Action::DismissLoadWordError, &raised);
        assert!(!dismissed);
    }

    #[test]
    fn other_actions_keep_the_flag() {
        assert!(LoadErrorReducer.reduce(&Action::Back, &true));
        assert!(!LoadErrorReducer.reduce(&Action::ResetGame, &false));
    }
}
