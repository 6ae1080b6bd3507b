//! Screen identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A screen the presentation layer can show.
///
/// Pages are plain values; two pages are equal when they name the same
/// screen.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Menu,
    Loading,
    Game,
    Lose,
}

impl Page {
    /// Stable name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Loading => "Loading",
            Self::Game => "Game",
            Self::Lose => "Lose",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
