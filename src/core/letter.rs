//! Directional letter slots.
//!
//! A round shows the four letters of its word on the four sides of the
//! screen. The word's characters are bound to positions in reading order:
//! first letter left, second top, third right, fourth bottom. Any shuffling
//! is the word supplier's business.

use serde::{Deserialize, Serialize};

/// One of the four tappable slots.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Position {
    Left,
    Top,
    Right,
    Bottom,
}

impl Position {
    /// All positions in layout order.
    pub const ALL: [Position; 4] = [
        Position::Left,
        Position::Top,
        Position::Right,
        Position::Bottom,
    ];

    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }
}

/// A committed tap: which slot was pressed and the letter it carried.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Letter {
    pub position: Position,
    pub letter: char,
}

/// The four letters of the current word, bound to their slots.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LetterLayout {
    letters: [char; 4],
}

impl LetterLayout {
    pub fn new(letters: [char; 4]) -> Self {
        Self { letters }
    }

    /// The letter shown at `position`.
    pub fn letter_at(&self, position: Position) -> Letter {
        Letter {
            position,
            letter: self.letters[position.index()],
        }
    }

    pub fn letters(&self) -> [char; 4] {
        self.letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_binds_letters_in_reading_order() {
        let layout = LetterLayout::new(['w', 'o', 'r', 'd']);

        assert_eq!(layout.letter_at(Position::Left).letter, 'w');
        assert_eq!(layout.letter_at(Position::Top).letter, 'o');
        assert_eq!(layout.letter_at(Position::Right).letter, 'r');
        assert_eq!(layout.letter_at(Position::Bottom).letter, 'd');
    }

    #[test]
    fn letter_remembers_its_position() {
        let layout = LetterLayout::new(['a', 'b', 'c', 'd']);
        let letter = layout.letter_at(Position::Right);
        assert_eq!(letter.position, Position::Right);
    }

    #[test]
    fn all_positions_cover_every_slot() {
        let layout = LetterLayout::new(['s', 't', 'o', 'p']);
        let spelled: String = Position::ALL
            .iter()
            .map(|p| layout.letter_at(*p).letter)
            .collect();
        assert_eq!(spelled, "stop");
    }
}
