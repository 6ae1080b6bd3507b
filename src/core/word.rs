//! Words handed out by the word supplier.
//!
//! A word is only constructed through validation, which uses Stillwater's
//! `Validation` to report every problem with a supplied word in one pass.

use super::letter::LetterLayout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Letters per word, and per winning answer.
pub const WORD_LENGTH: usize = 4;

/// A single problem found while validating a supplied word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("'{text}' is not four ASCII letters")]
    MalformedText { text: String },

    #[error("no possible answers supplied")]
    NoAnswers,

    #[error("answer '{answer}' is not four ASCII letters")]
    MalformedAnswer { answer: String },

    #[error("answer '{answer}' does not use the letters of '{text}'")]
    NotAPermutation { answer: String, text: String },
}

/// Every problem found with a supplied word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("word '{text}' rejected: {} problem(s)", .errors.len())]
pub struct InvalidWord {
    pub text: String,
    pub errors: Vec<WordError>,
}

/// A four-letter word together with every arrangement of its letters that
/// wins the round.
///
/// Deserializing goes through the same validation as [`Word::new`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "UncheckedWord")]
pub struct Word {
    text: String,
    possible_answers: BTreeSet<String>,
}

#[derive(Deserialize)]
struct UncheckedWord {
    text: String,
    possible_answers: Vec<String>,
}

impl TryFrom<UncheckedWord> for Word {
    type Error = InvalidWord;

    fn try_from(unchecked: UncheckedWord) -> Result<Self, Self::Error> {
        Word::new(&unchecked.text, unchecked.possible_answers)
    }
}

impl Word {
    /// Validate and build a word. Text and answers are lowercased first.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWord`] listing all problems when the text is not four
    /// ASCII letters, no answers are given, or any answer is not a
    /// rearrangement of the text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fourletters::core::Word;
    ///
    /// let word = Word::new("STOP", ["stop", "pots", "tops", "spot", "post", "opts"]).unwrap();
    /// assert!(word.is_answer("post"));
    /// assert!(!word.is_answer("stoo"));
    ///
    /// let rejected = Word::new("toolong", ["stop", "xy"]).unwrap_err();
    /// assert_eq!(rejected.errors.len(), 2);
    /// ```
    pub fn new<I, S>(text: &str, possible_answers: I) -> Result<Self, InvalidWord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = text.to_ascii_lowercase();
        let possible_answers: BTreeSet<String> = possible_answers
            .into_iter()
            .map(|answer| answer.as_ref().to_ascii_lowercase())
            .collect();

        match validate(&text, &possible_answers) {
            Validation::Success(_) => Ok(Self {
                text,
                possible_answers,
            }),
            Validation::Failure(errors) => Err(InvalidWord {
                text,
                errors: errors.iter().cloned().collect(),
            }),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn possible_answers(&self) -> &BTreeSet<String> {
        &self.possible_answers
    }

    pub fn is_answer(&self, candidate: &str) -> bool {
        self.possible_answers.contains(candidate)
    }

    /// Bind the word's letters to the four slots in reading order.
    pub fn layout(&self) -> LetterLayout {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, letter) in letters.iter_mut().zip(self.text.chars()) {
            *slot = letter;
        }
        LetterLayout::new(letters)
    }
}

fn is_well_formed(value: &str) -> bool {
    value.len() == WORD_LENGTH && value.bytes().all(|b| b.is_ascii_lowercase())
}

fn sorted_letters(value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.sort_unstable();
    bytes
}

fn validate(text: &str, answers: &BTreeSet<String>) -> Validation<(), NonEmptyVec<WordError>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<WordError>>> = Vec::new();

    let text_ok = is_well_formed(text);
    checks.push(if text_ok {
        Validation::success(())
    } else {
        Validation::fail(WordError::MalformedText {
            text: text.to_string(),
        })
    });

    if answers.is_empty() {
        checks.push(Validation::fail(WordError::NoAnswers));
    }

    let expected = sorted_letters(text);
    for answer in answers {
        let check = if !is_well_formed(answer) {
            Validation::fail(WordError::MalformedAnswer {
                answer: answer.clone(),
            })
        } else if text_ok && sorted_letters(answer) != expected {
            Validation::fail(WordError::NotAPermutation {
                answer: answer.clone(),
                text: text.to_string(),
            })
        } else {
            Validation::success(())
        };
        checks.push(check);
    }

    Validation::all_vec(checks).map(|_| ())
}
