//! Word supply.

use crate::core::{InvalidWord, Word};
use crate::error::WordFetchError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Asynchronously produces a random word with its winning answers.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn random_word(&self) -> Result<Word, WordFetchError>;
}

/// In-memory source that hands out a fixed list of words in rotation.
#[derive(Debug)]
pub struct StaticWordSource {
    words: Vec<Word>,
    next: AtomicUsize,
}

impl StaticWordSource {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            next: AtomicUsize::new(0),
        }
    }

    /// Build from `(text, answers)` pairs, validating each word.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fourletters::effects::StaticWordSource;
    ///
    /// let source = StaticWordSource::from_pairs(&[
    ///     ("stop", &["stop", "pots", "tops", "spot", "post", "opts"]),
    ///     ("lamp", &["lamp", "palm"]),
    /// ])
    /// .unwrap();
    /// assert_eq!(source.len(), 2);
    /// ```
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Result<Self, InvalidWord> {
        let words = pairs
            .iter()
            .map(|(text, answers)| Word::new(text, answers.iter()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(words))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[async_trait]
impl WordSource for StaticWordSource {
    async fn random_word(&self) -> Result<Word, WordFetchError> {
        if self.words.is_empty() {
            return Err(WordFetchError::Unavailable("word list is empty".to_string()));
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.words.len();
        Ok(self.words[index].clone())
    }
}
