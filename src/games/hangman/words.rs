//! Word sources for new sessions.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, warn};

/// Vocabulary used when none is configured.
pub const DEFAULT_WORDS: [&str; 5] = ["Hangman", "Python", "Audacix", "Bottle", "Pen"];

/// Error produced by a word source.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum WordSourceError {
    /// The vocabulary has no words.
    #[display("Vocabulary is empty")]
    Empty,

    /// A vocabulary entry is not a plain ASCII word.
    #[display("Invalid vocabulary word: '{}'", _0)]
    InvalidWord(String),

    /// The source could not produce a word.
    #[display("Word source unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for WordSourceError {}

/// Supplies the secret word for each new session.
pub trait WordSource: Send + Sync + std::fmt::Debug {
    /// Returns the next word.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError`] if no word can be produced.
    fn next_word(&self) -> Result<String, WordSourceError>;
}

/// Checks that a vocabulary is non-empty and every word is ASCII letters only.
#[instrument(skip(words), fields(count = words.len()))]
pub fn validate_vocabulary(words: &[String]) -> Result<(), WordSourceError> {
    if words.is_empty() {
        warn!("Empty vocabulary");
        return Err(WordSourceError::Empty);
    }

    if let Some(bad) = words
        .iter()
        .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_alphabetic()))
    {
        warn!(word = %bad, "Rejected vocabulary word");
        return Err(WordSourceError::InvalidWord(bad.clone()));
    }

    Ok(())
}

/// Picks words uniformly at random from a fixed vocabulary.
#[derive(Debug)]
pub struct RandomWordSource {
    words: Vec<String>,
    rng: Mutex<StdRng>,
}

impl RandomWordSource {
    /// Creates a source seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError`] if the vocabulary is invalid.
    pub fn new(words: Vec<String>) -> Result<Self, WordSourceError> {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    /// Creates a source with a fixed seed, for reproducible picks.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError`] if the vocabulary is invalid.
    pub fn seeded(words: Vec<String>, seed: u64) -> Result<Self, WordSourceError> {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: Vec<String>, rng: StdRng) -> Result<Self, WordSourceError> {
        validate_vocabulary(&words)?;
        debug!(count = words.len(), "Random word source ready");
        Ok(Self {
            words,
            rng: Mutex::new(rng),
        })
    }
}

impl Default for RandomWordSource {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl WordSource for RandomWordSource {
    fn next_word(&self) -> Result<String, WordSourceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| WordSourceError::Unavailable(e.to_string()))?;
        let index = rng.random_range(0..self.words.len());
        Ok(self.words[index].clone())
    }
}

/// Hands out words from a fixed sequence, wrapping around at the end.
#[derive(Debug)]
pub struct FixedWordSource {
    words: Vec<String>,
    cursor: AtomicUsize,
}

impl FixedWordSource {
    /// Creates a source that yields `words` in order.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError`] if the vocabulary is invalid.
    pub fn new<I, S>(words: I) -> Result<Self, WordSourceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        validate_vocabulary(&words)?;
        Ok(Self {
            words,
            cursor: AtomicUsize::new(0),
        })
    }
}

impl WordSource for FixedWordSource {
    fn next_word(&self) -> Result<String, WordSourceError> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.words.len();
        Ok(self.words[index].clone())
    }
}
