//! Word lists: the answers that may be the hidden word, and the broader set of
//! words that may be typed as guesses.

use crate::error::SolverResult;
use crate::word::Word;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Immutable dictionary loaded once at startup.
///
/// Invariant: every answer is also a guess.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    answers: Vec<Word>,
    guesses: Vec<Word>,
    guess_set: HashSet<Word>,
}

/// Parse whitespace/newline separated words, dropping blanks and duplicates.
///
/// Order of first occurrence is kept. Any malformed token rejects the whole
/// list.
pub fn parse_words(text: &str) -> SolverResult<Vec<Word>> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for token in text.split_whitespace() {
        let word = Word::parse(token)?;
        if seen.insert(word) {
            words.push(word);
        }
    }
    Ok(words)
}

impl Dictionary {
    /// Build a dictionary where answers and guesses are the same list.
    pub fn from_words(words: Vec<Word>) -> Self {
        Self::new(words.clone(), words)
    }

    /// Build a dictionary from separate lists, appending any answer missing
    /// from the guess list.
    pub fn new(answers: Vec<Word>, guesses: Vec<Word>) -> Self {
        let mut answers_seen = HashSet::new();
        let answers: Vec<Word> = answers
            .into_iter()
            .filter(|w| answers_seen.insert(*w))
            .collect();

        let mut guess_set = HashSet::with_capacity(guesses.len() + answers.len());
        let mut merged = Vec::with_capacity(guesses.len() + answers.len());
        for word in guesses.into_iter().chain(answers.iter().copied()) {
            if guess_set.insert(word) {
                merged.push(word);
            }
        }

        Self {
            answers,
            guesses: merged,
            guess_set,
        }
    }

    /// Parse a single list used for both roles.
    pub fn parse(text: &str) -> SolverResult<Self> {
        Ok(Self::from_words(parse_words(text)?))
    }

    /// Parse an answers list and a guesses list.
    pub fn from_texts(answers: &str, guesses: &str) -> SolverResult<Self> {
        Ok(Self::new(parse_words(answers)?, parse_words(guesses)?))
    }

    /// Load word lists from disk. Without a guesses file the answers double as
    /// the guess list.
    pub fn load(answers: &Path, guesses: Option<&Path>) -> SolverResult<Self> {
        let answers = parse_words(&fs::read_to_string(answers)?)?;
        let guesses = match guesses {
            Some(path) => parse_words(&fs::read_to_string(path)?)?,
            None => answers.clone(),
        };
        tracing::debug!(
            answers = answers.len(),
            guesses = guesses.len(),
            "loaded word lists"
        );
        Ok(Self::new(answers, guesses))
    }

    /// Words eligible to be the hidden solution
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    /// Words eligible to be typed, a superset of the answers
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    pub fn contains_guess(&self, word: &Word) -> bool {
        self.guess_set.contains(word)
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
