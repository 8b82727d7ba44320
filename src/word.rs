//! Fixed-length lowercase words.
//!
//! Every word entering the engine is validated here once, so the rest of the
//! crate can index letters as bytes without re-checking.

use crate::error::{SolverError, SolverResult};
use crate::{ALPHABET_SIZE, WORD_LENGTH};
use std::fmt;
use std::str::FromStr;

/// A five-letter word made of ASCII lowercase letters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Parse a word, case-folding and trimming surrounding whitespace.
    pub fn parse(s: &str) -> SolverResult<Self> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(SolverError::InvalidWord(trimmed.to_string()));
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, &b) in letters.iter_mut().zip(bytes) {
            *slot = b.to_ascii_lowercase();
        }
        Ok(Self(letters))
    }

    pub fn as_bytes(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    /// Letter index (0 for 'a') at a position
    pub fn letter_index(&self, position: usize) -> usize {
        (self.0[position] - b'a') as usize
    }

    /// Bit set of the letters in this word, bit 0 for 'a'
    pub fn letter_mask(&self) -> u32 {
        self.0
            .iter()
            .fold(0u32, |mask, &b| mask | 1 << (b - b'a'))
    }

    /// Each letter of the word once, as alphabet indices in ascending order.
    pub fn distinct_letters(&self) -> impl Iterator<Item = usize> {
        let mask = self.letter_mask();
        (0..ALPHABET_SIZE).filter(move |i| mask & (1 << i) != 0)
    }

    /// Number of occurrences of a letter (given as a byte) in this word
    pub fn count(&self, letter: u8) -> usize {
        self.0.iter().filter(|&&b| b == letter).count()
    }

    pub fn to_uppercase(&self) -> String {
        self.0.iter().map(|&b| (b as char).to_ascii_uppercase()).collect()
    }
}

impl FromStr for Word {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.to_string())
    }
}
