//! Letter-frequency scoring used to shortlist guesses cheaply.

use crate::word::Word;
use crate::ALPHABET_SIZE;

/// For each letter, the number of solutions containing it at least once.
///
/// Built from the current solution set; rebuild it whenever that set changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterFrequency {
    counts: [u32; ALPHABET_SIZE],
}

impl LetterFrequency {
    pub fn from_solutions(solutions: &[Word]) -> Self {
        let mut counts = [0u32; ALPHABET_SIZE];
        for word in solutions {
            for letter in word.distinct_letters() {
                counts[letter] += 1;
            }
        }
        Self { counts }
    }

    /// Number of solutions containing `letter`, case-insensitive; 0 for
    /// anything outside a-z
    pub fn count(&self, letter: u8) -> u32 {
        let letter = letter.to_ascii_lowercase();
        if letter.is_ascii_lowercase() {
            self.counts[(letter - b'a') as usize]
        } else {
            0
        }
    }

    /// Sum of the counts of the word's distinct letters.
    ///
    /// Letters absent from every solution contribute nothing, so guesses made
    /// of eliminated letters sink to the bottom on their own.
    pub fn score(&self, word: &Word) -> u32 {
        word.distinct_letters().map(|l| self.counts[l]).sum()
    }
}

/// One-off score of `word` against `solutions`.
pub fn score(word: &Word, solutions: &[Word]) -> u32 {
    LetterFrequency::from_solutions(solutions).score(word)
}
