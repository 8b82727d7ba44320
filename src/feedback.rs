//! Feedback calculation for Wordle guesses.
//!
//! This module computes the feedback pattern (green/yellow/gray) a guess
//! receives against a hypothetical solution, and the compact key used to
//! bucket solutions by pattern.

use crate::error::{SolverError, SolverResult};
use crate::word::Word;
use crate::{ALPHABET_SIZE, WORD_LENGTH};

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter not in word, or all of its occurrences already accounted for (gray)
    Absent,
    /// Letter in the word but at another position (yellow)
    Present,
    /// Correct letter in correct position (green)
    Correct,
}

impl Feedback {
    /// Base-3 digit used in the pattern key
    pub fn digit(self) -> u8 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }

    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' | '.' => Some(Feedback::Absent),
            _ => None,
        }
    }
}

/// A complete feedback pattern for a 5-letter guess.
/// Encoded as a single u8 value (0-242).
/// Each position can be 0 (absent), 1 (present), or 2 (correct).
/// Pattern = p0 + 3*p1 + 9*p2 + 27*p3 + 81*p4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedbackPattern(pub u8);

impl FeedbackPattern {
    /// The pattern indicating all correct (winning)
    pub const ALL_CORRECT: Self = Self(2 + 2 * 3 + 2 * 9 + 2 * 27 + 2 * 81); // 242

    /// Total number of possible patterns (3^5)
    pub const NUM_PATTERNS: usize = 243;

    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: [Feedback; WORD_LENGTH]) -> Self {
        let mut pattern: u8 = 0;
        let mut multiplier: u8 = 1;
        for fb in feedbacks {
            pattern += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Self(pattern)
    }

    /// Calculate the feedback pattern for a guess against a solution.
    ///
    /// Greens are assigned first, each consuming one occurrence of its letter
    /// from the solution. Remaining positions are then scanned left to right:
    /// a letter with unconsumed occurrences left becomes yellow and consumes
    /// one, otherwise it is gray. With a repeated guess letter and a single
    /// occurrence in the solution, only the leftmost non-green copy is marked.
    pub fn calculate(guess: &Word, solution: &Word) -> Self {
        let guess_bytes = guess.as_bytes();
        let solution_bytes = solution.as_bytes();

        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        let mut solution_remaining = [0u8; ALPHABET_SIZE];

        for i in 0..WORD_LENGTH {
            if guess_bytes[i] == solution_bytes[i] {
                feedback[i] = Feedback::Correct;
            } else {
                solution_remaining[solution.letter_index(i)] += 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if feedback[i] != Feedback::Correct {
                let idx = guess.letter_index(i);
                if solution_remaining[idx] > 0 {
                    feedback[i] = Feedback::Present;
                    solution_remaining[idx] -= 1;
                }
            }
        }

        Self::new(feedback)
    }

    /// Convert pattern to array of feedbacks
    pub fn to_feedbacks(self) -> [Feedback; WORD_LENGTH] {
        let mut pattern = self.0;
        let mut feedbacks = [Feedback::Absent; WORD_LENGTH];
        for feedback in feedbacks.iter_mut() {
            *feedback = match pattern % 3 {
                0 => Feedback::Absent,
                1 => Feedback::Present,
                _ => Feedback::Correct,
            };
            pattern /= 3;
        }
        feedbacks
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self) -> bool {
        self == Self::ALL_CORRECT
    }

    /// Parse a pattern from a string like "gybbb" or "21000"
    pub fn parse(s: &str) -> SolverResult<Self> {
        let trimmed = s.trim();
        let feedbacks: Option<Vec<_>> = trimmed.chars().map(Feedback::from_char).collect();
        feedbacks
            .and_then(|f| <[Feedback; WORD_LENGTH]>::try_from(f).ok())
            .map(Self::new)
            .ok_or_else(|| SolverError::InvalidPattern(trimmed.to_string()))
    }

    /// Canonical digit key, one "0"/"1"/"2" per position starting at position 0
    pub fn to_digits(self) -> String {
        self.to_feedbacks()
            .iter()
            .map(|f| char::from(b'0' + f.digit()))
            .collect()
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_char()).collect()
    }
}

impl std::fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

/// Feedback a guess receives when the hidden word is `solution`.
pub fn evaluate(guess: &Word, solution: &Word) -> FeedbackPattern {
    FeedbackPattern::calculate(guess, solution)
}
