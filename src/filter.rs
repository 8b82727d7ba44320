//! Constraint filtering: narrowing a word list to the words consistent with
//! every observed feedback pattern.

use crate::feedback::FeedbackPattern;
use crate::word::Word;

/// One applied round of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Observation {
    pub guess: Word,
    pub pattern: FeedbackPattern,
}

impl Observation {
    pub fn new(guess: Word, pattern: FeedbackPattern) -> Self {
        Self { guess, pattern }
    }

    /// Whether `candidate`, were it the solution, would have produced this
    /// feedback.
    pub fn admits(&self, candidate: &Word) -> bool {
        FeedbackPattern::calculate(&self.guess, candidate) == self.pattern
    }
}

/// Words of `dictionary` consistent with all `observations`, in dictionary
/// order.
///
/// An empty result means the observations contradict each other. Callers
/// should always filter from the full dictionary so that corrected feedback
/// takes effect.
pub fn filter(dictionary: &[Word], observations: &[Observation]) -> Vec<Word> {
    dictionary
        .iter()
        .copied()
        .filter(|word| observations.iter().all(|obs| obs.admits(word)))
        .collect()
}
