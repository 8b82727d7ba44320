//! State of one interactive solving session.
//!
//! The session owns the dictionary and an append-only list of observations.
//! The solution set is derived data and is recomputed from the full answer
//! list whenever the observations change.

use crate::dictionary::Dictionary;
use crate::error::{SolverError, SolverResult};
use crate::feedback::FeedbackPattern;
use crate::filter::{filter, Observation};
use crate::frequency::LetterFrequency;
use crate::ranker::{rank_with_progress, ProgressSink, RankerConfig, SortPolicy, Suggestions};
use crate::word::Word;
use std::io::Write;

/// Number of distinct feedback patterns, the most one guess can split into
const PATTERNS_PER_GUESS: f64 = 243.0;

#[derive(Debug, Clone)]
pub struct Session {
    dictionary: Dictionary,
    observations: Vec<Observation>,
    solutions: Vec<Word>,
    strict: bool,
}

impl Session {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            solutions: dictionary.answers().to_vec(),
            dictionary,
            observations: Vec::new(),
            strict: false,
        }
    }

    /// Require every applied guess to be in the guess dictionary.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Answers still consistent with every observation
    pub fn remaining(&self) -> &[Word] {
        &self.solutions
    }

    pub fn possible_count(&self) -> usize {
        self.solutions.len()
    }

    /// Guesses still needed even if every guess split the remaining answers
    /// perfectly. Zero once at most one answer is left.
    pub fn minimum_guesses_lower_bound(&self) -> u32 {
        let n = self.solutions.len().max(1) as f64;
        (n.log2() / PATTERNS_PER_GUESS.log2()).ceil() as u32
    }

    /// Record a guess and its feedback.
    pub fn apply(&mut self, guess: Word, pattern: FeedbackPattern) -> SolverResult<()> {
        if self.strict && !self.dictionary.contains_guess(&guess) {
            return Err(SolverError::UnknownWord(guess.to_string()));
        }
        self.observations.push(Observation::new(guess, pattern));
        self.recompute();
        Ok(())
    }

    /// Remove the most recent observation, if any.
    pub fn undo(&mut self) -> Option<Observation> {
        let removed = self.observations.pop();
        if removed.is_some() {
            self.recompute();
        }
        removed
    }

    /// Replace the feedback of an earlier observation.
    pub fn amend(&mut self, index: usize, pattern: FeedbackPattern) -> SolverResult<()> {
        let obs = self
            .observations
            .get_mut(index)
            .ok_or(SolverError::NoSuchObservation(index))?;
        obs.pattern = pattern;
        self.recompute();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.observations.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.solutions = filter(self.dictionary.answers(), &self.observations);
        tracing::debug!(
            observations = self.observations.len(),
            remaining = self.solutions.len(),
            "recomputed solution set"
        );
    }

    pub fn suggestions(&self, policy: SortPolicy, config: &RankerConfig) -> Suggestions {
        self.suggestions_with_progress(policy, config, &mut |_, _| {})
    }

    pub fn suggestions_with_progress(
        &self,
        policy: SortPolicy,
        config: &RankerConfig,
        progress: &mut ProgressSink<'_>,
    ) -> Suggestions {
        rank_with_progress(
            self.dictionary.guesses(),
            &self.solutions,
            policy,
            config,
            progress,
        )
    }

    /// Expected number of answers left after the top suggestion.
    pub fn expected_after(suggestions: &Suggestions) -> Option<f64> {
        match suggestions {
            Suggestions::Endgame(words) if !words.is_empty() => Some(words.len() as f64),
            Suggestions::Endgame(_) => None,
            Suggestions::Ranked(scores) => scores.first().map(|s| s.expected_remaining),
        }
    }

    /// Opening guess with the best letter-frequency score, letter counts taken
    /// over the whole answer list. The earliest word wins ties.
    pub fn starter(&self) -> Option<Word> {
        let frequency = LetterFrequency::from_solutions(self.dictionary.answers());
        let mut best: Option<(Word, u32)> = None;
        for word in self.dictionary.guesses() {
            let score = frequency.score(word);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((*word, score));
            }
        }
        best.map(|(w, _)| w)
    }

    /// Write the remaining answers, one per line.
    pub fn write_remaining<W: Write>(&self, mut out: W) -> SolverResult<()> {
        for word in &self.solutions {
            writeln!(out, "{}", word)?;
        }
        out.flush()?;
        Ok(())
    }
}
