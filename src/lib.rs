//! # Wordle Assist
//!
//! A solving aid for Wordle. Given a dictionary and the feedback received so
//! far, it keeps the set of answers still consistent with every observation
//! and ranks next guesses by how much they are expected to reveal.
//!
//! The engine is a pipeline of pure functions:
//! dictionary + observations → [`filter`] → solution set →
//! [`frequency`] shortlist → [`ranker`] exact scoring → ranked suggestions.
//! [`rollout`] wraps the pipeline in a loop to measure solve length, and
//! [`session`] owns the state of one interactive game.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod frequency;
pub mod ranker;
pub mod rollout;
pub mod session;
pub mod word;

pub use dictionary::Dictionary;
pub use error::{SolverError, SolverResult};
pub use feedback::{evaluate, Feedback, FeedbackPattern};
pub use filter::{filter, Observation};
pub use frequency::LetterFrequency;
pub use ranker::{rank, CandidateScore, RankerConfig, SortPolicy, Suggestions};
pub use rollout::{Opening, Rollout, RolloutConfig, RolloutOutcome, RolloutResult};
pub use session::Session;
pub use word::Word;

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Size of the letter alphabet
pub const ALPHABET_SIZE: usize = 26;

/// Load the default dictionary from the embedded word lists
pub fn load_dictionary() -> SolverResult<Dictionary> {
    Dictionary::from_texts(
        include_str!("../dictionary/answers.txt"),
        include_str!("../dictionary/guesses.txt"),
    )
}
