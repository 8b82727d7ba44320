//! Suggestion ranking using expected remaining size and entropy.
//!
//! Ranking runs in two stages. Stage A scores the whole guess pool with the
//! cheap letter-frequency heuristic and keeps the best `shortlist_cap` words,
//! plus every remaining solution when few are left. Stage B partitions the
//! solution set by the pattern each shortlisted word would produce and derives
//! the exact metrics from the bucket sizes.

use crate::error::SolverError;
use crate::feedback::FeedbackPattern;
use crate::frequency::LetterFrequency;
use crate::word::Word;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Ordering applied to scored candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortPolicy {
    /// Ascending expected remaining, ties by descending entropy
    #[default]
    ByExpected,
    /// Descending entropy, ties by ascending expected remaining
    ByEntropy,
    /// Descending composite score, ties by ascending expected remaining
    ByOverall,
}

impl FromStr for SortPolicy {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expected" | "exp" => Ok(SortPolicy::ByExpected),
            "entropy" | "ent" => Ok(SortPolicy::ByEntropy),
            "overall" | "best" => Ok(SortPolicy::ByOverall),
            other => Err(SolverError::Config(format!(
                "unknown sort policy '{}' (expected, entropy, overall)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortPolicy::ByExpected => "expected",
            SortPolicy::ByEntropy => "entropy",
            SortPolicy::ByOverall => "overall",
        };
        f.write_str(name)
    }
}

/// Weights of the composite score. Each metric is min-max normalized across
/// the candidate set before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub expected: f64,
    pub entropy: f64,
    pub frequency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            expected: 0.6,
            entropy: 0.3,
            frequency: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankerConfig {
    /// Number of frequency-ranked guesses kept for exact scoring
    pub shortlist_cap: usize,
    /// At or below this many solutions, all of them join the shortlist
    pub union_threshold: usize,
    /// At or below this many solutions, the solutions themselves are returned
    pub endgame_threshold: usize,
    /// Length of the returned ranking
    pub display_limit: usize,
    /// Candidates scored between two progress callbacks; 0 disables them
    pub yield_interval: usize,
    pub weights: ScoreWeights,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            shortlist_cap: 120,
            union_threshold: 80,
            endgame_threshold: 10,
            display_limit: 10,
            yield_interval: 40,
            weights: ScoreWeights::default(),
        }
    }
}

/// Metrics of one candidate guess, valid for a single ranking call.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub word: Word,
    pub expected_remaining: f64,
    pub entropy_bits: f64,
    pub frequency_score: u32,
    pub overall: f64,
    pub is_possible_answer: bool,
}

/// Result of a ranking request.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    /// Few enough solutions remain that they are listed directly as answers.
    Endgame(Vec<Word>),
    /// Scored guesses, best first.
    Ranked(Vec<CandidateScore>),
}

impl Suggestions {
    pub fn len(&self) -> usize {
        match self {
            Suggestions::Endgame(words) => words.len(),
            Suggestions::Ranked(scores) => scores.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Suggested words in order
    pub fn words(&self) -> Vec<Word> {
        match self {
            Suggestions::Endgame(words) => words.clone(),
            Suggestions::Ranked(scores) => scores.iter().map(|s| s.word).collect(),
        }
    }

    pub fn best(&self) -> Option<Word> {
        match self {
            Suggestions::Endgame(words) => words.first().copied(),
            Suggestions::Ranked(scores) => scores.first().map(|s| s.word),
        }
    }
}

/// Count of solutions per feedback pattern for one guess.
#[derive(Debug, Clone)]
pub struct PatternBuckets {
    counts: [u32; FeedbackPattern::NUM_PATTERNS],
}

impl PatternBuckets {
    pub fn count(&self, pattern: FeedbackPattern) -> u32 {
        self.counts[pattern.0 as usize]
    }

    /// Non-empty buckets
    pub fn iter(&self) -> impl Iterator<Item = (FeedbackPattern, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (FeedbackPattern(i as u8), c))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Expected size of the solution set after this guess, Σc²/N.
    pub fn expected_remaining(&self) -> f64 {
        let n = self.total();
        if n == 0 {
            return 0.0;
        }
        let sum_sq: u64 = self.counts.iter().map(|&c| c as u64 * c as u64).sum();
        sum_sq as f64 / n as f64
    }

    /// Shannon entropy of the partition in bits
    pub fn entropy_bits(&self) -> f64 {
        let n = self.total();
        if n == 0 {
            return 0.0;
        }
        let n = n as f64;
        let mut entropy = 0.0;
        for &count in &self.counts {
            if count > 0 {
                let p = count as f64 / n;
                entropy -= p * p.log2();
            }
        }
        entropy
    }
}

/// Partition `solutions` by the pattern `candidate` would receive.
pub fn partition(candidate: &Word, solutions: &[Word]) -> PatternBuckets {
    let mut counts = [0u32; FeedbackPattern::NUM_PATTERNS];
    for solution in solutions {
        counts[FeedbackPattern::calculate(candidate, solution).0 as usize] += 1;
    }
    PatternBuckets { counts }
}

/// Stage A: frequency-ranked guesses, widened with all solutions when few
/// remain. Duplicates are dropped, first position wins.
pub fn shortlist(
    guess_pool: &[Word],
    solutions: &[Word],
    frequency: &LetterFrequency,
    config: &RankerConfig,
) -> Vec<Word> {
    let mut scored: Vec<(Word, u32)> = guess_pool
        .iter()
        .map(|w| (*w, frequency.score(w)))
        .collect();
    // Stable, so equal scores keep dictionary order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut seen = HashSet::new();
    let mut pool: Vec<Word> = scored
        .into_iter()
        .map(|(w, _)| w)
        .filter(|w| seen.insert(*w))
        .take(config.shortlist_cap)
        .collect();

    if solutions.len() <= config.union_threshold {
        pool.extend(solutions.iter().copied().filter(|w| seen.insert(*w)));
    }
    pool
}

/// Called with (candidates scored, shortlist size) at each yield point.
pub type ProgressSink<'a> = dyn FnMut(usize, usize) + 'a;

/// Rank candidate guesses against the current solution set.
pub fn rank(
    guess_pool: &[Word],
    solutions: &[Word],
    policy: SortPolicy,
    config: &RankerConfig,
) -> Suggestions {
    rank_with_progress(guess_pool, solutions, policy, config, &mut |_, _| {})
}

/// [`rank`] with a progress callback invoked every `yield_interval`
/// candidates during exact scoring. The callback cannot affect the result.
pub fn rank_with_progress(
    guess_pool: &[Word],
    solutions: &[Word],
    policy: SortPolicy,
    config: &RankerConfig,
    progress: &mut ProgressSink<'_>,
) -> Suggestions {
    if solutions.len() <= config.endgame_threshold {
        return Suggestions::Endgame(solutions.to_vec());
    }

    let frequency = LetterFrequency::from_solutions(solutions);
    let candidates = shortlist(guess_pool, solutions, &frequency, config);
    let in_solutions: HashSet<Word> = solutions.iter().copied().collect();
    debug!(
        shortlist = candidates.len(),
        solutions = solutions.len(),
        %policy,
        "scoring shortlist"
    );

    let total = candidates.len();
    let mut scores = Vec::with_capacity(total);
    for (idx, candidate) in candidates.iter().enumerate() {
        if config.yield_interval > 0 && idx % config.yield_interval == 0 {
            progress(idx, total);
        }
        let buckets = partition(candidate, solutions);
        scores.push(CandidateScore {
            word: *candidate,
            expected_remaining: buckets.expected_remaining(),
            entropy_bits: buckets.entropy_bits(),
            frequency_score: frequency.score(candidate),
            overall: 0.0,
            is_possible_answer: in_solutions.contains(candidate),
        });
    }
    progress(total, total);

    apply_overall(&mut scores, &config.weights);
    sort_scores(&mut scores, policy);
    scores.truncate(config.display_limit);
    Suggestions::Ranked(scores)
}

#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            Span {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |s, v| Span {
                min: s.min.min(v),
                max: s.max.max(v),
            },
        )
    }

    /// Position of `v` in [0, 1]; 0.5 when every value is equal
    fn normalize(&self, v: f64) -> f64 {
        if self.max == self.min {
            0.5
        } else {
            (v - self.min) / (self.max - self.min)
        }
    }
}

/// Fill in the composite score of every candidate.
pub fn apply_overall(scores: &mut [CandidateScore], weights: &ScoreWeights) {
    if scores.is_empty() {
        return;
    }
    let expected = Span::of(scores.iter().map(|s| s.expected_remaining));
    let entropy = Span::of(scores.iter().map(|s| s.entropy_bits));
    let frequency = Span::of(scores.iter().map(|s| s.frequency_score as f64));

    for s in scores.iter_mut() {
        s.overall = weights.expected * (1.0 - expected.normalize(s.expected_remaining))
            + weights.entropy * entropy.normalize(s.entropy_bits)
            + weights.frequency * frequency.normalize(s.frequency_score as f64);
    }
}

fn compare(a: &CandidateScore, b: &CandidateScore, policy: SortPolicy) -> Ordering {
    let primary = match policy {
        SortPolicy::ByExpected => a
            .expected_remaining
            .total_cmp(&b.expected_remaining)
            .then(b.entropy_bits.total_cmp(&a.entropy_bits)),
        SortPolicy::ByEntropy => b
            .entropy_bits
            .total_cmp(&a.entropy_bits)
            .then(a.expected_remaining.total_cmp(&b.expected_remaining)),
        SortPolicy::ByOverall => b
            .overall
            .total_cmp(&a.overall)
            .then(a.expected_remaining.total_cmp(&b.expected_remaining)),
    };
    // A guess that can itself win goes first on a full tie
    primary.then(b.is_possible_answer.cmp(&a.is_possible_answer))
}

/// Stable sort under `policy`.
pub fn sort_scores(scores: &mut [CandidateScore], policy: SortPolicy) {
    scores.sort_by(|a, b| compare(a, b, policy));
}
