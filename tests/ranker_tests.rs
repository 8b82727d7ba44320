use rstest::rstest;
use wordle_assist::frequency::LetterFrequency;
use wordle_assist::ranker::{
    apply_overall, partition, rank_with_progress, shortlist, ScoreWeights,
};
use wordle_assist::{
    load_dictionary, rank, CandidateScore, RankerConfig, SortPolicy, Suggestions, Word,
};

fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

fn words(list: &[&str]) -> Vec<Word> {
    list.iter().map(|s| w(s)).collect()
}

fn no_endgame() -> RankerConfig {
    RankerConfig {
        endgame_threshold: 0,
        ..RankerConfig::default()
    }
}

fn ranked(suggestions: Suggestions) -> Vec<CandidateScore> {
    match suggestions {
        Suggestions::Ranked(scores) => scores,
        Suggestions::Endgame(words) => panic!("unexpected endgame: {:?}", words),
    }
}

#[test]
fn test_two_way_split_metrics() {
    let solutions = words(&["abcde", "edcba"]);
    let buckets = partition(&w("abcde"), &solutions);

    assert_eq!(buckets.iter().count(), 2);
    assert_eq!(buckets.total(), 2);
    assert_eq!(buckets.expected_remaining(), 1.0);
    assert!((buckets.entropy_bits() - 1.0).abs() < 1e-12);
}

#[test]
fn test_single_bucket_has_zero_entropy() {
    let solutions = words(&["abcde", "edcba"]);
    let buckets = partition(&w("fghij"), &solutions);
    assert_eq!(buckets.iter().count(), 1);
    assert_eq!(buckets.expected_remaining(), 2.0);
    assert_eq!(buckets.entropy_bits(), 0.0);
}

#[test]
fn test_partition_of_empty_set() {
    let buckets = partition(&w("crane"), &[]);
    assert_eq!(buckets.total(), 0);
    assert_eq!(buckets.expected_remaining(), 0.0);
    assert_eq!(buckets.entropy_bits(), 0.0);
}

#[test]
fn test_partition_covers_every_solution() {
    let dictionary = load_dictionary().unwrap();
    let solutions = dictionary.answers();
    for guess in ["crane", "fuzzy", "eerie", "roate"] {
        let buckets = partition(&w(guess), solutions);
        assert_eq!(buckets.total() as usize, solutions.len());
        let summed: u32 = buckets.iter().map(|(_, c)| c).sum();
        assert_eq!(summed as usize, solutions.len());
        assert!(buckets.entropy_bits() <= (243f64).log2() + 1e-9);
    }
}

#[test]
fn test_endgame_returns_solutions() {
    let solutions = words(&["crane", "trace", "crate"]);
    let pool = words(&["slate", "crane", "trace", "crate", "roate"]);
    let suggestions = rank(&pool, &solutions, SortPolicy::ByOverall, &RankerConfig::default());
    assert_eq!(suggestions, Suggestions::Endgame(solutions.clone()));
    assert_eq!(suggestions.best(), Some(w("crane")));
}

#[test]
fn test_empty_solution_set() {
    let pool = words(&["slate", "crane"]);
    let suggestions = rank(&pool, &[], SortPolicy::ByExpected, &RankerConfig::default());
    assert!(suggestions.is_empty());
    assert_eq!(suggestions.best(), None);
}

#[test]
fn test_rank_small_set() {
    let solutions = words(&["abcde", "edcba"]);
    let pool = words(&["abcde", "edcba", "fghij"]);
    let scores = ranked(rank(&pool, &solutions, SortPolicy::ByExpected, &no_endgame()));

    let order: Vec<String> = scores.iter().map(|s| s.word.to_string()).collect();
    assert_eq!(order, vec!["abcde", "edcba", "fghij"]);

    assert_eq!(scores[0].expected_remaining, 1.0);
    assert_eq!(scores[0].frequency_score, 10);
    assert!(scores[0].is_possible_answer);
    assert!((scores[0].overall - 1.0).abs() < 1e-12);

    assert_eq!(scores[2].expected_remaining, 2.0);
    assert_eq!(scores[2].frequency_score, 0);
    assert!(!scores[2].is_possible_answer);
    assert!(scores[2].overall.abs() < 1e-12);
}

#[test]
fn test_possible_answer_wins_full_tie() {
    // "acbde" splits the pair as well as the answers themselves and is listed first
    let solutions = words(&["abcde", "edcba"]);
    let pool = words(&["acbde", "abcde", "edcba"]);
    for policy in [SortPolicy::ByExpected, SortPolicy::ByEntropy, SortPolicy::ByOverall] {
        let scores = ranked(rank(&pool, &solutions, policy, &no_endgame()));
        let order: Vec<String> = scores.iter().map(|s| s.word.to_string()).collect();
        assert_eq!(order, vec!["abcde", "edcba", "acbde"], "policy {}", policy);
    }
}

#[rstest]
#[case(SortPolicy::ByExpected)]
#[case(SortPolicy::ByEntropy)]
#[case(SortPolicy::ByOverall)]
fn test_rank_full_dictionary_ordering(#[case] policy: SortPolicy) {
    let dictionary = load_dictionary().unwrap();
    let config = RankerConfig::default();
    let scores = ranked(rank(
        dictionary.guesses(),
        dictionary.answers(),
        policy,
        &config,
    ));
    assert_eq!(scores.len(), config.display_limit);

    let frequency = LetterFrequency::from_solutions(dictionary.answers());
    for s in &scores {
        assert_eq!(s.frequency_score, frequency.score(&s.word));
        assert!(s.expected_remaining >= 1.0);
        assert!(s.expected_remaining <= dictionary.answers().len() as f64);
        assert!(s.overall >= 0.0 && s.overall <= 1.0 + 1e-12);
    }

    for pair in scores.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        match policy {
            SortPolicy::ByExpected => assert!(
                a.expected_remaining < b.expected_remaining
                    || (a.expected_remaining == b.expected_remaining
                        && a.entropy_bits >= b.entropy_bits)
            ),
            SortPolicy::ByEntropy => assert!(
                a.entropy_bits > b.entropy_bits
                    || (a.entropy_bits == b.entropy_bits
                        && a.expected_remaining <= b.expected_remaining)
            ),
            SortPolicy::ByOverall => assert!(
                a.overall > b.overall
                    || (a.overall == b.overall && a.expected_remaining <= b.expected_remaining)
            ),
        }
    }
}

#[test]
fn test_shortlist_cap_and_union() {
    let dictionary = load_dictionary().unwrap();
    let config = RankerConfig {
        shortlist_cap: 5,
        ..RankerConfig::default()
    };

    let all = dictionary.answers();
    let frequency = LetterFrequency::from_solutions(all);
    let wide = shortlist(dictionary.guesses(), all, &frequency, &config);
    assert_eq!(wide.len(), 5);
    for pair in wide.windows(2) {
        assert!(frequency.score(&pair[0]) >= frequency.score(&pair[1]));
    }

    let few = &all[..30];
    let frequency = LetterFrequency::from_solutions(few);
    let narrow = shortlist(dictionary.guesses(), few, &frequency, &config);
    for solution in few {
        assert!(narrow.contains(solution), "{} missing", solution);
    }
    let mut unique = narrow.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), narrow.len());
}

#[test]
fn test_normalization_of_equal_metrics() {
    let mut scores: Vec<CandidateScore> = ["crane", "slate"]
        .iter()
        .map(|s| CandidateScore {
            word: w(s),
            expected_remaining: 3.0,
            entropy_bits: 2.0,
            frequency_score: 40,
            overall: 0.0,
            is_possible_answer: false,
        })
        .collect();
    apply_overall(&mut scores, &ScoreWeights::default());
    for s in &scores {
        assert!((s.overall - 0.5).abs() < 1e-12);
    }
}

#[test]
fn test_progress_does_not_change_result() {
    let dictionary = load_dictionary().unwrap();
    let config = RankerConfig::default();
    let mut calls = Vec::new();
    let with_progress = rank_with_progress(
        dictionary.guesses(),
        dictionary.answers(),
        SortPolicy::ByOverall,
        &config,
        &mut |done, total| calls.push((done, total)),
    );
    let without = rank(
        dictionary.guesses(),
        dictionary.answers(),
        SortPolicy::ByOverall,
        &config,
    );
    assert_eq!(with_progress, without);

    // 120 shortlisted words, a callback every 40 plus the final one
    assert_eq!(calls, vec![(0, 120), (40, 120), (80, 120), (120, 120)]);
}

#[rstest]
#[case("expected", SortPolicy::ByExpected)]
#[case("ENTROPY", SortPolicy::ByEntropy)]
#[case("overall", SortPolicy::ByOverall)]
#[case("best", SortPolicy::ByOverall)]
fn test_sort_policy_parse(#[case] input: &str, #[case] expected: SortPolicy) {
    assert_eq!(input.parse::<SortPolicy>().unwrap(), expected);
}

#[test]
fn test_sort_policy_parse_invalid() {
    assert!("fastest".parse::<SortPolicy>().is_err());
}

#[rstest]
#[case(10, true)]
#[case(11, false)]
fn test_endgame_threshold_boundary(#[case] remaining: usize, #[case] endgame: bool) {
    let dictionary = load_dictionary().unwrap();
    let solutions = &dictionary.answers()[..remaining];
    let suggestions = rank(
        dictionary.guesses(),
        solutions,
        SortPolicy::ByExpected,
        &RankerConfig::default(),
    );
    match suggestions {
        Suggestions::Endgame(words) => {
            assert!(endgame, "{} solutions should be ranked", remaining);
            assert_eq!(words, solutions);
        }
        Suggestions::Ranked(scores) => {
            assert!(!endgame, "{} solutions should be listed", remaining);
            assert_eq!(scores.len(), 10);
        }
    }
}
