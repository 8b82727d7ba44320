use std::fs::File;
use std::io::Write;
use wordle_assist::dictionary::parse_words;
use wordle_assist::{load_dictionary, Dictionary, SolverError, Word};

fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

#[test]
fn test_parse_folds_dedupes_and_drops_blanks() {
    let words = parse_words("Crane\n\n  slate trace\r\nCRANE\n\t\nbrake\n").unwrap();
    assert_eq!(words, vec![w("crane"), w("slate"), w("trace"), w("brake")]);
}

#[test]
fn test_parse_rejects_malformed_word() {
    match parse_words("crane\ncran\nslate") {
        Err(SolverError::InvalidWord(word)) => assert_eq!(word, "cran"),
        other => panic!("expected InvalidWord, got {:?}", other),
    }
    assert!(parse_words("crane sl4te").is_err());
}

#[test]
fn test_single_list_plays_both_roles() {
    let dictionary = Dictionary::parse("crane slate trace").unwrap();
    assert_eq!(dictionary.answers(), dictionary.guesses());
    assert!(dictionary.contains_guess(&w("slate")));
    assert!(!dictionary.contains_guess(&w("zzzzz")));
}

#[test]
fn test_answers_are_always_guesses() {
    let dictionary = Dictionary::from_texts("crane trace", "slate salet").unwrap();
    assert_eq!(dictionary.answers(), &[w("crane"), w("trace")]);
    assert_eq!(
        dictionary.guesses(),
        &[w("slate"), w("salet"), w("crane"), w("trace")]
    );
    for answer in dictionary.answers() {
        assert!(dictionary.contains_guess(answer));
    }
}

#[test]
fn test_empty_dictionary() {
    let dictionary = Dictionary::parse("\n\n").unwrap();
    assert!(dictionary.is_empty());
    assert!(dictionary.guesses().is_empty());
}

#[test]
fn test_load_from_files() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let answers_path = dir.path().join("answers.txt");
    let guesses_path = dir.path().join("guesses.txt");

    let mut answers_file = File::create(&answers_path).unwrap();
    writeln!(answers_file, "crane").unwrap();
    writeln!(answers_file, "trace").unwrap();
    let mut guesses_file = File::create(&guesses_path).unwrap();
    writeln!(guesses_file, "soare").unwrap();

    let dictionary = Dictionary::load(&answers_path, Some(guesses_path.as_path())).unwrap();
    assert_eq!(dictionary.answers().len(), 2);
    assert_eq!(dictionary.guesses().len(), 3);

    let answers_only = Dictionary::load(&answers_path, None).unwrap();
    assert_eq!(answers_only.answers(), answers_only.guesses());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Dictionary::load(&dir.path().join("missing.txt"), None);
    assert!(matches!(result, Err(SolverError::Io(_))));
}

#[test]
fn test_embedded_dictionary() {
    let dictionary = load_dictionary().unwrap();
    assert!(dictionary.answers().len() > 500);
    assert!(dictionary.guesses().len() > dictionary.answers().len());
    assert!(dictionary.answers().contains(&w("crane")));
    for answer in dictionary.answers() {
        assert!(dictionary.contains_guess(answer));
    }
}
