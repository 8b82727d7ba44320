//! Wordle Assist CLI
//!
//! Interactive command-line interface and one-shot commands for the solver.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, Level};
use wordle_assist::config::{RankerParams, RolloutParams};
use wordle_assist::rollout::BatchReport;
use wordle_assist::{
    load_dictionary, Dictionary, FeedbackPattern, Opening, RankerConfig, Rollout, RolloutConfig,
    RolloutResult, Session, SolverResult, SortPolicy, Suggestions, Word,
};

const HELP_TEXT: &str = include_str!("text/banner.txt");
const BANNER_LINES: usize = 5;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Answer list, one word per line (defaults to the embedded list)
    #[arg(global = true, long)]
    answers: Option<PathBuf>,

    /// Extra allowed guesses; answers are always allowed
    #[arg(global = true, long)]
    guesses: Option<PathBuf>,

    /// Reject guesses that are not in the guess list
    #[arg(global = true, long, default_value_t = false)]
    strict: bool,

    #[arg(global = true, short, long, default_value_t = false)]
    verbose: bool,

    #[command(flatten)]
    ranker: RankerParams,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive session (the default)
    Interactive,
    /// Rank next guesses after the given feedback
    Suggest(SuggestArgs),
    /// Watch the solver play against a target
    Solve(SolveArgs),
    /// Measure the mean solve length over many targets
    Bench(BenchArgs),
    /// Print the best opening guess by letter frequency
    Starter,
}

#[derive(Args, Debug)]
struct SuggestArgs {
    /// Applied feedback as WORD:PATTERN, e.g. crane:gybbb
    #[arg(short = 'g', long = "guess", value_name = "WORD:PATTERN")]
    observations: Vec<String>,

    #[arg(long, default_value = "expected")]
    sort: SortPolicy,

    /// Also list every remaining answer
    #[arg(long, default_value_t = false)]
    list: bool,
}

#[derive(Args, Debug)]
struct SolveArgs {
    target: String,

    /// Opening guess, or "random" (defaults to the frequency starter)
    #[arg(long)]
    opening: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    rollout: RolloutParams,
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Number of random targets
    #[arg(short = 'n', long, default_value_t = 100)]
    samples: usize,

    /// Play every answer once instead of sampling
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Opening guess, or "random" (defaults to the frequency starter)
    #[arg(long)]
    opening: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    rollout: RolloutParams,
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stdout().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stdout().flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load(cli: &Cli) -> SolverResult<Dictionary> {
    match &cli.answers {
        Some(path) => Dictionary::load(path, cli.guesses.as_deref()),
        None => {
            let embedded = load_dictionary()?;
            match &cli.guesses {
                Some(path) => {
                    let extra = Dictionary::load(path, None)?;
                    Ok(Dictionary::new(
                        embedded.answers().to_vec(),
                        extra.guesses().to_vec(),
                    ))
                }
                None => Ok(embedded),
            }
        }
    }
}

fn parse_opening(session: &Session, opening: Option<&str>) -> SolverResult<Opening> {
    match opening {
        Some(s) if s.eq_ignore_ascii_case("random") => Ok(Opening::Random),
        Some(s) => Ok(Opening::Fixed(Word::parse(s)?)),
        None => Ok(session
            .starter()
            .map_or(Opening::Random, Opening::Fixed)),
    }
}

fn parse_observation(entry: &str) -> SolverResult<(Word, FeedbackPattern)> {
    let (word, pattern) = entry.split_once(':').unwrap_or((entry, ""));
    Ok((Word::parse(word)?, FeedbackPattern::parse(pattern)?))
}

fn print_suggestions(suggestions: &Suggestions) {
    match suggestions {
        Suggestions::Endgame(words) if words.is_empty() => {
            println!("No possible words remaining. Use 'undo' or 'reset'.");
        }
        Suggestions::Endgame(words) => {
            println!("Remaining possible answers:");
            for (i, word) in words.iter().enumerate() {
                println!("{:>4} {:>8}  candidate", i + 1, word.to_uppercase());
            }
        }
        Suggestions::Ranked(scores) if scores.is_empty() => {
            println!("No guesses to rank.");
        }
        Suggestions::Ranked(scores) => {
            println!("Top {} suggestions:", scores.len());
            println!(
                "{:>4} {:>8} {:>10} {:>8} {:>6} {:>8} Possible?",
                "#", "Word", "Exp. left", "Entropy", "Score", "Overall"
            );
            println!("{}", "-".repeat(60));
            for (i, s) in scores.iter().enumerate() {
                println!(
                    "{:>4} {:>8} {:>10.1} {:>8.3} {:>6} {:>8.3} {}",
                    i + 1,
                    s.word.to_uppercase(),
                    s.expected_remaining,
                    s.entropy_bits,
                    s.frequency_score,
                    s.overall,
                    if s.is_possible_answer { "✓" } else { "" }
                );
            }
        }
    }
}

fn print_stats(session: &Session, suggestions: Option<&Suggestions>) {
    println!("Remaining possibilities: {}", session.possible_count());
    let bound = session.minimum_guesses_lower_bound();
    if bound == 0 {
        println!("Minimum guesses left: 0 (solved)");
    } else {
        println!("Minimum guesses left: {}", bound);
    }
    if let Some(expected) = suggestions.and_then(Session::expected_after) {
        println!("Expected left after best guess: {:.0}", expected.round());
    }
}

fn print_rollout(result: &RolloutResult) {
    for (i, obs) in result.rounds.iter().enumerate() {
        println!(
            "Guess {}: {} → {} ({})",
            i + 1,
            obs.guess.to_uppercase(),
            obs.pattern,
            obs.pattern.to_digits()
        );
    }
    println!();
    if result.solved() {
        println!("✓ Solved in {} guesses!", result.move_count);
    } else {
        println!(
            "✗ Not solved ({:?}), counted as {} guesses.",
            result.outcome, result.move_count
        );
    }
}

fn print_report(report: &BatchReport) {
    let total = report.games.len();
    if total == 0 {
        println!("No games played.");
        return;
    }
    println!("Results:");
    println!("{}", "=".repeat(40));
    println!();
    println!("Guess distribution:");
    for (guesses, count) in report.distribution() {
        let pct = count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((count * 40 / total).max(1));
        println!("  {} guesses: {:>5} ({:>5.1}%) {}", guesses, count, pct, bar);
    }
    println!();
    println!("Average guesses: {:.3}", report.mean_moves());
    println!("Total games: {}", total);
    let failures = report.failures();
    if failures > 0 {
        println!("Games not solved: {}", failures);
    } else {
        println!("✓ Every game solved.");
    }
}

fn run_bench(rollout: &Rollout, opening: Opening, samples: usize, all: bool, seed: Option<u64>) {
    let spinner = Spinner::new("Running rollouts...");
    let start = std::time::Instant::now();
    let report = if all {
        rollout.exhaustive(opening, seed)
    } else {
        rollout.batch(opening, samples, seed)
    };
    let elapsed = start.elapsed();
    spinner.stop();

    print_report(&report);
    println!("Time elapsed: {:.2?}", elapsed);
}

fn run_interactive(mut session: Session, ranker: RankerConfig) -> SolverResult<()> {
    for line in HELP_TEXT.lines().take(BANNER_LINES) {
        println!("{}", line);
    }
    println!(
        "Loaded {} answers, {} allowed guesses.",
        session.dictionary().answers().len(),
        session.dictionary().guesses().len()
    );
    println!();

    let mut policy = SortPolicy::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => {
                println!("{}", HELP_TEXT);
            }
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "suggest" | "s" | "top" => {
                let chosen = match parts.get(1).map(|s| s.parse::<SortPolicy>()) {
                    Some(Ok(p)) => p,
                    Some(Err(e)) => {
                        println!("{}", e);
                        continue;
                    }
                    None => policy,
                };
                let suggestions = session.suggestions_with_progress(
                    chosen,
                    &ranker,
                    &mut |done, total| debug!(done, total, "ranking"),
                );
                println!();
                print_suggestions(&suggestions);
                println!();
                print_stats(&session, Some(&suggestions));
                println!();
            }
            "sort" => match parts.get(1).map(|s| s.parse::<SortPolicy>()) {
                Some(Ok(p)) => {
                    policy = p;
                    println!("Sorting by {}.", policy);
                }
                Some(Err(e)) => println!("{}", e),
                None => println!("Usage: sort <expected|entropy|overall>"),
            },
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <pattern>");
                    println!("Example: feedback crane gybbb");
                    continue;
                }
                let parsed = Word::parse(parts[1])
                    .and_then(|w| FeedbackPattern::parse(parts[2]).map(|p| (w, p)));
                let (word, pattern) = match parsed {
                    Ok(v) => v,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                let prev_count = session.possible_count();
                if let Err(e) = session.apply(word, pattern) {
                    println!("{}", e);
                    continue;
                }
                let new_count = session.possible_count();

                println!();
                println!("Guess: {}", word.to_uppercase());
                println!("Feedback: {}", pattern);
                println!(
                    "Eliminated {} words ({} → {})",
                    prev_count - new_count,
                    prev_count,
                    new_count
                );

                if pattern.is_win() {
                    println!();
                    println!("🎉 Congratulations! You solved it!");
                } else if new_count == 0 {
                    println!();
                    println!("⚠️  No words match this feedback!");
                    println!("Check the pattern, then use 'undo', 'amend' or 'reset'.");
                }
                println!();
            }
            "undo" => match session.undo() {
                Some(obs) => println!(
                    "Removed {} {}. {} possibilities.",
                    obs.guess.to_uppercase(),
                    obs.pattern,
                    session.possible_count()
                ),
                None => println!("Nothing to undo."),
            },
            "amend" => {
                let index = parts.get(1).and_then(|s| s.parse::<usize>().ok());
                let pattern = parts.get(2).map(|s| FeedbackPattern::parse(s));
                match (index, pattern) {
                    (Some(n), Some(Ok(p))) if n >= 1 => match session.amend(n - 1, p) {
                        Ok(()) => println!(
                            "Updated guess {}. {} possibilities.",
                            n,
                            session.possible_count()
                        ),
                        Err(e) => println!("{}", e),
                    },
                    (_, Some(Err(e))) => println!("{}", e),
                    _ => println!("Usage: amend <guess number> <pattern>"),
                }
            }
            "history" => {
                if session.observations().is_empty() {
                    println!("No feedback applied yet.");
                }
                for (i, obs) in session.observations().iter().enumerate() {
                    println!("{:>3}. {} {}", i + 1, obs.guess.to_uppercase(), obs.pattern);
                }
            }
            "remaining" | "r" | "left" => {
                let remaining = session.remaining();
                println!();
                println!("Remaining possibilities: {}", remaining.len());
                if remaining.len() <= 40 {
                    for (i, word) in remaining.iter().enumerate() {
                        if i > 0 && i % 10 == 0 {
                            println!();
                        }
                        print!("{:>8}", word.to_uppercase());
                    }
                    println!();
                }
                println!();
            }
            "stats" => {
                print_stats(&session, None);
            }
            "export" => {
                let Some(path) = parts.get(1) else {
                    println!("Usage: export <path>");
                    continue;
                };
                if session.possible_count() == 0 {
                    println!("No remaining words.");
                    continue;
                }
                let written = File::create(path)
                    .map_err(Into::into)
                    .and_then(|f| session.write_remaining(BufWriter::new(f)));
                match written {
                    Ok(()) => println!("Wrote {} words to {}", session.possible_count(), path),
                    Err(e) => println!("{}", e),
                }
            }
            "starter" => match session.starter() {
                Some(word) => println!("Starter: {}", word.to_uppercase()),
                None => println!("Dictionary is empty."),
            },
            "solve" => {
                let Some(target) = parts.get(1) else {
                    println!("Usage: solve <target_word>");
                    continue;
                };
                let target = match Word::parse(target) {
                    Ok(w) => w,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let opening = match parse_opening(&session, parts.get(2).copied()) {
                    Ok(o) => o,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                println!();
                println!("Solving for: {}", target.to_uppercase());
                println!();
                let config = RolloutConfig {
                    ranker: ranker.clone(),
                    ..RolloutConfig::default()
                };
                let rollout = Rollout::from_dictionary(session.dictionary(), config);
                let result = rollout.play(opening, target, &mut fastrand::Rng::new());
                print_rollout(&result);
                println!();
            }
            "bench" | "benchmark" => {
                let samples: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
                let opening = match parse_opening(&session, None) {
                    Ok(o) => o,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let config = RolloutConfig {
                    ranker: ranker.clone(),
                    ..RolloutConfig::default()
                };
                let rollout = Rollout::from_dictionary(session.dictionary(), config);
                println!();
                println!("Running {} rollouts...", samples);
                run_bench(&rollout, opening, samples, false, None);
                println!();
            }
            "reset" => {
                session.reset();
                println!(
                    "Reset to initial state. {} words available.",
                    session.possible_count()
                );
            }
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> SolverResult<()> {
    let dictionary = load(&cli)?;
    let ranker = cli.ranker.to_config()?;
    let mut session = Session::new(dictionary);
    session.set_strict(cli.strict);

    match cli.command {
        None | Some(Commands::Interactive) => run_interactive(session, ranker),
        Some(Commands::Suggest(args)) => {
            for entry in &args.observations {
                let (word, pattern) = parse_observation(entry)?;
                session.apply(word, pattern)?;
            }
            let suggestions = session.suggestions(args.sort, &ranker);
            print_suggestions(&suggestions);
            println!();
            print_stats(&session, Some(&suggestions));
            if args.list {
                println!();
                session.write_remaining(io::stdout().lock())?;
            }
            Ok(())
        }
        Some(Commands::Solve(args)) => {
            let target = Word::parse(&args.target)?;
            let opening = parse_opening(&session, args.opening.as_deref())?;
            let config = args.rollout.to_config(ranker)?;
            let rollout = Rollout::from_dictionary(session.dictionary(), config);
            let mut rng = args
                .seed
                .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

            println!("Solving for: {}", target.to_uppercase());
            println!();
            print_rollout(&rollout.play(opening, target, &mut rng));
            Ok(())
        }
        Some(Commands::Bench(args)) => {
            let opening = parse_opening(&session, args.opening.as_deref())?;
            let config = args.rollout.to_config(ranker)?;
            let rollout = Rollout::from_dictionary(session.dictionary(), config);
            run_bench(&rollout, opening, args.samples, args.all, args.seed);
            Ok(())
        }
        Some(Commands::Starter) => {
            match session.starter() {
                Some(word) => println!("Best opening guess: {}", word.to_uppercase()),
                None => eprintln!("No words available."),
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
