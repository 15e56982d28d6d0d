use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use abanagram::controller::{CallbackListener, ControllerConfig, SearchController, SourceErrorPolicy, StatusEvent};
use abanagram::dictionary::WordSource;
use abanagram::errors::AnagramError;
use abanagram::search::validate_max_words;

/// Find every combination of dictionary words that uses exactly the letters of a phrase
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// The phrase to find anagrams of; omit it to read phrases from standard input
    query: Option<String>,

    /// Word list file, one candidate per line (repeat for several lists)
    #[arg(
        short,
        long = "words",
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/words.txt")
    )]
    words: Vec<PathBuf>,

    /// Maximum number of words per anagram
    #[arg(short = 'n', long, default_value_t = 2)]
    max_words: usize,

    /// Skip word lists that cannot be read instead of giving up
    #[arg(long)]
    skip_unreadable: bool,
}

/// Entry point of the anagram CLI.
///
/// Delegates to [`try_main`], printing any error in a user-friendly way before exiting
/// with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("ABANAGRAM_DEBUG").is_ok();
    abanagram::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(anagram_err) = e.downcast_ref::<AnagramError>() {
            eprintln!("Error: {}", anagram_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Start the search worker, which loads the word lists in the background.
/// 3. Queue the query from the command line, or every line typed on stdin.
/// 4. Stop the worker once everything queued has been searched.
///
/// Results go to stdout as they are found; status updates go to stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate_max_words(cli.max_words)?;

    let policy = if cli.skip_unreadable {
        SourceErrorPolicy::Skip
    } else {
        SourceErrorPolicy::Abort
    };
    let config = ControllerConfig::new(cli.words.into_iter().map(WordSource::File).collect())
        .with_source_error_policy(policy);

    let load_failed = Arc::new(AtomicBool::new(false));
    let listener = {
        let load_failed = Arc::clone(&load_failed);
        CallbackListener::new(print_result, move |status: &StatusEvent| {
            if matches!(status, StatusEvent::LoadFailed { .. }) {
                load_failed.store(true, Ordering::SeqCst);
            }
            print_status(status);
        })
    };
    let controller = SearchController::start(config, Arc::new(listener))?;

    let submitted = match cli.query {
        Some(query) => controller.search(query, cli.max_words).map_err(Into::into),
        None => read_queries(&controller, cli.max_words),
    };
    controller.stop()?;

    // the worker has been joined, so `load_failed` is final here
    resolve_outcome(submitted, load_failed.load(Ordering::SeqCst))
}

const LOAD_FAILED_MESSAGE: &str = "no searches were run because the word lists could not be loaded";

/// A failed load outranks any submission error: it is what made the worker stop accepting
/// commands in the first place.
fn resolve_outcome(
    submitted: Result<(), Box<dyn std::error::Error>>,
    load_failed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if load_failed {
        return Err(LOAD_FAILED_MESSAGE.into());
    }
    submitted
}

/// Queue one search per input line until an empty line, `exit`, or end of input.
fn read_queries(controller: &SearchController, max_words: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut prompt = "Input text (leave empty to exit): ";
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("{prompt}");
        io::stderr().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        let query = line.trim();
        if query.is_empty() || query == "exit" {
            return Ok(());
        }
        controller.search(query, max_words)?;
        prompt = "Input text: ";
    }
}

fn print_result(text: &str) {
    println!("RESULT: {text}");
}

fn print_status(status: &StatusEvent) {
    eprintln!("STATUS UPDATE: {status}");
}
