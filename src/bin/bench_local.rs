//! `bench_local.rs` — quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of anagram queries on *your* machine.
//! - Loads the word lists once, then runs each query several times and reports the median.
//! - Runs the engine directly, without the background worker, so only search time is measured.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print a few results:            `cargo run --bin bench_local --release -- -p 5`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - Not statistically rigorous; use the same machine and `--release` for comparable numbers.
//! - Queries live in `get_cases()` below.
//! - One warm-up run per query is done (not included in timing).

use abanagram::dictionary::{Dictionary, WordSource};
use abanagram::search::{self, SearchSummary};
use clap::Parser;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Instant;

/// Simple local benchmark runner: load word lists once, time several queries.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list file, one candidate per line (repeat for several lists)
    #[arg(
        short,
        long = "words",
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/words.txt")
    )]
    words: Vec<PathBuf>,

    /// Override the per-case maximum number of words
    #[arg(short = 'n', long)]
    max_words: Option<usize>,

    /// Number of repeats per query (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print up to this many results per query (0 = print none)
    #[arg(short = 'p', long = "print", default_value_t = 0)]
    print_limit: usize,
}

#[derive(Clone)]
struct Case {
    query: &'static str,
    max_words: usize,
}

/// Edit/add new queries here.
fn get_cases() -> Vec<Case> {
    vec![
        Case { query: "listen", max_words: 1 },
        Case { query: "dormitory", max_words: 2 },
        Case { query: "astronomer", max_words: 2 },
        Case { query: "the eyes", max_words: 2 },
        Case { query: "conversation", max_words: 3 },
        Case { query: "a gentleman", max_words: 3 },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_QUERY_LEN: usize = 24;

fn main() -> std::io::Result<()> {
    /// One row in the summary: (query, max words, median seconds, number of results).
    type SummaryRow = (String, usize, f64, usize);

    let cli = Cli::parse();
    abanagram::log::init_logger(false);

    eprintln!("abanagram {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH_FULL"));

    // Load the word lists once. This I/O is *not* included in per-query timing.
    let sources: Vec<WordSource> = cli.words.iter().cloned().map(WordSource::File).collect();
    let t_load = Instant::now();
    let dictionary = Dictionary::load(&sources)?;
    eprintln!("Loaded {} words in {:.3}s", dictionary.len(), t_load.elapsed().as_secs_f64());

    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let max_words = cli.max_words.unwrap_or(case.max_words);
        eprintln!("\n[{:02}] {} (max {} words)", idx + 1, case.query, max_words);

        // One warm-up execution per query; its timing is ignored.
        if let Err(e) = search::find_anagrams(&dictionary, case.query, max_words, |_| {}) {
            eprintln!("  ✗ Warm-up failed: {}", e.display_detailed());
            continue;
        }

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last_run: Option<SearchSummary<'_>> = None;

        for rep in 0..cli.num_repeats {
            let t_search = Instant::now();
            let run = match search::find_anagrams(&dictionary, black_box(case.query), max_words, |_| {}) {
                Ok(run) => run,
                Err(e) => {
                    eprintln!("  ✗ Run {}/{} failed: {}", rep + 1, cli.num_repeats, e);
                    continue;
                }
            };
            let search_secs = t_search.elapsed().as_secs_f64();
            let _keep = black_box(run.results.len());

            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({} {}, {} levels)",
                rep + 1,
                cli.num_repeats,
                search_secs,
                run.results.len(),
                pluralizer(run.results.len(), "result".into(), None),
                run.levels_opened
            );
            times.push(search_secs);
            last_run = Some(run);
        }

        let med = median(times);
        let num_results = last_run.as_ref().map_or(0, |run| run.results.len());

        if cli.print_limit > 0 {
            if let Some(run) = &last_run {
                for result in run.results.iter().take(cli.print_limit) {
                    println!("{result}");
                }
            }
        }

        eprintln!("  → median {med:.3}s over {} run(s)", cli.num_repeats);
        summary.push((case.query.to_string(), max_words, med, num_results));
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<MAX_QUERY_LEN$} | {:>5} | {:>10} | {:>9}", "query", "max", "median (s)", "# results");
    eprintln!("{:-<MAX_QUERY_LEN$}-+-{:-<5}-+-{:-<10}-+-{:-<9}", "", "", "", "");
    for (query, max_words, med, num_results) in &summary {
        let display = if query.len() > MAX_QUERY_LEN {
            format!("{}…", query.chars().take(MAX_QUERY_LEN - 1).collect::<String>())
        } else {
            query.clone()
        };
        eprintln!("{display:<MAX_QUERY_LEN$} | {max_words:>5} | {med:>10.3} | {num_results:>9}");
    }

    Ok(())
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}
