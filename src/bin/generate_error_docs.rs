//! Generate error code documentation from the source of truth (the error enum).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from `AnagramError` via its `code()`, `description()`, `details()`,
//! and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;
use std::io;

use abanagram::errors::AnagramError;

/// One of each `AnagramError` variant, in code order.
fn all_error_variants() -> Vec<AnagramError> {
    vec![
        AnagramError::DictionarySourceUnreadable {
            source_name: "data/words.txt".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        },
        AnagramError::InvalidMaxWords { max_words: 0 },
        AnagramError::SearchAborted {
            query: "a very long phrase".to_string(),
            reason: "memory allocation failed".to_string(),
        },
        AnagramError::WorkerUnavailable,
        AnagramError::WorkerSpawn(io::Error::new(io::ErrorKind::WouldBlock, "Resource temporarily unavailable")),
        AnagramError::WorkerPanicked,
    ]
}

fn render_error(out: &mut String, error: &AnagramError) -> std::fmt::Result {
    writeln!(out, "### {}: {}\n", error.code(), error.description())?;
    writeln!(out, "**Details:** {}\n", error.details())?;

    if let Some(help_text) = error.help() {
        writeln!(out, "**How to fix:**")?;
        writeln!(out, "```\n{help_text}\n```\n")?;
    }

    writeln!(out, "**Example error message:**")?;
    writeln!(out, "```\n{error}\n```\n")?;

    writeln!(out, "**Detailed format:**")?;
    writeln!(out, "```\n{}\n```\n", error.display_detailed())?;

    writeln!(out, "---\n")
}

fn render_docs() -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# Error Code Reference\n")?;
    writeln!(out, "**This document is auto-generated from the source code. Do not edit manually.**\n")?;

    writeln!(out, "## Errors\n")?;
    writeln!(out, "Errors reported while loading word lists, validating commands, and running the search worker.\n")?;
    for error in all_error_variants() {
        render_error(&mut out, &error)?;
    }

    writeln!(out, "## How to Use Error Codes\n")?;
    writeln!(out, "When you see an error like:\n")?;
    writeln!(out, "```\n{}\n```\n", AnagramError::InvalidMaxWords { max_words: 0 }.display_detailed())?;
    writeln!(out, "1. Note the error code (e.g., `A002`)")?;
    writeln!(out, "2. Look it up in this document for a detailed explanation")?;
    writeln!(out, "3. Follow the suggested resolution steps")?;
    Ok(out)
}

fn main() -> Result<(), std::fmt::Error> {
    print!("{}", render_docs()?);
    Ok(())
}
