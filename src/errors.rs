//! Error types for dictionary loading, searching and the search worker.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (A001-A006) for documentation lookup:
//!
//! - A001: `DictionarySourceUnreadable` (A word list could not be opened or read)
//! - A002: `InvalidMaxWords` (Word-count bound below 1)
//! - A003: `SearchAborted` (A search hit an internal fault and was abandoned)
//! - A004: `WorkerUnavailable` (The search worker is no longer accepting commands)
//! - A005: `WorkerSpawn` (The search worker thread could not be started)
//! - A006: `WorkerPanicked` (The search worker thread terminated abnormally)
//!
//! # Examples
//!
//! ```
//! use abanagram::errors::AnagramError;
//! use abanagram::search::find_anagrams;
//! use abanagram::dictionary::Dictionary;
//!
//! let dictionary = Dictionary::from_lines("demo", ["eat", "tea"]);
//! match find_anagrams(&dictionary, "ate", 0, |_| {}) {
//!     Err(e) => {
//!         assert_eq!(e.code(), "A002");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

use std::io;

/// Unified error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum AnagramError {
    #[error("cannot read word list '{source_name}': {source}")]
    DictionarySourceUnreadable {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid maximum number of words: {max_words} (must be at least 1)")]
    InvalidMaxWords { max_words: usize },

    #[error("search for \"{query}\" aborted: {reason}")]
    SearchAborted { query: String, reason: String },

    #[error("search worker is not accepting commands")]
    WorkerUnavailable,

    #[error("failed to start search worker: {0}")]
    WorkerSpawn(#[source] io::Error),

    #[error("search worker terminated abnormally")]
    WorkerPanicked,
}

impl From<AnagramError> for io::Error {
    fn from(e: AnagramError) -> Self {
        match e {
            AnagramError::DictionarySourceUnreadable { source, .. } => source,
            AnagramError::WorkerSpawn(source) => source,
            AnagramError::InvalidMaxWords { .. } => io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
            other => io::Error::other(other.to_string()),
        }
    }
}

impl AnagramError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AnagramError::DictionarySourceUnreadable { .. } => "A001",
            AnagramError::InvalidMaxWords { .. } => "A002",
            AnagramError::SearchAborted { .. } => "A003",
            AnagramError::WorkerUnavailable => "A004",
            AnagramError::WorkerSpawn(_) => "A005",
            AnagramError::WorkerPanicked => "A006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            AnagramError::DictionarySourceUnreadable { .. } => "A word list could not be opened or read",
            AnagramError::InvalidMaxWords { .. } => "Word-count bound below 1",
            AnagramError::SearchAborted { .. } => "A search hit an internal fault and was abandoned",
            AnagramError::WorkerUnavailable => "The search worker is no longer accepting commands",
            AnagramError::WorkerSpawn(_) => "The search worker thread could not be started",
            AnagramError::WorkerPanicked => "The search worker thread terminated abnormally",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            AnagramError::DictionarySourceUnreadable { .. } => "One of the configured word lists is missing or could not be read from disk. Lines that are not valid UTF-8 do not trigger this error; they are decoded lossily and filtered out like any other unacceptable line. With the default policy the whole load is abandoned; with the skip policy the source is ignored and loading continues.",
            AnagramError::InvalidMaxWords { .. } => "Every search needs room for at least one word. The bound is checked when the command is submitted, before anything is queued.",
            AnagramError::SearchAborted { .. } => "The search panicked (for example, it ran out of memory on a pathological query). The worker stays alive and continues with the next queued command.",
            AnagramError::WorkerUnavailable => "A command was submitted after the worker exited, either because it was stopped or because the dictionary failed to load.",
            AnagramError::WorkerSpawn(_) => "The operating system refused to create the background thread that owns the dictionary.",
            AnagramError::WorkerPanicked => "The background thread ended with a panic outside of a search. Results delivered before the failure remain valid.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            AnagramError::DictionarySourceUnreadable { .. } => Some("Check the path, or pass --skip-unreadable to continue without this word list"),
            AnagramError::InvalidMaxWords { .. } => Some("Use a maximum of 1 or more words (e.g., '-n 2')"),
            AnagramError::WorkerUnavailable => Some("Check earlier status messages for a dictionary load failure, then start a new controller"),
            AnagramError::SearchAborted { .. } => Some("Try a shorter query or a lower maximum number of words"),
            AnagramError::WorkerSpawn(_) | AnagramError::WorkerPanicked => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_of_each() -> Vec<AnagramError> {
        vec![
            AnagramError::DictionarySourceUnreadable {
                source_name: "words.txt".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            },
            AnagramError::InvalidMaxWords { max_words: 0 },
            AnagramError::SearchAborted { query: "abc".to_string(), reason: "boom".to_string() },
            AnagramError::WorkerUnavailable,
            AnagramError::WorkerSpawn(io::Error::other("no threads")),
            AnagramError::WorkerPanicked,
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = AnagramError::InvalidMaxWords { max_words: 0 };
        assert_eq!(err.code(), "A002");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("A002"));
        assert!(detailed.contains("at least 1"));
        assert!(detailed.contains("-n 2"));
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in one_of_each() {
            let code = err.code();
            assert!(codes.insert(code), "Duplicate error code found: {code}");
        }
        assert_eq!(codes.len(), 6);
    }

    #[test]
    fn test_error_code_format() {
        for err in one_of_each() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{code}' should be 4 characters (A0XX)");
            assert!(code.starts_with("A0"), "Error code '{code}' should start with 'A0'");
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{code}' should end with a number");
        }
    }

    #[test]
    fn test_display_detailed_without_help() {
        let err = AnagramError::WorkerPanicked;
        assert_eq!(err.display_detailed(), "search worker terminated abnormally (A006)");
    }

    #[test]
    fn test_unreadable_source_keeps_cause() {
        use std::error::Error;
        let err = &one_of_each()[0];
        assert!(err.to_string().contains("words.txt"));
        assert!(err.source().is_some());
        let io_err: io::Error = one_of_each().remove(0).into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_descriptions_and_details_are_substantial() {
        for err in one_of_each() {
            assert!(!err.description().is_empty());
            assert!(err.details().len() > err.description().len(), "{:?}", err);
        }
    }
}
