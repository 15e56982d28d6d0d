//! The multi-word anagram search.
//!
//! Given a query phrase, a bound on the number of words, and a [`Dictionary`], the search
//! enumerates every set of dictionary entries whose letters together are exactly the letters
//! of the query.
//!
//! The search is a depth-first enumeration with pruning:
//!
//! 1. At every level, only entries whose letters fit inside the *remaining* query are kept.
//!    That filtered list becomes the universe for the next level down, so the candidate set
//!    shrinks monotonically along a branch.
//! 2. An entry that uses up all remaining letters completes a result on the spot.
//! 3. When only one more word is allowed, only entries whose letters *equal* the remaining
//!    query are considered.
//!
//! Results are sets: the same entries reached in a different order are reported once, with
//! the words in the order of their first discovery. Results are handed to a callback as
//! soon as they are found rather than at the end.
//!
//! The depth-first walk is driven by an explicit stack of [`Frame`]s instead of native
//! recursion, so large word-count bounds cannot exhaust the thread's stack. Every entry
//! consumes at least one letter, so the stack never grows deeper than
//! `min(max_words, letters in the query)`.
//!
//! # Examples
//!
//! ```
//! use abanagram::dictionary::Dictionary;
//! use abanagram::search::find_anagrams;
//!
//! let dictionary = Dictionary::from_lines("demo", ["dirty", "room", "dormitory", "xyz"]);
//! let summary = find_anagrams(&dictionary, "Dormitory", 2, |result| {
//!     println!("found: {}", result.text());
//! })?;
//!
//! let texts: Vec<String> = summary.results.iter().map(|r| r.text()).collect();
//! assert_eq!(texts, vec!["dirty room", "dormitory"]);
//! # Ok::<(), abanagram::errors::AnagramError>(())
//! ```

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::errors::AnagramError;
use crate::word_bag::WordBag;
use instant::Instant;
use log::debug;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// One combination of dictionary entries whose letters exactly equal the query's.
#[derive(Debug, Clone)]
pub struct SearchResult<'d> {
    /// Entries in the order they were chosen on the successful branch.
    entries: Vec<&'d DictionaryEntry>,
    /// Sorted dictionary positions; identifies the result as a set.
    key: Vec<usize>,
}

impl<'d> SearchResult<'d> {
    #[must_use]
    pub fn entries(&self) -> &[&'d DictionaryEntry] {
        &self.entries
    }

    /// Trimmed entry texts, in discovery order.
    #[must_use]
    pub fn words(&self) -> Vec<&'d str> {
        self.entries.iter().map(|&e| e.display_text()).collect()
    }

    /// The words joined by single spaces, in discovery order (not sorted).
    #[must_use]
    pub fn text(&self) -> String {
        self.words().join(" ")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Set equality: the order in which entries were chosen does not matter.
impl PartialEq for SearchResult<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SearchResult<'_> {}

impl fmt::Display for SearchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// What a finished search produced.
#[derive(Debug, Clone)]
pub struct SearchSummary<'d> {
    /// Distinct results in the order they were reported.
    pub results: Vec<SearchResult<'d>>,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
    /// Number of levels opened (a rough measure of work done).
    pub levels_opened: usize,
}

impl SearchSummary<'_> {
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.results.iter().map(SearchResult::text).collect()
    }
}

/// Check a word-count bound before any work is queued or started.
///
/// # Errors
///
/// Returns [`AnagramError::InvalidMaxWords`] if `max_words` is 0.
pub fn validate_max_words(max_words: usize) -> Result<(), AnagramError> {
    if max_words == 0 {
        return Err(AnagramError::InvalidMaxWords { max_words });
    }
    Ok(())
}

/// Find every combination of up to `max_words` dictionary entries that is an anagram of
/// `query`, calling `on_result` for each one as it is discovered.
///
/// # Errors
///
/// Returns [`AnagramError::InvalidMaxWords`] if `max_words` is 0.
pub fn find_anagrams<'d, F>(
    dictionary: &'d Dictionary,
    query: &str,
    max_words: usize,
    on_result: F,
) -> Result<SearchSummary<'d>, AnagramError>
where
    F: FnMut(&SearchResult<'d>),
{
    validate_max_words(max_words)?;

    let t_search = Instant::now();
    let query_bag = WordBag::from_text(query);
    let mut search = Search {
        entries: dictionary.entries(),
        max_words,
        chosen: Vec::with_capacity(max_words.min(query_bag.total_letters())),
        seen: HashSet::new(),
        results: Vec::new(),
        levels_opened: 0,
        on_result,
    };
    search.run(query_bag);

    let summary = SearchSummary {
        results: search.results,
        elapsed: t_search.elapsed(),
        levels_opened: search.levels_opened,
    };
    debug!(
        "search {query:?} (max {max_words} words): {} results, {} levels opened in {:.3}s",
        summary.results.len(),
        summary.levels_opened,
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}

/// Convenience wrapper returning just the result texts.
///
/// # Errors
///
/// Returns [`AnagramError::InvalidMaxWords`] if `max_words` is 0.
pub fn anagram_texts(dictionary: &Dictionary, query: &str, max_words: usize) -> Result<Vec<String>, AnagramError> {
    Ok(find_anagrams(dictionary, query, max_words, |_| {})?.texts())
}

/// One level of the depth-first walk.
struct Frame {
    /// Dictionary positions whose letters fit inside `remaining`.
    candidates: Vec<usize>,
    /// Next position in `candidates` to try.
    cursor: usize,
    /// Letters still to be matched at this level.
    remaining: WordBag,
}

/// State shared by the whole walk.
struct Search<'d, F> {
    entries: &'d [DictionaryEntry],
    max_words: usize,
    /// Entries picked on the current branch; always one shorter than the frame stack.
    chosen: Vec<usize>,
    seen: HashSet<Vec<usize>>,
    results: Vec<SearchResult<'d>>,
    levels_opened: usize,
    on_result: F,
}

impl<'d, F> Search<'d, F>
where
    F: FnMut(&SearchResult<'d>),
{
    fn run(&mut self, query: WordBag) {
        let universe: Vec<usize> = (0..self.entries.len()).collect();
        let mut stack: Vec<Frame> = Vec::with_capacity(self.max_words.min(query.total_letters()) + 1);
        stack.extend(self.open_level(&universe, query));

        while let Some(frame) = stack.last_mut() {
            let Some(&idx) = frame.candidates.get(frame.cursor) else {
                stack.pop();
                self.chosen.pop();
                continue;
            };
            frame.cursor += 1;

            // an entry is used at most once per result
            if self.chosen.contains(&idx) {
                continue;
            }

            let bag = self.entries[idx].bag();
            // `bag` fits inside `remaining`, so equal totals mean equal letters
            if bag.total_letters() == frame.remaining.total_letters() {
                self.record(idx);
                continue;
            }

            let remaining = frame.remaining.subtract(bag);
            self.chosen.push(idx);
            match self.open_level(&frame.candidates, remaining) {
                Some(child) => stack.push(child),
                None => {
                    self.chosen.pop();
                }
            }
        }

        debug_assert!(self.chosen.is_empty(), "branch state must unwind completely");
    }

    /// Start a new level below the current `chosen` prefix.
    ///
    /// If only one more word fits, every entry of `universe` equal to `remaining` is recorded
    /// immediately and no frame is returned. Otherwise the returned frame holds the entries of
    /// `universe` that fit inside `remaining`.
    fn open_level(&mut self, universe: &[usize], remaining: WordBag) -> Option<Frame> {
        self.levels_opened += 1;

        if self.chosen.len() + 1 >= self.max_words {
            for &idx in universe {
                if self.entries[idx].bag().equals(&remaining) {
                    self.record(idx);
                }
            }
            return None;
        }

        let candidates: Vec<usize> = universe
            .iter()
            .copied()
            .filter(|&idx| remaining.contains(self.entries[idx].bag()))
            .collect();
        Some(Frame { candidates, cursor: 0, remaining })
    }

    /// Record `chosen + [last]` unless the same set was already reported.
    fn record(&mut self, last: usize) {
        if self.chosen.contains(&last) {
            return;
        }

        let mut picked = Vec::with_capacity(self.chosen.len() + 1);
        picked.extend_from_slice(&self.chosen);
        picked.push(last);

        let mut key = picked.clone();
        key.sort_unstable();
        if !self.seen.insert(key.clone()) {
            return;
        }

        let entries = self.entries;
        let result = SearchResult {
            entries: picked.iter().map(|&idx| &entries[idx]).collect(),
            key,
        };
        (self.on_result)(&result);
        self.results.push(result);
    }
}
