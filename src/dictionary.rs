//! `dictionary` — load word lists into the universe of candidate words for a search.
//!
//! A word list is plain text with one candidate per line. Lines may come from a file on disk
//! or from an in-memory string (handy for tests and for embedders that fetch their lists
//! elsewhere); both are described by [`WordSource`].
//!
//! The parsing logic:
//! - Each line is trimmed before it is judged, but the entry keeps the line as read.
//! - A line is kept only if it consists of ASCII letters, spaces, apostrophes and hyphens,
//!   **and** contains a run of at least two consecutive letters or spaces. This throws out
//!   single-letter artefacts, pure punctuation, and anything with digits.
//! - Lines that pass but hold no letters at all (e.g. `"-  -"`) are also skipped; they could
//!   never contribute to an anagram.
//! - Nothing is deduplicated or sorted. Entries keep the order in which they were read and
//!   multiple sources are simply concatenated, because the search reports results in
//!   dictionary order.

use crate::errors::AnagramError;
use crate::letters::ENTRY_PUNCTUATION;
use crate::word_bag::WordBag;
use fancy_regex::{escape, Regex};
use instant::Instant;
use log::{debug, info};
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Whole-line shape of an acceptable entry.
static ENTRY_PATTERN: LazyLock<String> = LazyLock::new(|| {
    let punct = escape(ENTRY_PUNCTUATION);
    format!(r"^[a-zA-Z{punct}]*[a-zA-Z ]{{2,}}[a-zA-Z{punct}]*$")
});

pub(crate) static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&ENTRY_PATTERN)
        .unwrap_or_else(|e| panic!(
            "BUG: Failed to compile ENTRY_RE regex pattern '{}': {e}.", *ENTRY_PATTERN
        )));

/// The inclusion rule for dictionary lines (see the module docs).
#[must_use]
pub fn is_acceptable_line(line: &str) -> bool {
    ENTRY_RE.is_match(line.trim()).unwrap_or(false)
}

/// Turn one raw line (terminator included or not) into text.
///
/// No encoding is negotiated. Invalid UTF-8 sequences become U+FFFD, so a Latin-1 `café`
/// decodes to a line that the inclusion rule then throws out like any other accented word.
pub(crate) fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Where a word list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// A text file, read as UTF-8 with invalid bytes replaced.
    File(PathBuf),
    /// A word list that is already in memory. `name` is only used in messages.
    Inline { name: String, contents: String },
}

impl WordSource {
    pub fn inline(name: impl Into<String>, contents: impl Into<String>) -> Self {
        WordSource::Inline { name: name.into(), contents: contents.into() }
    }

    /// Human-readable name for status messages and errors.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            WordSource::File(path) => path.display().to_string(),
            WordSource::Inline { name, .. } => name.clone(),
        }
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>, AnagramError> {
        match self {
            WordSource::File(path) => {
                let file = File::open(path).map_err(|source| self.unreadable(source))?;
                Ok(Box::new(BufReader::new(file)))
            }
            WordSource::Inline { contents, .. } => Ok(Box::new(Cursor::new(contents.as_bytes()))),
        }
    }

    fn unreadable(&self, source: std::io::Error) -> AnagramError {
        AnagramError::DictionarySourceUnreadable { source_name: self.name(), source }
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<PathBuf> for WordSource {
    fn from(path: PathBuf) -> Self {
        WordSource::File(path)
    }
}

/// One accepted line of a word list together with its letters.
#[derive(Debug, Clone)]
pub struct DictionaryEntry {
    text: String,
    bag: WordBag,
}

impl DictionaryEntry {
    /// Returns `None` if `line` fails the inclusion rule or holds no letters.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        if !is_acceptable_line(line) {
            return None;
        }
        let bag = WordBag::from_text(line);
        if bag.is_empty() {
            return None;
        }
        Some(DictionaryEntry { text: line.to_string(), bag })
    }

    /// The line exactly as it was read (line terminator excluded).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line without surrounding whitespace; this is what results display.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.bag.text()
    }

    #[must_use]
    pub fn bag(&self) -> &WordBag {
        &self.bag
    }
}

impl fmt::Display for DictionaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// The ordered, read-only universe of candidate words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from lines that are already in memory. Infallible.
    pub fn from_lines<I, S>(source_name: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::new();
        let accepted = dictionary.extend_from_lines(lines);
        debug!("{source_name}: accepted {accepted} entries");
        dictionary
    }

    /// Load every source in order, failing on the first unreadable one.
    ///
    /// # Errors
    ///
    /// Returns [`AnagramError::DictionarySourceUnreadable`] naming the first source that could
    /// not be read.
    pub fn load(sources: &[WordSource]) -> Result<Self, AnagramError> {
        let mut dictionary = Self::new();
        for source in sources {
            dictionary.load_source(source)?;
        }
        Ok(dictionary)
    }

    /// Append the acceptable lines of one source and return how many were added.
    ///
    /// A source is indexed all-or-nothing: if reading fails halfway, none of its lines are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`AnagramError::DictionarySourceUnreadable`] if the source cannot be opened or
    /// reading it fails. Bytes that are not valid UTF-8 are not an error: they decode to
    /// U+FFFD and the line is filtered out.
    pub fn load_source(&mut self, source: &WordSource) -> Result<usize, AnagramError> {
        let t_load = Instant::now();
        let mut reader = source.open()?;

        let mut staged = Vec::new();
        let mut rejected = 0usize;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).map_err(|e| source.unreadable(e))?;
            if n == 0 {
                break;
            }
            let line = decode_line(&buf);
            match DictionaryEntry::parse(&line) {
                Some(entry) => staged.push(entry),
                None => {
                    rejected += 1;
                    debug!("{source}: skipping line {line:?}");
                }
            }
        }

        let accepted = staged.len();
        self.entries.extend(staged);
        info!(
            "{source}: {accepted} entries accepted, {rejected} rejected ({:.3}s)",
            t_load.elapsed().as_secs_f64()
        );
        Ok(accepted)
    }

    /// Append the acceptable lines from `lines`, returning how many were added.
    pub fn extend_from_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.entries.len();
        self.entries.extend(lines.into_iter().filter_map(|line| DictionaryEntry::parse(line.as_ref())));
        self.entries.len() - before
    }

    #[must_use]
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
