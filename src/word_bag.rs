//! `word_bag` — the letter multiset behind every anagram test.
//!
//! A [`WordBag`] remembers the (trimmed) text it was built from and how many times each
//! letter `a`–`z` occurs in it. Case is folded and everything that is not a plain ASCII
//! letter is dropped, so `"Rock 'n' Roll"` and `"rocknroll"` have equal bags.
//!
//! Bags are values: `contains`, `subtract` and friends never modify `self`. The search keeps
//! one long-lived bag per dictionary entry and builds short-lived "remaining query" bags
//! with [`WordBag::subtract`] as it descends.

use crate::letters::{index_letter, letter_index, ALPHABET_SIZE};
use std::fmt;
use std::ops::Sub;

#[derive(Debug, Clone, Default, Eq)]
pub struct WordBag {
    text: String,
    counts: [u32; ALPHABET_SIZE],
    total: usize,
}

impl WordBag {
    /// Build a bag from arbitrary text. Never fails: text without letters gives an empty bag.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut counts = [0u32; ALPHABET_SIZE];
        let mut total = 0;
        for idx in text.chars().filter_map(letter_index) {
            counts[idx] += 1;
            total += 1;
        }

        WordBag { text: text.trim().to_string(), counts, total }
    }

    /// The trimmed source text. Empty for bags produced by [`WordBag::subtract`].
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of occurrences of `letter` (case-insensitive; 0 for non-letters).
    #[must_use]
    pub fn count(&self, letter: char) -> u32 {
        letter_index(letter).map_or(0, |idx| self.counts[idx])
    }

    /// Sum of all letter counts.
    #[must_use]
    pub fn total_letters(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// True iff every letter of `other` can be carved out of `self`.
    #[must_use]
    pub fn contains(&self, other: &WordBag) -> bool {
        other.total <= self.total
            && self.counts.iter().zip(other.counts.iter()).all(|(mine, theirs)| mine >= theirs)
    }

    /// Letter-for-letter, count-for-count equality. Source text is ignored.
    #[must_use]
    pub fn equals(&self, other: &WordBag) -> bool {
        self.total == other.total && self.counts == other.counts
    }

    /// Per-letter difference, clamped at zero. The result carries no source text.
    #[must_use]
    pub fn subtract(&self, other: &WordBag) -> WordBag {
        let mut counts = [0u32; ALPHABET_SIZE];
        for (slot, (mine, theirs)) in counts.iter_mut().zip(self.counts.iter().zip(other.counts.iter())) {
            *slot = mine.saturating_sub(*theirs);
        }
        let total = counts.iter().map(|&c| c as usize).sum();

        WordBag { text: String::new(), counts, total }
    }

    /// Letters in alphabetical order, e.g. `"listen"` -> `"eilnst"`.
    #[must_use]
    pub fn alphagram(&self) -> String {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(idx, &n)| index_letter(idx).map(|c| c.to_string().repeat(n as usize)))
            .collect()
    }
}

impl PartialEq for WordBag {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Sub for &WordBag {
    type Output = WordBag;

    fn sub(self, rhs: &WordBag) -> WordBag {
        self.subtract(rhs)
    }
}

impl fmt::Display for WordBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "[{}]", self.alphagram())
        } else {
            f.write_str(&self.text)
        }
    }
}
