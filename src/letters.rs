use std::ops::RangeInclusive;

// Character-set constants
pub(crate) const ALPHABET_SIZE: usize = 26;
pub(crate) const LOWERCASE_ALPHABET: RangeInclusive<char> = 'a'..='z';

/// Characters, besides ASCII letters, that a dictionary line may contain.
pub(crate) const ENTRY_PUNCTUATION: &str = " '-";

// 'a' -> 0, 'b' -> 1, ..., 'z' -> 25 (case-insensitive)
// Anything that isn't a plain ASCII letter maps to `None`, accented letters included.
pub(crate) fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_lowercase() as usize) - ('a' as usize))
    } else {
        None
    }
}

// Inverse of `letter_index` for lowercase output.
pub(crate) fn index_letter(idx: usize) -> Option<char> {
    LOWERCASE_ALPHABET.clone().nth(idx)
}
