//! Small pure text helpers.
//!
//! Offsets throughout readmore count Unicode scalar values (`char`s), never
//! bytes. These helpers translate between the two so a cut can never land
//! inside a UTF-8 sequence.

/// Number of `char`s in `s`.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the `char_offset`-th char, or `s.len()` past the end.
#[must_use]
pub fn byte_index(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map_or(s.len(), |(idx, _)| idx)
}

/// The first `count` chars of `s`. Saturates at the whole string.
#[must_use]
pub fn char_prefix(s: &str, count: usize) -> &str {
    &s[..byte_index(s, count)]
}

/// Chars in `start..end` of `s`, both clamped to the string.
#[must_use]
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_index(s, start);
    let end_byte = byte_index(s, end.max(start));
    &s[start_byte..end_byte]
}
