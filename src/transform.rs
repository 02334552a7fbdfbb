//! Codepoint-level text transforms.

use crate::tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseDirection {
    Upper,
    Lower,
}

/// Context-free full case mapping. Output may be longer than the input.
pub fn case_map(codepoints: &[char], direction: CaseDirection) -> Vec<char> {
    let mut mapped = Vec::with_capacity(codepoints.len());
    for ch in codepoints {
        match direction {
            CaseDirection::Upper => mapped.extend(tables::to_upper(*ch)),
            CaseDirection::Lower => mapped.extend(tables::to_lower(*ch)),
        }
    }
    mapped
}

/// Reverses codepoint order.
///
/// Works on codepoints, not grapheme clusters: combining marks end up in
/// front of the base character they followed.
pub fn reverse(codepoints: &[char]) -> Vec<char> {
    codepoints.iter().rev().copied().collect()
}

/// Title-cases the first letter of every word.
///
/// A word starts at the beginning of the text and after any whitespace or
/// punctuation. Characters that are neither letters nor separators (digits,
/// symbols, marks) pass through and leave the word state as it was, so
/// `item2nd` becomes `Item2nd`.
pub fn titleize(codepoints: &[char]) -> Vec<char> {
    let mut titled = Vec::with_capacity(codepoints.len());
    let mut at_word_start = true;
    for ch in codepoints.iter().copied() {
        if tables::is_alphabetic(ch) {
            if at_word_start {
                titled.push(tables::to_title(ch));
                at_word_start = false;
            } else {
                titled.push(ch);
            }
        } else {
            titled.push(ch);
        }
        if tables::is_whitespace(ch) || tables::is_punctuation(ch) {
            at_word_start = true;
        }
    }
    titled
}
