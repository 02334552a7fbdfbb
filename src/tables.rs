//! Read-only Unicode property lookups.
//!
//! Classification and case data come from the standard library and
//! `icu_properties`, decomposition data from `unicode-normalization`. The
//! only table built here is the titlecase exception map, constructed once on
//! first use and shared by every caller.

use std::collections::HashMap;

use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};
use icu_properties::CodePointMapData;
use once_cell::sync::Lazy;

/// Characters whose simple titlecase mapping is not their simple uppercase
/// mapping (the UnicodeData titlecase field).
static TITLECASE_EXCEPTIONS: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut table = HashMap::new();

    // Latin digraphs: all three case forms titlecase to the middle one.
    for first in ['\u{01C4}', '\u{01C7}', '\u{01CA}', '\u{01F1}'] {
        let members: Vec<char> = (first..).take(3).collect();
        for member in &members {
            table.insert(*member, members[1]);
        }
    }

    // Greek with ypogegrammeni titlecases to prosgegrammeni.
    for (lower, title) in [
        ('\u{1FB3}', '\u{1FBC}'),
        ('\u{1FC3}', '\u{1FCC}'),
        ('\u{1FF3}', '\u{1FFC}'),
    ] {
        table.insert(lower, title);
        table.insert(title, title);
    }

    // U+1F80..U+1FAF: blocks of 8 lowercase followed by their 8 titlecase forms.
    for base in [0x1F80u32, 0x1F90, 0x1FA0] {
        for offset in 0..8 {
            if let (Some(lower), Some(title)) = (
                char::from_u32(base + offset),
                char::from_u32(base + 8 + offset),
            ) {
                table.insert(lower, title);
                table.insert(title, title);
            }
        }
    }

    // Georgian Mkhedruli has an uppercase (Mtavruli) but titlecases to itself.
    for georgian in ('\u{10D0}'..='\u{10FA}').chain('\u{10FD}'..='\u{10FF}') {
        table.insert(georgian, georgian);
    }

    log::trace!("built titlecase exception table with {} entries", table.len());
    table
});

pub fn is_alphabetic(ch: char) -> bool {
    GeneralCategoryGroup::Letter.contains(general_category(ch))
}

pub fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

pub fn is_punctuation(ch: char) -> bool {
    GeneralCategoryGroup::Punctuation.contains(general_category(ch))
}

fn general_category(ch: char) -> GeneralCategory {
    CodePointMapData::<GeneralCategory>::new().get(ch)
}

/// Full uppercase mapping; may expand (`ß` → `SS`).
pub fn to_upper(ch: char) -> impl Iterator<Item = char> {
    ch.to_uppercase()
}

/// Full lowercase mapping, without context-dependent rules.
pub fn to_lower(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase()
}

/// Simple (1:1) titlecase mapping. Characters whose only uppercase form
/// expands, such as `ß` or `ﬁ`, map to themselves.
pub fn to_title(ch: char) -> char {
    if let Some(title) = TITLECASE_EXCEPTIONS.get(&ch) {
        return *title;
    }
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

pub fn combining_class(ch: char) -> u8 {
    unicode_normalization::char::canonical_combining_class(ch)
}

/// Full (recursive) decomposition of `ch`, canonical or compatibility.
pub fn decompose(ch: char, compatibility: bool, out: &mut Vec<char>) {
    if compatibility {
        unicode_normalization::char::decompose_compatible(ch, |part| out.push(part));
    } else {
        unicode_normalization::char::decompose_canonical(ch, |part| out.push(part));
    }
}

/// Primary composite of `starter` followed by `mark`, if one exists.
pub fn compose(starter: char, mark: char) -> Option<char> {
    unicode_normalization::char::compose(starter, mark)
}
