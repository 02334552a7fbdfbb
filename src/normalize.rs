//! Unicode normalization (UAX #15) over codepoint sequences.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::{tables, Error};

/// The four standard normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl NormalizationForm {
    pub const ALL: [NormalizationForm; 4] = [Self::Nfc, Self::Nfd, Self::Nfkc, Self::Nfkd];

    /// Whether decomposition uses compatibility mappings.
    pub const fn is_compatibility(self) -> bool {
        matches!(self, Self::Nfkc | Self::Nfkd)
    }

    /// Whether canonical composition runs after reordering.
    pub const fn composes(self) -> bool {
        matches!(self, Self::Nfc | Self::Nfkc)
    }

    /// Short tag: `c`, `d`, `kc` or `kd`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Nfc => "c",
            Self::Nfd => "d",
            Self::Nfkc => "kc",
            Self::Nfkd => "kd",
        }
    }
}

impl FromStr for NormalizationForm {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let lowered = tag.to_ascii_lowercase();
        let short = lowered.strip_prefix("nf").unwrap_or(&lowered);
        match short {
            "c" => Ok(Self::Nfc),
            "d" => Ok(Self::Nfd),
            "kc" => Ok(Self::Nfkc),
            "kd" => Ok(Self::Nfkd),
            _ => Err(Error::InvalidForm(tag.to_owned())),
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nfc => write!(f, "NFC"),
            Self::Nfd => write!(f, "NFD"),
            Self::Nfkc => write!(f, "NFKC"),
            Self::Nfkd => write!(f, "NFKD"),
        }
    }
}

/// Normalizes `codepoints` into `form`.
pub fn normalize(codepoints: &[char], form: NormalizationForm) -> Vec<char> {
    let mut buffer = decompose(codepoints, form.is_compatibility());
    reorder(&mut buffer);
    debug_assert!(is_canonically_ordered(&buffer));
    if form.composes() {
        compose(&mut buffer);
    }
    log::trace!(
        "{form}: {} codepoints in, {} out",
        codepoints.len(),
        buffer.len()
    );
    buffer
}

/// Whether `codepoints` is already in `form`.
pub fn is_normalized(codepoints: &[char], form: NormalizationForm) -> bool {
    // ASCII is invariant under every form.
    if codepoints.iter().all(char::is_ascii) {
        return true;
    }
    normalize(codepoints, form) == codepoints
}

fn decompose(codepoints: &[char], compatibility: bool) -> Vec<char> {
    let mut decomposed = Vec::with_capacity(codepoints.len());
    for ch in codepoints {
        tables::decompose(*ch, compatibility, &mut decomposed);
    }
    decomposed
}

/// Canonical ordering: stable sort of each run of non-starters by combining class.
fn reorder(buffer: &mut [char]) {
    let mut start = 0;
    while start < buffer.len() {
        if tables::combining_class(buffer[start]) == 0 {
            start += 1;
            continue;
        }
        let end = buffer[start..]
            .iter()
            .position(|ch| tables::combining_class(*ch) == 0)
            .map_or(buffer.len(), |length| start + length);
        buffer[start..end].sort_by_key(|ch| tables::combining_class(*ch));
        start = end;
    }
}

/// Canonical composition, in place.
fn compose(buffer: &mut Vec<char>) {
    let mut starter: Option<usize> = None;
    let mut last_class = 0u8;
    let mut write = 0;
    for read in 0..buffer.len() {
        let ch = buffer[read];
        let class = tables::combining_class(ch);
        if let Some(position) = starter {
            // Anything between the starter and `ch` with a class >= ch's blocks it.
            let adjacent = position + 1 == write;
            if adjacent || (last_class != 0 && last_class < class) {
                if let Some(composed) = tables::compose(buffer[position], ch) {
                    buffer[position] = composed;
                    continue;
                }
            }
        }
        if class == 0 {
            starter = Some(write);
        }
        last_class = class;
        buffer[write] = ch;
        write += 1;
    }
    buffer.truncate(write);
}

/// Whether every run of non-starters is in canonical order.
pub(crate) fn is_canonically_ordered(codepoints: &[char]) -> bool {
    codepoints
        .iter()
        .map(|ch| tables::combining_class(*ch))
        .tuple_windows()
        .all(|(previous, current)| current == 0 || previous <= current)
}
