//! Unicode-aware string primitives over UTF-8 text: codepoint length, case
//! mapping, reversal, title-casing and normalization.
//!
//! Every function takes raw UTF-8 bytes, decodes them into codepoints, and
//! either returns a count or re-encodes the transformed codepoints.
//!
//! ```
//! assert_eq!(unitext::codepoint_count("A ehm…, word.".as_bytes()), Ok(13));
//! assert_eq!(unitext::upcase("Sluß".as_bytes()).unwrap(), "SLUSS");
//! assert_eq!(unitext::titleize("привет всем".as_bytes()).unwrap(), "Привет Всем");
//! ```

pub mod cli;
mod error;
pub mod normalize;
mod tables;
pub mod transform;
mod utf;

pub use error::{Error, Result};
pub use normalize::NormalizationForm;
pub use transform::CaseDirection;
pub use utf::{decode, encode, Utf8Decoder};

/// Number of codepoints (not bytes, not grapheme clusters) in `text`.
pub fn codepoint_count(text: &[u8]) -> Result<usize> {
    utf::count(text)
}

pub fn case_map(text: &[u8], direction: CaseDirection) -> Result<String> {
    let codepoints = decode(text)?;
    Ok(encode(&transform::case_map(&codepoints, direction)))
}

pub fn upcase(text: &[u8]) -> Result<String> {
    case_map(text, CaseDirection::Upper)
}

pub fn downcase(text: &[u8]) -> Result<String> {
    case_map(text, CaseDirection::Lower)
}

pub fn reverse(text: &[u8]) -> Result<String> {
    let codepoints = decode(text)?;
    Ok(encode(&transform::reverse(&codepoints)))
}

pub fn titleize(text: &[u8]) -> Result<String> {
    let codepoints = decode(text)?;
    Ok(encode(&transform::titleize(&codepoints)))
}

pub fn normalize(text: &[u8], form: NormalizationForm) -> Result<String> {
    let codepoints = decode(text)?;
    Ok(encode(&normalize::normalize(&codepoints, form)))
}

/// Normalizes with a form given by tag (`c`, `d`, `kc`, `kd`).
///
/// The tag is checked before the text is decoded.
pub fn normalize_tagged(text: &[u8], tag: &str) -> Result<String> {
    let form: NormalizationForm = tag.parse()?;
    normalize(text, form)
}
