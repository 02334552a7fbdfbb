pub(crate) mod utf8sequence;

use crate::{Error, Result};
use utf8sequence::Utf8Sequence;

pub(crate) trait Utf: Sized {
    type Point;
    fn build(point: Self::Point) -> Option<Self>;
    fn get_codepoint(&self) -> u32;
    fn is_complete(&self) -> bool;
    fn add_point(&mut self, point: Self::Point) -> bool;
    fn is_valid(&self) -> bool {
        self.is_complete() && is_valid_codepoint(self.get_codepoint())
    }
    fn to_char(&self) -> Option<char> {
        if self.is_valid() {
            char::from_u32(self.get_codepoint())
        } else {
            None
        }
    }
}

pub(crate) const fn is_valid_codepoint(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some()
}

/// Streaming UTF-8 decoder.
///
/// Yields one `char` per well-formed sequence. The first ill-formed
/// sequence yields [`Error::InvalidEncoding`] with the byte offset where it
/// starts, after which the iterator is exhausted.
pub struct Utf8Decoder<'a> {
    bytes: &'a [u8],
    position: usize,
    failed: bool,
}

impl<'a> Utf8Decoder<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            failed: false,
        }
    }

    /// Byte offset of the next sequence to be decoded.
    pub const fn position(&self) -> usize {
        self.position
    }

    fn decode_at(&self, start: usize) -> Option<(char, usize)> {
        let mut sequence = Utf8Sequence::build(*self.bytes.get(start)?)?;
        let mut index = start + 1;
        while !sequence.is_complete() {
            if !sequence.add_point(*self.bytes.get(index)?) {
                return None;
            }
            index += 1;
        }
        sequence.to_char().map(|ch| (ch, index - start))
    }
}

impl Iterator for Utf8Decoder<'_> {
    type Item = Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.bytes.len() {
            return None;
        }
        let start = self.position;
        match self.decode_at(start) {
            Some((ch, width)) => {
                self.position += width;
                Some(Ok(ch))
            }
            None => {
                self.failed = true;
                log::debug!("rejecting ill-formed UTF-8 at byte offset {start}");
                Some(Err(Error::InvalidEncoding { offset: start }))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.bytes.len() - self.position;
        (remaining.div_ceil(4), Some(remaining))
    }
}

/// Decodes UTF-8 bytes into a codepoint sequence.
pub fn decode(bytes: &[u8]) -> Result<Vec<char>> {
    Utf8Decoder::new(bytes).collect()
}

/// Number of codepoints in `bytes`, validating without buffering them.
pub fn count(bytes: &[u8]) -> Result<usize> {
    Utf8Decoder::new(bytes).try_fold(0usize, |count, ch| ch.map(|_| count + 1))
}

/// Encodes a codepoint sequence as minimal-length UTF-8.
pub fn encode(codepoints: &[char]) -> String {
    let mut encoded = String::with_capacity(codepoints.len());
    encoded.extend(codepoints);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mixed_widths() {
        let text = "A ehm…, wörd 😀";
        assert_eq!(
            decode(text.as_bytes()).unwrap(),
            text.chars().collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(decode(b"").unwrap(), Vec::<char>::new());
        assert_eq!(count(b"").unwrap(), 0);
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn count_matches_decode() {
        assert_eq!(count("A ehm…, word.".as_bytes()).unwrap(), 13);
        assert_eq!(count("привет".as_bytes()).unwrap(), 6);
    }

    #[test]
    fn lone_continuation_byte() {
        assert_eq!(
            decode(b"ab\x80cd"),
            Err(Error::InvalidEncoding { offset: 2 })
        );
        assert_eq!(count(b"\xBF"), Err(Error::InvalidEncoding { offset: 0 }));
    }

    #[test]
    fn overlong_ascii() {
        assert_eq!(decode(b"\xC1\x81"), Err(Error::InvalidEncoding { offset: 0 }));
        assert_eq!(
            decode(b"x\xE0\x80\xAF"),
            Err(Error::InvalidEncoding { offset: 1 })
        );
    }

    #[test]
    fn truncated_sequence() {
        assert_eq!(decode(b"ok\xE2\x80"), Err(Error::InvalidEncoding { offset: 2 }));
        assert_eq!(decode(b"\xC3A"), Err(Error::InvalidEncoding { offset: 0 }));
    }

    #[test]
    fn surrogates_and_out_of_range() {
        assert_eq!(decode(b"\xED\xA0\x80"), Err(Error::InvalidEncoding { offset: 0 }));
        assert_eq!(
            decode(b"\xF4\x90\x80\x80"),
            Err(Error::InvalidEncoding { offset: 0 })
        );
        assert!(decode("\u{10FFFF}".as_bytes()).is_ok());
    }

    #[test]
    fn decoder_stops_after_error() {
        let mut decoder = Utf8Decoder::new(b"a\xFFb");
        assert_eq!(decoder.next(), Some(Ok('a')));
        assert_eq!(decoder.position(), 1);
        assert_eq!(decoder.next(), Some(Err(Error::InvalidEncoding { offset: 1 })));
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn encode_round_trips() {
        let text = "Comment ça va? 😀";
        assert_eq!(encode(&decode(text.as_bytes()).unwrap()), text);
    }
}
