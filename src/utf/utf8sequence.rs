use crate::utf::*;

/// One UTF-8 encoded scalar being assembled byte by byte.
pub(crate) struct Utf8Sequence {
    bytes: [u8; 4],
    width: u8,
    current_length: u8,
}

impl Utf for Utf8Sequence {
    type Point = u8;

    #[inline]
    fn build(byte: Self::Point) -> Option<Self> {
        if Self::is_continuation(byte) || Self::is_invalid(byte) {
            return None;
        }
        let width = match byte.leading_ones() {
            0 => 1,
            2 => 2,
            3 => 3,
            4 => 4,
            _ => return None,
        };
        Some(Self {
            bytes: [byte, 0, 0, 0],
            width,
            current_length: 1,
        })
    }

    #[inline]
    fn get_codepoint(&self) -> u32 {
        let lead = match self.width {
            1 => return self.bytes[0] as u32,
            2 => self.bytes[0] & 0b0001_1111,
            3 => self.bytes[0] & 0b0000_1111,
            _ => self.bytes[0] & 0b0000_0111,
        } as u32;
        self.bytes[1..self.current_len()]
            .iter()
            .fold(lead, |codepoint, byte| {
                (codepoint << 6) | (byte & 0b0011_1111) as u32
            })
    }

    #[inline]
    fn is_complete(&self) -> bool {
        self.current_len() == self.full_len()
    }

    #[inline]
    fn add_point(&mut self, point: Self::Point) -> bool {
        if self.is_complete() || !Self::is_continuation(point) {
            return false;
        }
        self.bytes[self.current_len()] = point;
        self.current_length += 1;
        true
    }

    #[inline]
    fn is_valid(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let codepoint = self.get_codepoint();
        if !is_valid_codepoint(codepoint) {
            return false;
        }
        // Rejects overlong forms: each width owns exactly one range.
        match self.width {
            1 => (..=0x7F).contains(&codepoint),
            2 => (0x80..=0x7FF).contains(&codepoint),
            3 => (0x800..=0xFFFF).contains(&codepoint),
            _ => (0x10000..=0x10FFFF).contains(&codepoint),
        }
    }
}

impl Utf8Sequence {
    #[inline]
    const fn is_continuation(byte: u8) -> bool {
        matches!(byte, 0x80..=0xBF)
    }
    const fn is_invalid(byte: u8) -> bool {
        matches!(byte, 0xC0 | 0xC1 | 0xF5..)
    }
    pub const fn full_len(&self) -> usize {
        self.width as usize
    }
    pub const fn current_len(&self) -> usize {
        self.current_length as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(bytes: &[u8]) -> Option<Utf8Sequence> {
        let (first, rest) = bytes.split_first()?;
        let mut sequence = Utf8Sequence::build(*first)?;
        for byte in rest {
            if !sequence.add_point(*byte) {
                return None;
            }
        }
        Some(sequence)
    }

    #[test]
    fn widths_follow_lead_byte() {
        assert_eq!(Utf8Sequence::build(b'a').unwrap().full_len(), 1);
        assert_eq!(Utf8Sequence::build(0xC3).unwrap().full_len(), 2);
        assert_eq!(Utf8Sequence::build(0xE2).unwrap().full_len(), 3);
        assert_eq!(Utf8Sequence::build(0xF0).unwrap().full_len(), 4);
    }

    #[test]
    fn rejects_bad_lead_bytes() {
        for byte in [0x80, 0xBF, 0xC0, 0xC1, 0xF5, 0xF8, 0xFF] {
            assert!(Utf8Sequence::build(byte).is_none(), "{byte:#04X}");
        }
    }

    #[test]
    fn decodes_each_width() {
        let cases: [(&[u8], u32); 4] = [
            (b"A", 0x41),
            (&[0xC3, 0xA9], 0xE9),
            (&[0xE2, 0x80, 0xA6], 0x2026),
            (&[0xF0, 0x9F, 0x98, 0x80], 0x1F600),
        ];
        for (bytes, expected) in cases {
            let sequence = assemble(bytes).unwrap();
            assert!(sequence.is_complete());
            assert!(sequence.is_valid());
            assert_eq!(sequence.get_codepoint(), expected);
        }
    }

    #[test]
    fn continuation_must_be_in_range() {
        let mut sequence = Utf8Sequence::build(0xC3).unwrap();
        assert!(!sequence.add_point(b'A'));
        assert!(!sequence.add_point(0xC3));
        assert!(sequence.add_point(0xA9));
        assert!(!sequence.add_point(0xA9));
    }

    #[test]
    fn overlong_and_out_of_range_are_invalid() {
        assert!(!assemble(&[0xE0, 0x80, 0x80]).unwrap().is_valid());
        assert!(!assemble(&[0xF0, 0x80, 0x80, 0x80]).unwrap().is_valid());
        assert!(!assemble(&[0xED, 0xA0, 0x80]).unwrap().is_valid());
        assert!(!assemble(&[0xF4, 0x90, 0x80, 0x80]).unwrap().is_valid());
    }

    #[test]
    fn truncated_is_invalid() {
        let sequence = assemble(&[0xE2, 0x80]).unwrap();
        assert!(!sequence.is_complete());
        assert!(!sequence.is_valid());
    }
}
