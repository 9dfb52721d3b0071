//! Bit reader for textual bitstreams.
//!
//! Reads `'0'`/`'1'` symbols, MSB first. Every field (flag, literal byte,
//! offset, length) goes through [`BitReader::read_bits`].

/// Token tag read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// `'0'`: an 8-bit literal follows.
    Literal,
    /// `'1'`: an offset/length pair follows.
    BackReference,
    /// Any other symbol. Consumed without effect.
    Other(u8),
}

/// Bit reader over a slice of ASCII bit symbols.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a [u8],
    /// Cursor, in symbols.
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader over `bits`.
    pub fn new(bits: &'a [u8]) -> Self {
        Self { bits, pos: 0 }
    }

    /// Whether at least `n` more symbols are available.
    #[inline]
    pub fn has_bits(&self, n: u32) -> bool {
        // n fits in usize on every supported target
        self.remaining() >= n as usize
    }

    /// Read one flag symbol.
    #[inline]
    pub fn read_flag(&mut self) -> Option<Flag> {
        let symbol = *self.bits.get(self.pos)?;
        self.pos += 1;
        Some(match symbol {
            b'0' => Flag::Literal,
            b'1' => Flag::BackReference,
            other => Flag::Other(other),
        })
    }

    /// Read `n` symbols as an unsigned big-endian integer and advance.
    ///
    /// Returns `None` (cursor untouched) when fewer than `n` symbols remain.
    /// Symbols other than `'1'` count as zero. Values that do not fit in
    /// 64 bits saturate at `u64::MAX`.
    #[inline]
    pub fn read_bits(&mut self, n: u32) -> Option<u64> {
        if !self.has_bits(n) {
            return None;
        }
        let end = self.pos + n as usize;
        let value = self.bits[self.pos..end].iter().fold(0u64, |acc, &bit| {
            let bit = u64::from(bit == b'1');
            acc.checked_mul(2)
                .and_then(|v| v.checked_add(bit))
                .unwrap_or(u64::MAX)
        });
        self.pos = end;
        Some(value)
    }

    /// Current cursor position, in symbols.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Symbols left to read.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    /// Check if at end of data.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits() {
        let mut reader = BitReader::new(b"1011010011001010");

        assert_eq!(reader.read_bits(4), Some(0b1011));
        assert_eq!(reader.read_bits(4), Some(0b0100));
        assert_eq!(reader.read_bits(8), Some(0b11001010));
        assert!(reader.is_eof());
    }

    #[test]
    fn test_read_zero_bits() {
        let mut reader = BitReader::new(b"");
        assert_eq!(reader.read_bits(0), Some(0));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_short_read_keeps_cursor() {
        let mut reader = BitReader::new(b"101");
        assert_eq!(reader.read_bits(4), None);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_bits(3), Some(0b101));
    }

    #[test]
    fn test_flags() {
        let mut reader = BitReader::new(b"01x");
        assert_eq!(reader.read_flag(), Some(Flag::Literal));
        assert_eq!(reader.read_flag(), Some(Flag::BackReference));
        assert_eq!(reader.read_flag(), Some(Flag::Other(b'x')));
        assert_eq!(reader.read_flag(), None);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_non_one_symbols_read_as_zero() {
        let mut reader = BitReader::new(b"1x1?");
        assert_eq!(reader.read_bits(4), Some(0b1010));
    }

    #[test]
    fn test_wide_field_saturates() {
        let ones = vec![b'1'; 70];
        let mut reader = BitReader::new(&ones);
        assert_eq!(reader.read_bits(70), Some(u64::MAX));

        let mut bits = vec![b'0'; 6];
        bits.extend_from_slice(&[b'1'; 64]);
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_bits(70), Some(u64::MAX));
    }
}
