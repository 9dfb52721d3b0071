//! Producing and normalising textual bitstreams.
//!
//! [`generate_bitstream`] is the plain demonstration encoding: 8 bits per
//! input byte, no flags. [`BitstreamWriter`] emits real tokens for a given
//! [`DecoderParams`]; it serialises tokens the caller chooses and does no
//! match finding.

use crate::decompress::{DecoderParams, LITERAL_BITS};
use crate::error::{Error, Result};

/// Encode every byte of `text` as 8 bits, MSB first, with no separators.
pub fn generate_bitstream(text: &[u8]) -> String {
    let mut bits = String::with_capacity(text.len() * 8);
    for &byte in text {
        push_bits(&mut bits, u64::from(byte), LITERAL_BITS);
    }
    bits
}

/// Normalise bitstream text read from a file or stdin.
///
/// ASCII whitespace (line breaks, spaces between groups) is dropped. Any
/// other symbol besides `'0'` and `'1'` is rejected.
pub fn parse_bitstream(text: &str) -> Result<String> {
    let mut bits = String::with_capacity(text.len());
    for (index, symbol) in text.chars().enumerate() {
        match symbol {
            '0' | '1' => bits.push(symbol),
            c if c.is_ascii_whitespace() => {}
            c => return Err(Error::InvalidSymbol { symbol: c, index }),
        }
    }
    Ok(bits)
}

/// Append the low `width` bits of `value`, MSB first. Widths past 64 are
/// padded with leading zeros.
fn push_bits(out: &mut String, value: u64, width: u32) {
    for i in (0..width).rev() {
        let bit = if i < u64::BITS { (value >> i) & 1 } else { 0 };
        out.push(if bit == 1 { '1' } else { '0' });
    }
}

/// Token serializer.
///
/// ```rust
/// use bitlz::bitstream::BitstreamWriter;
/// use bitlz::decompress::{decode, DecoderParams};
///
/// let params = DecoderParams::new(4, 3);
/// let mut writer = BitstreamWriter::new(params);
/// writer.literals(b"ab").back_reference(2, 4);
///
/// let decoded = decode(writer.as_str().as_bytes(), 4, 3);
/// assert_eq!(decoded.output, b"ababab");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitstreamWriter {
    params: DecoderParams,
    bits: String,
}

impl BitstreamWriter {
    pub fn new(params: DecoderParams) -> Self {
        Self {
            params,
            bits: String::new(),
        }
    }

    pub fn params(&self) -> DecoderParams {
        self.params
    }

    /// Literal token: flag `0` and the byte.
    pub fn literal(&mut self, byte: u8) -> &mut Self {
        self.bits.push('0');
        push_bits(&mut self.bits, u64::from(byte), LITERAL_BITS);
        self
    }

    /// One literal token per byte.
    pub fn literals(&mut self, bytes: &[u8]) -> &mut Self {
        for &byte in bytes {
            self.literal(byte);
        }
        self
    }

    /// Back-reference token: flag `1`, offset, length. Values wider than
    /// their fields keep only the low bits.
    pub fn back_reference(&mut self, offset: u64, length: u64) -> &mut Self {
        self.bits.push('1');
        push_bits(&mut self.bits, offset, self.params.offset_bits);
        push_bits(&mut self.bits, length, self.params.length_bits);
        self
    }

    /// Append symbols verbatim (truncated tails, stray flags).
    pub fn raw(&mut self, bits: &str) -> &mut Self {
        self.bits.push_str(bits);
        self
    }

    /// Number of symbols written so far.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.bits
    }

    pub fn finish(self) -> String {
        self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bitstream() {
        assert_eq!(generate_bitstream(b"A"), "01000001");
        assert_eq!(generate_bitstream(b"AB"), "0100000101000010");
        assert_eq!(generate_bitstream(b""), "");
    }

    #[test]
    fn test_generate_length() {
        let text = b"the rain in spain";
        assert_eq!(generate_bitstream(text).len(), text.len() * 8);
    }

    #[test]
    fn test_parse_bitstream_strips_whitespace() {
        let parsed = parse_bitstream("0100 0001\n01000010\r\n").unwrap();
        assert_eq!(parsed, "0100000101000010");
    }

    #[test]
    fn test_parse_bitstream_rejects_symbols() {
        let err = parse_bitstream("01 2").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSymbol {
                symbol: '2',
                index: 3
            }
        ));
    }

    #[test]
    fn test_writer_literal() {
        let mut writer = BitstreamWriter::new(DecoderParams::new(9, 3));
        writer.literals(b"AB");
        assert_eq!(writer.as_str(), "001000001001000010");
        assert_eq!(writer.len(), 18);
    }

    #[test]
    fn test_writer_back_reference() {
        let mut writer = BitstreamWriter::new(DecoderParams::new(4, 3));
        writer.back_reference(5, 2);
        assert_eq!(writer.finish(), "10101010");
    }

    #[test]
    fn test_writer_masks_wide_values() {
        let mut writer = BitstreamWriter::new(DecoderParams::new(2, 2));
        writer.back_reference(0b111, 0b100);
        assert_eq!(writer.as_str(), "11100");
    }

    #[test]
    fn test_writer_zero_width_fields() {
        let mut writer = BitstreamWriter::new(DecoderParams::new(0, 0));
        writer.back_reference(7, 7);
        assert_eq!(writer.as_str(), "1");
    }
}
