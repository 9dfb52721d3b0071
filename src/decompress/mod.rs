//! Bitstream LZ77 decoding.
//!
//! The input is a string of `'0'`/`'1'` symbols. Every token starts with a
//! one-bit flag:
//!
//! ```text
//! token        := flag ( literal | backref )
//! literal      := '0' + 8 bits             (big-endian byte value)
//! backref      := '1' + offset_bits bits   (big-endian distance)
//!                     + length_bits bits   (big-endian copy length)
//! ```
//!
//! There is no end marker. Decoding stops when the symbols run out at a
//! token boundary; running out inside a token is an error.
//!
//! ## Leniency
//!
//! | Input | Handling |
//! |-------|----------|
//! | Literal outside `32..=126` | Dropped (not emitted, not added to the window) |
//! | Back-reference with `offset` past the window | Skipped |
//! | Back-reference with `length == 0` | Skipped |
//! | Back-reference with `offset == 0` | Accepted, copies nothing |
//! | Flag symbol other than `'0'`/`'1'` | Consumed, no effect |
//!
//! Only truncation is reported, and the output produced before the fault
//! is always handed back alongside the error.
//!
//! ## Example
//!
//! ```rust
//! use bitlz::decompress::decode;
//!
//! // 'A' 'B' as two literal tokens
//! let decoded = decode(b"001000001001000010", 9, 3);
//! assert_eq!(decoded.output, b"AB");
//! assert!(decoded.is_complete());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Bit symbols
//!       ↓
//! ┌──────────────┐
//! │ BitReader    │ ← flag / fixed-width big-endian fields
//! └──────────────┘
//!       ↓
//! ┌──────────────┐
//! │ SearchWindow │ ← literals and back-reference copies
//! └──────────────┘
//!       ↓
//! Output bytes
//! ```

mod bit_reader;
mod window;


pub use bit_reader::{BitReader, Flag};
pub use window::SearchWindow;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Width of a literal body, in bits.
pub const LITERAL_BITS: u32 = 8;

/// Literals outside this range are dropped.
pub const PRINTABLE: std::ops::RangeInclusive<u8> = 32..=126;

/// Truncation errors. Each carries the cursor position (in bit symbols)
/// where the fault was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DecodeError {
    /// The stream ended where a flag bit was expected.
    #[error("unexpected end of stream at position {position}")]
    UnexpectedEndOfStream { position: usize },
    /// The stream ended inside a literal body.
    #[error("incomplete literal at position {position}")]
    IncompleteLiteral { position: usize },
    /// The stream ended inside a back-reference body.
    #[error("incomplete back-reference at position {position}")]
    IncompleteBackReference { position: usize },
}

impl DecodeError {
    /// Cursor position where the fault was detected.
    pub fn position(&self) -> usize {
        match *self {
            Self::UnexpectedEndOfStream { position }
            | Self::IncompleteLiteral { position }
            | Self::IncompleteBackReference { position } => position,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Field widths for back-reference tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecoderParams {
    /// Width of the offset field. Also sets the window to `2^offset_bits`.
    pub offset_bits: u32,
    /// Width of the length field.
    pub length_bits: u32,
}

impl DecoderParams {
    pub fn new(offset_bits: u32, length_bits: u32) -> Self {
        Self {
            offset_bits,
            length_bits,
        }
    }

    /// Window bound, `2^offset_bits` (saturating).
    pub fn window_size(&self) -> usize {
        SearchWindow::size_for(self.offset_bits)
    }

    /// Body width of a back-reference token.
    pub fn back_reference_bits(&self) -> u32 {
        self.offset_bits.saturating_add(self.length_bits)
    }
}

impl Default for DecoderParams {
    fn default() -> Self {
        Self::new(9, 3)
    }
}

impl std::fmt::Display for DecoderParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "offsetBits={}, lengthBits={}",
            self.offset_bits, self.length_bits
        )
    }
}

/// Result of one decode call: the output produced and, if decoding stopped
/// early, why.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    /// Every emitted byte, in emission order. Kept on error.
    pub output: Vec<u8>,
    /// The terminal error, if any.
    pub error: Option<DecodeError>,
}

impl Decoded {
    /// Whether the whole stream was consumed without error.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Output as text. Only printable ASCII is ever emitted, so this never
    /// loses data.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }

    /// Discard the partial output on error.
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self.error {
            None => Ok(self.output),
            Some(e) => Err(e),
        }
    }
}

/// Decode `bits` with the given field widths.
///
/// Pure function: each call owns its own window. See [`Lz77Decoder`] to
/// reuse the window allocation across calls.
pub fn decode(bits: &[u8], offset_bits: u32, length_bits: u32) -> Decoded {
    Lz77Decoder::new(DecoderParams::new(offset_bits, length_bits)).decode(bits)
}

/// Reusable bitstream decoder.
///
/// Holds the window allocation between calls; the window contents are
/// reset at the start of every [`decode`](Self::decode).
#[derive(Debug, Clone)]
pub struct Lz77Decoder {
    params: DecoderParams,
    window: SearchWindow,
}

impl Lz77Decoder {
    pub fn new(params: DecoderParams) -> Self {
        Self {
            params,
            window: SearchWindow::new(params.window_size()),
        }
    }

    pub fn params(&self) -> DecoderParams {
        self.params
    }

    /// Window state left by the last call.
    pub fn window(&self) -> &SearchWindow {
        &self.window
    }

    /// Switch field widths for subsequent calls.
    pub fn set_params(&mut self, params: DecoderParams) {
        self.params = params;
        self.window.set_capacity(params.window_size());
    }

    /// Decode one bitstream.
    pub fn decode(&mut self, bits: &[u8]) -> Decoded {
        self.window.reset();
        let mut output = Vec::with_capacity(bits.len() / (LITERAL_BITS as usize + 1));
        let error = self.run(bits, &mut output).err();

        match error {
            Some(e) => debug!(
                params = %self.params,
                produced = output.len(),
                error = %e,
                "decode stopped early"
            ),
            None => debug!(
                params = %self.params,
                bits = bits.len(),
                produced = output.len(),
                "decode complete"
            ),
        }

        Decoded { output, error }
    }

    fn run(&mut self, bits: &[u8], output: &mut Vec<u8>) -> Result<()> {
        let mut reader = BitReader::new(bits);

        if reader.is_eof() {
            return Err(DecodeError::UnexpectedEndOfStream { position: 0 });
        }

        while !reader.is_eof() {
            let flag = reader
                .read_flag()
                .ok_or(DecodeError::UnexpectedEndOfStream {
                    position: reader.position(),
                })?;

            match flag {
                Flag::Literal => self.literal(&mut reader, output)?,
                Flag::BackReference => self.back_reference(&mut reader, output)?,
                Flag::Other(symbol) => {
                    trace!(
                        position = reader.position() - 1,
                        symbol,
                        "ignoring unknown flag symbol"
                    );
                }
            }
        }

        Ok(())
    }

    #[inline]
    fn literal(&mut self, reader: &mut BitReader<'_>, output: &mut Vec<u8>) -> Result<()> {
        let position = reader.position();
        let code = reader
            .read_bits(LITERAL_BITS)
            .ok_or(DecodeError::IncompleteLiteral { position })?;

        // An 8-bit field always fits
        let byte = code as u8;
        if PRINTABLE.contains(&byte) {
            output.push(byte);
            self.window.push(byte);
            self.window.trim();
        } else {
            trace!(position, byte, "dropping non-printable literal");
        }
        Ok(())
    }

    #[inline]
    fn back_reference(&mut self, reader: &mut BitReader<'_>, output: &mut Vec<u8>) -> Result<()> {
        let position = reader.position();
        let incomplete = DecodeError::IncompleteBackReference { position };
        if !reader.has_bits(self.params.back_reference_bits()) {
            return Err(incomplete);
        }
        let offset = reader.read_bits(self.params.offset_bits).ok_or(incomplete)?;
        let length = reader.read_bits(self.params.length_bits).ok_or(incomplete)?;

        match self.window.copy_match(offset, length, output) {
            Some(copied) => {
                if copied < length {
                    trace!(position, offset, length, copied, "back-reference truncated");
                }
                self.window.trim();
            }
            None => {
                trace!(
                    position,
                    offset,
                    length,
                    window = self.window.len(),
                    "skipping invalid back-reference"
                );
            }
        }
        Ok(())
    }
}
