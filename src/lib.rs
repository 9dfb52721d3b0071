//! Bit-oriented LZ77 bitstream decoding.
//!
//! Decodes textual bitstreams (`'0'`/`'1'` symbols) made of flagged literal
//! and back-reference tokens against a sliding window of `2^offset_bits`
//! bytes. Around the decoder sit a few exploration tools: a plain text to
//! bitstream generator, a Shannon entropy scorer and a parameter sweep that
//! picks the field widths whose decoding has the lowest entropy.
//!
//! ```rust
//! use bitlz::decode;
//!
//! let decoded = decode(b"001000001001000010", 9, 3);
//! assert_eq!(decoded.text(), "AB");
//! ```
//!
//! ## Features
//! - `cli` (default) - the `bitlz` command-line driver
//! - `async` - Async bitstream loading with tokio
//! - `parallel` - Multi-threaded parameter sweeps with rayon
//! - `wasm` - Browser WASM bindings

pub mod bitstream;
pub mod decompress;
pub mod entropy;
pub mod error;
pub mod source;
pub mod sweep;

#[cfg(feature = "wasm")]
mod wasm_bindings;

pub use bitstream::{generate_bitstream, parse_bitstream, BitstreamWriter};
pub use decompress::{decode, DecodeError, Decoded, DecoderParams, Lz77Decoder};
pub use entropy::shannon_entropy;
pub use error::Error;
pub use source::LocalBitstreamSource;
pub use sweep::{sweep, SweepConfig, SweepReport};

#[cfg(feature = "wasm")]
pub use wasm_bindings::decode_bitstream;
