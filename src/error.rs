//! Error types for loading, configuring and decoding bitstreams.
//!
//! Decoding itself only fails on truncation, reported as
//! [`DecodeError`](crate::DecodeError). [`Error`] wraps that together with
//! everything that can go wrong around it.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Input | [`InvalidSymbol`] | Bitstream text contains something other than bits and whitespace |
//! | Decoding | [`Decode`] | Stream truncated inside a token |
//! | Configuration | [`Config`] | Sweep configuration could not be read |
//! | I/O | [`Io`] | Read errors |
//!
//! [`InvalidSymbol`]: Error::InvalidSymbol
//! [`Decode`]: Error::Decode
//! [`Config`]: Error::Config
//! [`Io`]: Error::Io

use thiserror::Error;

use crate::decompress::DecodeError;

/// Error type for bitstream operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Bitstream text contains a symbol that is neither a bit nor whitespace.
    #[error("invalid bitstream symbol {symbol:?} at index {index}")]
    InvalidSymbol { symbol: char, index: usize },

    /// Decoding stopped early.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Sweep configuration is malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_is_transparent() {
        let err: Error = DecodeError::IncompleteLiteral { position: 10 }.into();
        assert_eq!(err.to_string(), "incomplete literal at position 10");
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
    }
}
