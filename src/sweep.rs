//! Parameter sweeps.
//!
//! Decodes one bitstream under every `(offset_bits, length_bits)` pair of a
//! grid, scores each successful output by Shannon entropy and picks the
//! lowest. Every candidate is an independent [`decode`] call, so the grid
//! can be evaluated in parallel (`parallel` feature) without changing the
//! outcome.
//!
//! ```rust
//! use bitlz::bitstream::generate_bitstream;
//! use bitlz::sweep::{sweep, SweepConfig};
//!
//! let bits = generate_bitstream(b"the rain in spain");
//! let report = sweep(bits.as_bytes(), &SweepConfig::default());
//! assert_eq!(report.candidates.len(), 9);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::decompress::{decode, DecodeError, DecoderParams};
use crate::entropy::shannon_entropy;
use crate::error::{Error, Result};

/// Grid of field widths to try.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Offset field widths (outer loop).
    pub offset_bits: Vec<u32>,
    /// Length field widths (inner loop).
    pub length_bits: Vec<u32>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            offset_bits: vec![9, 10, 11],
            length_bits: vec![3, 4, 5],
        }
    }
}

impl SweepConfig {
    /// Parse a TOML document:
    ///
    /// ```toml
    /// offset_bits = [9, 10, 11]
    /// length_bits = [3, 4, 5]
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Reject empty grids.
    pub fn validate(&self) -> Result<()> {
        if self.offset_bits.is_empty() {
            return Err(Error::Config("offset_bits must not be empty".into()));
        }
        if self.length_bits.is_empty() {
            return Err(Error::Config("length_bits must not be empty".into()));
        }
        Ok(())
    }

    /// Candidates in evaluation order: offset outer, length inner.
    pub fn candidates(&self) -> Vec<DecoderParams> {
        self.offset_bits
            .iter()
            .flat_map(|&o| self.length_bits.iter().map(move |&l| DecoderParams::new(o, l)))
            .collect()
    }
}

/// How one candidate fared.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Decoded to the end.
    Scored { entropy: f64, output: Vec<u8> },
    /// Decoding stopped early. Never selected as best.
    Failed {
        error: DecodeError,
        partial: Vec<u8>,
    },
}

/// One evaluated grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub params: DecoderParams,
    pub outcome: Outcome,
}

impl Candidate {
    fn evaluate(bits: &[u8], params: DecoderParams) -> Self {
        let decoded = decode(bits, params.offset_bits, params.length_bits);
        let outcome = match decoded.error {
            None => Outcome::Scored {
                entropy: shannon_entropy(&decoded.output),
                output: decoded.output,
            },
            Some(error) => Outcome::Failed {
                error,
                partial: decoded.output,
            },
        };
        debug!(%params, ?outcome, "evaluated candidate");
        Self { params, outcome }
    }

    /// Entropy score, if the candidate decoded cleanly.
    pub fn entropy(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Scored { entropy, .. } => Some(entropy),
            Outcome::Failed { .. } => None,
        }
    }

    /// Decoded output, or the partial output for a failed candidate.
    pub fn output(&self) -> &[u8] {
        match &self.outcome {
            Outcome::Scored { output, .. } | Outcome::Failed { partial: output, .. } => output,
        }
    }

    pub fn error(&self) -> Option<DecodeError> {
        match self.outcome {
            Outcome::Failed { error, .. } => Some(error),
            Outcome::Scored { .. } => None,
        }
    }
}

/// All candidates in grid order and the index of the winner.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    pub candidates: Vec<Candidate>,
    /// First candidate with the strictly lowest entropy.
    pub best: Option<usize>,
}

impl SweepReport {
    pub fn best(&self) -> Option<&Candidate> {
        self.best.map(|i| &self.candidates[i])
    }
}

/// Lowest entropy wins; ties go to the earliest candidate.
fn select_best(candidates: &[Candidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        if let Some(entropy) = candidate.entropy() {
            if best.map_or(true, |(_, lowest)| entropy < lowest) {
                best = Some((i, entropy));
            }
        }
    }
    best.map(|(i, _)| i)
}

/// Run every candidate of `config` against `bits`.
pub fn sweep(bits: &[u8], config: &SweepConfig) -> SweepReport {
    let grid = config.candidates();

    #[cfg(feature = "parallel")]
    let candidates: Vec<Candidate> = {
        use rayon::prelude::*;
        grid.into_par_iter()
            .map(|params| Candidate::evaluate(bits, params))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let candidates: Vec<Candidate> = grid
        .into_iter()
        .map(|params| Candidate::evaluate(bits, params))
        .collect();

    let best = select_best(&candidates);
    if let Some(winner) = best.map(|i| &candidates[i]) {
        info!(
            params = %winner.params,
            entropy = winner.entropy(),
            "selected lowest-entropy candidate"
        );
    } else {
        info!(candidates = candidates.len(), "no candidate decoded cleanly");
    }

    SweepReport { candidates, best }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitstreamWriter;

    #[test]
    fn test_default_grid_order() {
        let grid = SweepConfig::default().candidates();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid[0], DecoderParams::new(9, 3));
        assert_eq!(grid[1], DecoderParams::new(9, 4));
        assert_eq!(grid[3], DecoderParams::new(10, 3));
        assert_eq!(grid[8], DecoderParams::new(11, 5));
    }

    #[test]
    fn test_literal_stream_all_tie() {
        let mut writer = BitstreamWriter::default();
        writer.literals(b"hello world");

        let report = sweep(writer.as_str().as_bytes(), &SweepConfig::default());

        // Literal-only streams decode the same under every width
        assert!(report.candidates.iter().all(|c| c.output() == b"hello world"));
        assert_eq!(report.best, Some(0));
        assert_eq!(report.best().unwrap().params, DecoderParams::new(9, 3));
    }

    #[test]
    fn test_lowest_entropy_wins() {
        let mut writer = BitstreamWriter::new(DecoderParams::new(1, 1));
        writer.literals(b"ab").back_reference(1, 1);
        let bits = writer.finish();

        let config = SweepConfig {
            offset_bits: vec![0, 1],
            length_bits: vec![2, 1],
        };
        let report = sweep(bits.as_bytes(), &config);

        assert_eq!(report.candidates.len(), 4);
        // (0, 2): zero offset copies nothing
        assert_eq!(report.candidates[0].output(), b"ab");
        assert!(report.candidates[0].error().is_none());
        // (0, 1) and (1, 2) run out of bits
        assert!(report.candidates[1].error().is_some());
        assert!(report.candidates[2].error().is_some());
        // (1, 1): "abb" scores below "ab"
        assert_eq!(report.candidates[3].output(), b"abb");
        assert_eq!(report.best, Some(3));
        assert_eq!(report.best().unwrap().params, DecoderParams::new(1, 1));
    }

    #[test]
    fn test_failed_candidates_never_win() {
        let mut writer = BitstreamWriter::default();
        writer.literal(b'a').raw("1");

        let report = sweep(writer.as_str().as_bytes(), &SweepConfig::default());

        assert!(report.candidates.iter().all(|c| matches!(
            c.outcome,
            Outcome::Failed {
                error: DecodeError::IncompleteBackReference { position: 10 },
                ..
            }
        )));
        assert_eq!(report.candidates[0].output(), b"a");
        assert_eq!(report.best, None);
        assert!(report.best().is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let config = SweepConfig::from_toml_str("offset_bits = [4]\nlength_bits = [2, 3]").unwrap();
        assert_eq!(config.offset_bits, vec![4]);
        assert_eq!(config.length_bits, vec![2, 3]);

        let partial = SweepConfig::from_toml_str("offset_bits = [12]").unwrap();
        assert_eq!(partial.length_bits, vec![3, 4, 5]);
    }

    #[test]
    fn test_config_rejects_empty_grid() {
        assert!(matches!(
            SweepConfig::from_toml_str("length_bits = []"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            SweepConfig::from_toml_str("offset_bits = \"nine\""),
            Err(Error::Config(_))
        ));
    }
}
