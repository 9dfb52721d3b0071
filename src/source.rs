//! Bitstream sources.

use crate::bitstream::parse_bitstream;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Bitstream text stored in a local file.
#[derive(Debug, Clone)]
pub struct LocalBitstreamSource {
    path: PathBuf,
    name: String,
    length: u64,
}

impl LocalBitstreamSource {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            length: metadata.len(),
        })
    }

    /// File size in bytes, including any whitespace.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents.
    pub fn read_to_string(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    /// Read and normalise the bitstream.
    pub fn load(&self) -> Result<String> {
        let bits = parse_bitstream(&self.read_to_string()?)?;
        tracing::debug!(source = %self.name, bits = bits.len(), "loaded bitstream");
        Ok(bits)
    }

    /// Async variant of [`load`](Self::load).
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn load_async(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let bits = parse_bitstream(&text)?;
        tracing::debug!(source = %self.name, bits = bits.len(), "loaded bitstream");
        Ok(bits)
    }
}
