//! Search buffer (sliding window) for the bitstream decoder.
//!
//! The window is a growable arena with a logical front. Appends are O(1)
//! amortized; trimming only moves the front, and the dead prefix is
//! compacted away once it outgrows the live bytes.

/// Dead prefix below this size is never compacted.
const COMPACT_THRESHOLD: usize = 4096;

/// Sliding window holding the most recent output bytes.
#[derive(Debug, Clone)]
pub struct SearchWindow {
    /// Backing storage; live bytes are `buf[start..]`
    buf: Vec<u8>,
    /// Logical front of the window
    start: usize,
    /// Maximum live length after a trim
    capacity: usize,
}

impl SearchWindow {
    /// Create an empty window bounded to `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::new(),
            start: 0,
            capacity,
        }
    }

    /// Window bound for a given offset field width: `2^offset_bits`,
    /// saturating at `usize::MAX`.
    pub fn size_for(offset_bits: u32) -> usize {
        1usize.checked_shl(offset_bits).unwrap_or(usize::MAX)
    }

    /// Clear the window for reuse, keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
        self.start = 0;
    }

    /// Change the bound. Takes effect at the next [`trim`](Self::trim).
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at logical index `index` (0 is the oldest live byte).
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.buf.get(self.start.checked_add(index)?).copied()
    }

    /// Append one byte. Does not trim.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Live bytes, oldest first.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    /// Drop bytes from the front until at most `capacity` remain.
    #[inline]
    pub fn trim(&mut self) {
        let len = self.len();
        if len <= self.capacity {
            return;
        }
        self.start += len - self.capacity;

        if self.start >= COMPACT_THRESHOLD && self.start > self.len() {
            self.buf.drain(..self.start);
            self.start = 0;
        }
    }

    /// Copy `length` bytes starting `offset` bytes back from the end.
    ///
    /// Returns `None` without touching anything when the reference is
    /// unusable (`offset` beyond the live bytes, or `length == 0`).
    /// Otherwise every copied byte is appended to both the window and
    /// `out` as it is produced, so the copy may run into bytes it has just
    /// written. The source index is checked against the current length on
    /// every step and the copy stops early once it reaches the end; with
    /// `offset == 0` nothing is copied. Returns the number of bytes copied.
    ///
    /// The window is not trimmed here.
    pub fn copy_match(&mut self, offset: u64, length: u64, out: &mut Vec<u8>) -> Option<u64> {
        let len = self.len();
        if length == 0 || offset > len as u64 {
            return None;
        }

        let src_start = len - offset as usize;
        let mut copied = 0u64;
        while copied < length {
            let Some(byte) = usize::try_from(copied)
                .ok()
                .and_then(|i| src_start.checked_add(i))
                .filter(|&src| src < self.len())
                .and_then(|src| self.get(src))
            else {
                break;
            };
            self.push(byte);
            out.push(byte);
            copied += 1;
        }

        Some(copied)
    }
}
