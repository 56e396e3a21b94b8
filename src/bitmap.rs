//! Fixed-length bit vector packed into `u64` words.
//!
//! Indices past the end are rejected with
//! [`ContainerError::IndexOutOfRange`]; nothing is clamped and nothing is
//! mutated by a rejected call. Growing a bitmap goes through
//! [`Bitmap::expand`], which swaps in freshly allocated storage.

use crate::error::{ContainerError, Result};
use std::fmt;

type Word = u64;

const WORD_BITS: usize = Word::BITS as usize;

/// Printed in place of an index when a scan finds nothing.
pub const BITMAP_ERROR: usize = usize::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    bit_cnt: usize,
    words: Vec<Word>,
}

fn word_count(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

fn word_idx(bit: usize) -> usize {
    bit / WORD_BITS
}

fn bit_mask(bit: usize) -> Word {
    1 << (bit % WORD_BITS)
}

impl Bitmap {
    /// Allocates `bit_cnt` bits, all false.
    pub fn create(bit_cnt: usize) -> Result<Self> {
        let mut words = Vec::new();
        words
            .try_reserve_exact(word_count(bit_cnt))
            .map_err(|_| ContainerError::AllocationFailure { bits: bit_cnt })?;
        words.resize(word_count(bit_cnt), 0);
        Ok(Self { bit_cnt, words })
    }

    pub fn size(&self) -> usize {
        self.bit_cnt
    }

    pub fn set(&mut self, idx: usize, value: bool) -> Result<()> {
        if value {
            self.mark(idx)
        } else {
            self.reset(idx)
        }
    }

    pub fn mark(&mut self, idx: usize) -> Result<()> {
        self.check_index(idx)?;
        self.words[word_idx(idx)] |= bit_mask(idx);
        Ok(())
    }

    pub fn reset(&mut self, idx: usize) -> Result<()> {
        self.check_index(idx)?;
        self.words[word_idx(idx)] &= !bit_mask(idx);
        Ok(())
    }

    pub fn flip(&mut self, idx: usize) -> Result<()> {
        self.check_index(idx)?;
        self.words[word_idx(idx)] ^= bit_mask(idx);
        Ok(())
    }

    pub fn test(&self, idx: usize) -> Result<bool> {
        self.check_index(idx)?;
        Ok(self.bit(idx))
    }

    pub fn set_all(&mut self, value: bool) {
        let fill = if value { Word::MAX } else { 0 };
        self.words.fill(fill);
        self.clear_tail();
    }

    pub fn set_multiple(&mut self, start: usize, count: usize, value: bool) -> Result<()> {
        self.check_range(start, count)?;
        for idx in start..start + count {
            if value {
                self.words[word_idx(idx)] |= bit_mask(idx);
            } else {
                self.words[word_idx(idx)] &= !bit_mask(idx);
            }
        }
        Ok(())
    }

    /// Number of bits in `[start, start + count)` equal to `value`.
    pub fn count(&self, start: usize, count: usize, value: bool) -> Result<usize> {
        self.check_range(start, count)?;
        Ok((start..start + count)
            .filter(|&idx| self.bit(idx) == value)
            .count())
    }

    /// Whether any bit in the range equals `value`.
    pub fn contains(&self, start: usize, count: usize, value: bool) -> Result<bool> {
        Ok(self.scan(start, count, value)?.is_some())
    }

    pub fn any(&self, start: usize, count: usize) -> Result<bool> {
        self.contains(start, count, true)
    }

    pub fn none(&self, start: usize, count: usize) -> Result<bool> {
        Ok(!self.contains(start, count, true)?)
    }

    pub fn all(&self, start: usize, count: usize) -> Result<bool> {
        Ok(!self.contains(start, count, false)?)
    }

    /// Index of the first bit in the range equal to `value`.
    pub fn scan(&self, start: usize, count: usize, value: bool) -> Result<Option<usize>> {
        self.check_range(start, count)?;
        Ok((start..start + count).find(|&idx| self.bit(idx) == value))
    }

    /// Like [`scan`](Self::scan), then flips the bit that was found.
    pub fn scan_and_flip(
        &mut self,
        start: usize,
        count: usize,
        value: bool,
    ) -> Result<Option<usize>> {
        let found = self.scan(start, count, value)?;
        if let Some(idx) = found {
            self.words[word_idx(idx)] ^= bit_mask(idx);
        }
        Ok(found)
    }

    /// Grows the bitmap to `new_capacity` bits, keeping the existing prefix.
    ///
    /// A no-op when `new_capacity` does not exceed the current size. Otherwise
    /// new storage is allocated, the old bits are copied over and the old
    /// storage is released. On allocation failure the bitmap is left as it was.
    pub fn expand(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.bit_cnt {
            return Ok(());
        }
        let mut grown = Bitmap::create(new_capacity)?;
        grown.words[..self.words.len()].copy_from_slice(&self.words);
        log::debug!("bitmap expanded from {} to {} bits", self.bit_cnt, new_capacity);
        *self = grown;
        Ok(())
    }

    /// Lazily renders the bits as `'0'`/`'1'` characters in index order.
    /// The iterator is `Clone`, so a rendering can be replayed.
    pub fn render(&self) -> impl Iterator<Item = char> + Clone + '_ {
        (0..self.bit_cnt).map(|idx| if self.bit(idx) { '1' } else { '0' })
    }

    /// Hex dump of the backing bytes, sixteen per row.
    pub fn hex_dump(&self) -> String {
        const PER_LINE: usize = 16;
        let bytes: Vec<u8> = self.words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let mut out = String::new();
        for (row, chunk) in bytes.chunks(PER_LINE).enumerate() {
            out.push_str(&format!("{:016x}  ", row * PER_LINE));
            for (i, byte) in chunk.iter().enumerate() {
                let sep = if i == PER_LINE / 2 - 1 { '-' } else { ' ' };
                out.push_str(&format!("{byte:02x}{sep}"));
            }
            out.push('\n');
        }
        out
    }

    fn bit(&self, idx: usize) -> bool {
        self.words[word_idx(idx)] & bit_mask(idx) != 0
    }

    fn check_index(&self, idx: usize) -> Result<()> {
        if idx < self.bit_cnt {
            Ok(())
        } else {
            Err(ContainerError::IndexOutOfRange {
                index: idx,
                len: self.bit_cnt,
            })
        }
    }

    fn check_range(&self, start: usize, count: usize) -> Result<()> {
        match start.checked_add(count) {
            Some(end) if start <= self.bit_cnt && end <= self.bit_cnt => Ok(()),
            _ => Err(ContainerError::IndexOutOfRange {
                index: start.saturating_add(count),
                len: self.bit_cnt,
            }),
        }
    }

    /// Keeps the unused high bits of the last word at zero.
    fn clear_tail(&mut self) {
        let used = self.bit_cnt % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1 << used) - 1;
            }
        }
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.render() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
