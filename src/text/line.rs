//! A single editable line: an owned, growable byte buffer.
//!
//! The C source keeps an explicit `capacity` field and doubles it from 256
//! whenever an insert would overrun it, alongside a hand-rolled `memmove`.
//! Here the buffer is a plain `Vec<u8>`; the doubling policy is preserved
//! deliberately (via [`Line::reserve_for`]) rather than left to `Vec`'s own
//! amortized growth, since the byte-level capacity behavior is directly
//! observable by callers. The
//! C convention of a trailing NUL terminator is not: nothing in this crate
//! ever treats line bytes as a C string, so `Vec::len` is the only length
//! that matters.

use crate::error::{ErrorCode, Result};

/// An owned line of UTF-8 bytes.
#[derive(Debug, Clone)]
pub struct Line {
    data: Vec<u8>,
    growth_base: usize,
}

impl Line {
    pub(crate) fn new(growth_base: usize) -> Self {
        Line { data: Vec::new(), growth_base: growth_base.max(1) }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Doubles the reserved capacity from `growth_base` until it can hold
    /// `additional` more bytes than the line currently has.
    fn reserve_for(&mut self, additional: usize) {
        let needed = self.data.len() + additional;
        let mut target = self.growth_base;
        while target < needed {
            target *= 2;
        }
        if target > self.data.capacity() {
            self.data.reserve_exact(target - self.data.len());
        }
    }

    /// Inserts `bytes` at `byte_index` (`-1` means append). Fails if the
    /// index is past the current length.
    pub fn insert_bytes(&mut self, byte_index: i64, bytes: &[u8]) -> Result<()> {
        let index = if byte_index == -1 { self.data.len() } else { byte_index as usize };
        if byte_index < -1 || index > self.data.len() {
            return Err(ErrorCode::InvalidPayload);
        }
        self.reserve_for(bytes.len());
        self.data.splice(index..index, bytes.iter().copied());
        Ok(())
    }

    /// Deletes up to `size` bytes starting at `byte_index`, clamping `size`
    /// to the remaining length. Fails if the index is past the current
    /// length. Capacity is never shrunk.
    pub fn delete_bytes(&mut self, byte_index: usize, size: usize) -> Result<()> {
        if byte_index > self.data.len() {
            return Err(ErrorCode::InvalidPayload);
        }
        let size = size.min(self.data.len() - byte_index);
        self.data.drain(byte_index..byte_index + size);
        Ok(())
    }
}
