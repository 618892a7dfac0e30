//! A text buffer: an ordered sequence of [`Line`]s.
//!
//! The C source threads this as a doubly-linked list of lines addressed by
//! pointer, with `prev`/`next` siblings and no sentinel node. Every external
//! operation in §6 addresses a line by position (`line: i64`, with `-1`
//! meaning "last"), never by pointer, so the externally observable behavior
//! is entirely about order and position — which a `Vec<Line>` expresses
//! directly and without unsafe pointer splicing. `head.prev == ∅`,
//! `tail.next == ∅`, and `size == reachable count` all hold trivially for a
//! `Vec`; there is no separate invariant to maintain by hand.

use crate::error::{ErrorCode, Result};
use crate::text::line::Line;

/// An ordered sequence of lines.
pub struct Buffer {
    lines: Vec<Line>,
    line_growth_base: usize,
}

impl Buffer {
    pub(crate) fn new(line_growth_base: usize) -> Self {
        Buffer { lines: Vec::new(), line_growth_base }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Resolves a `-1`-or-position line index to a slot in `lines`.
    fn resolve_index(&self, line: i64) -> Result<usize> {
        if line == -1 {
            return self.lines.len().checked_sub(1).ok_or(ErrorCode::LineNotFound);
        }
        if line < -1 {
            return Err(ErrorCode::InvalidPayload);
        }
        let index = line as usize;
        if index >= self.lines.len() {
            return Err(ErrorCode::LineNotFound);
        }
        Ok(index)
    }

    /// Inserts a new, empty line at `index` (`-1` appends at the tail).
    /// Returns the position the line was inserted at.
    pub fn insert_line(&mut self, index: i64) -> Result<usize> {
        let pos = if index == -1 {
            self.lines.len()
        } else {
            if index < 0 {
                return Err(ErrorCode::InvalidPayload);
            }
            let pos = index as usize;
            if pos > self.lines.len() {
                return Err(ErrorCode::LineNotFound);
            }
            pos
        };
        self.lines.insert(pos, Line::new(self.line_growth_base));
        Ok(pos)
    }

    pub fn delete_line(&mut self, index: i64) -> Result<()> {
        let pos = self.resolve_index(index)?;
        self.lines.remove(pos);
        Ok(())
    }

    pub fn get_line(&self, index: i64) -> Result<&Line> {
        let pos = self.resolve_index(index)?;
        Ok(&self.lines[pos])
    }

    pub fn get_line_mut(&mut self, index: i64) -> Result<&mut Line> {
        let pos = self.resolve_index(index)?;
        Ok(&mut self.lines[pos])
    }

    /// Splits the line at `index` at byte offset `byte_index`: the tail
    /// bytes become a new line immediately after it.
    pub fn split_line(&mut self, index: i64, byte_index: usize) -> Result<()> {
        let pos = self.resolve_index(index)?;
        let source_len = self.lines[pos].len();
        if byte_index > source_len {
            return Err(ErrorCode::InvalidPayload);
        }
        let tail = self.lines[pos].as_bytes()[byte_index..].to_vec();
        self.lines[pos].delete_bytes(byte_index, source_len - byte_index)?;

        let mut new_line = Line::new(self.line_growth_base);
        new_line.insert_bytes(-1, &tail)?;
        self.lines.insert(pos + 1, new_line);
        Ok(())
    }

    /// Appends `src`'s bytes onto `dst` and removes `src`. Fails unless
    /// `src` immediately follows `dst` (mirrors the C source's
    /// `src->prev == dst` check, expressed positionally since lines are
    /// addressed by index here, not by pointer).
    pub fn join_line(&mut self, dst: usize, src: usize) -> Result<()> {
        if src != dst + 1 {
            return Err(ErrorCode::InvalidPayload);
        }
        if src >= self.lines.len() {
            return Err(ErrorCode::LineNotFound);
        }
        let src_bytes = self.lines[src].as_bytes().to_vec();
        self.lines[dst].insert_bytes(-1, &src_bytes)?;
        self.lines.remove(src);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf() -> Buffer {
        Buffer::new(256)
    }

    #[test]
    fn insert_line_append_and_at_head() {
        let mut b = buf();
        b.insert_line(-1).unwrap();
        b.insert_line(0).unwrap();
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn split_then_join_round_trips() {
        let mut b = buf();
        b.insert_line(-1).unwrap();
        b.get_line_mut(0).unwrap().insert_bytes(0, b"ABCD1234").unwrap();

        b.split_line(0, 4).unwrap();
        assert_eq!(b.get_line(0).unwrap().as_bytes(), b"ABCD");
        assert_eq!(b.get_line(1).unwrap().as_bytes(), b"1234");

        b.join_line(0, 1).unwrap();
        assert_eq!(b.get_line(0).unwrap().as_bytes(), b"ABCD1234");
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn self_join_is_invalid_payload() {
        let mut b = buf();
        b.insert_line(-1).unwrap();
        assert_eq!(b.join_line(0, 0), Err(ErrorCode::InvalidPayload));
    }

    #[test]
    fn join_requires_adjacency() {
        let mut b = buf();
        b.insert_line(-1).unwrap();
        b.insert_line(-1).unwrap();
        b.insert_line(-1).unwrap();
        assert_eq!(b.join_line(0, 2), Err(ErrorCode::InvalidPayload));
        b.join_line(0, 1).unwrap();
    }

    #[test]
    fn get_line_minus_one_is_last() {
        let mut b = buf();
        b.insert_line(-1).unwrap();
        b.insert_line(-1).unwrap();
        b.get_line_mut(1).unwrap().insert_bytes(0, b"last").unwrap();
        assert_eq!(b.get_line(-1).unwrap().as_bytes(), b"last");
    }

    #[test]
    fn out_of_range_line_is_not_found() {
        let b = buf();
        assert_eq!(b.get_line(0), Err(ErrorCode::LineNotFound));
        assert_eq!(b.get_line(-1), Err(ErrorCode::LineNotFound));
    }
}
