//! Sparse slot table of live buffers, addressed by stable integer id.
//!
//! The C source allocates a slot array of initial capacity 32, growing by
//! fixed increments of 32, and hands out the lowest free slot on create.
//! That allocation policy is exactly the kind of observable behavior this
//! crate's tests pin down, so it is reproduced here with a `Vec<Option<Buffer>>`
//! slab rather than left to an unordered `HashMap`.

use crate::config::Config;
use crate::error::{ErrorCode, Result};
use crate::text::buffer::Buffer;

pub struct WritingContext {
    slots: Vec<Option<Buffer>>,
    growth_increment: usize,
    line_growth_base: usize,
    count: usize,
}

impl WritingContext {
    pub fn new(config: &Config) -> Self {
        let mut slots = Vec::with_capacity(config.writing_initial_capacity);
        slots.resize_with(config.writing_initial_capacity, || None);
        WritingContext {
            slots,
            growth_increment: config.writing_capacity_increment.max(1),
            line_growth_base: config.line_initial_capacity,
            count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Allocates a new, empty buffer in the lowest free slot, growing the
    /// table by the configured fixed increment if none is free.
    pub fn create_buffer(&mut self) -> u64 {
        let slot = match self.slots.iter().position(|slot| slot.is_none()) {
            Some(pos) => pos,
            None => {
                let start = self.slots.len();
                self.slots.resize_with(start + self.growth_increment, || None);
                start
            }
        };
        self.slots[slot] = Some(Buffer::new(self.line_growth_base));
        self.count += 1;
        slot as u64
    }

    pub fn destroy_buffer(&mut self, id: u64) -> Result<()> {
        let index = id as usize;
        match self.slots.get_mut(index) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.count -= 1;
                Ok(())
            }
            _ => Err(ErrorCode::BufferNotFound),
        }
    }

    pub fn get(&self, id: u64) -> Result<&Buffer> {
        self.slots.get(id as usize).and_then(|slot| slot.as_ref()).ok_or(ErrorCode::BufferNotFound)
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Buffer> {
        self.slots.get_mut(id as usize).and_then(|slot| slot.as_mut()).ok_or(ErrorCode::BufferNotFound)
    }
}
