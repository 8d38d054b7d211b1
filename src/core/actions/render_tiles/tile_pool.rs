use std::fmt;

use thiserror::Error;

use crate::core::data::tile_buffer::TileBuffer;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum TilePoolError {
    #[error("tile pool exhausted: all {capacity} slots are leased")]
    Exhausted { capacity: usize },
    #[error("{slot} does not exist in a pool of {capacity}")]
    UnknownSlot { slot: SlotId, capacity: usize },
    #[error("{slot} is not leased")]
    SlotNotHeld { slot: SlotId },
    #[error("{slot} requested twice in one view")]
    SlotAliased { slot: SlotId },
}

/// Fixed set of tile buffers leased out one slot at a time.
///
/// All storage is allocated up front; the number of slots never changes.
#[derive(Debug)]
pub struct TilePool {
    buffers: Vec<TileBuffer>,
    leased: Vec<bool>,
}

impl TilePool {
    #[must_use]
    pub fn new(capacity: usize, tile_px: u32) -> Self {
        Self {
            buffers: (0..capacity).map(|_| TileBuffer::new(tile_px)).collect(),
            leased: vec![false; capacity],
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffers.len()
    }

    #[must_use]
    pub fn available(&self) -> usize {
        self.leased.iter().filter(|&&held| !held).count()
    }

    /// Leases the lowest free slot, zeroing its buffer.
    pub fn acquire(&mut self) -> Result<SlotId, TilePoolError> {
        let index = self
            .leased
            .iter()
            .position(|&held| !held)
            .ok_or(TilePoolError::Exhausted {
                capacity: self.capacity(),
            })?;

        self.leased[index] = true;
        self.buffers[index].clear();

        Ok(SlotId(index))
    }

    pub fn release(&mut self, slot: SlotId) -> Result<(), TilePoolError> {
        self.check_held(slot)?;
        self.leased[slot.0] = false;

        Ok(())
    }

    pub fn view(&self, slot: SlotId) -> Result<&TileBuffer, TilePoolError> {
        self.check_held(slot)?;

        Ok(&self.buffers[slot.0])
    }

    pub fn view_mut(&mut self, slot: SlotId) -> Result<&mut TileBuffer, TilePoolError> {
        self.check_held(slot)?;

        Ok(&mut self.buffers[slot.0])
    }

    /// Disjoint mutable views of several leased slots, in the order given.
    pub fn views_mut(&mut self, slots: &[SlotId]) -> Result<Vec<&mut TileBuffer>, TilePoolError> {
        for &slot in slots {
            self.check_held(slot)?;
        }

        let mut free: Vec<Option<&mut TileBuffer>> = self.buffers.iter_mut().map(Some).collect();

        slots
            .iter()
            .map(|&slot| free[slot.0].take().ok_or(TilePoolError::SlotAliased { slot }))
            .collect()
    }

    fn check_held(&self, slot: SlotId) -> Result<(), TilePoolError> {
        match self.leased.get(slot.0) {
            None => Err(TilePoolError::UnknownSlot {
                slot,
                capacity: self.capacity(),
            }),
            Some(false) => Err(TilePoolError::SlotNotHeld { slot }),
            Some(true) => Ok(()),
        }
    }
}
