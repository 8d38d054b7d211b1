//! Tiled rendering of the escape-time image.
//!
//! The scheduler drains tiles in row-major batches sized by the tile pool,
//! launches one kernel per tile on an [`ports::accelerator::Accelerator`]
//! and composites each batch only after the accelerator's barrier.

pub mod batch_scheduler;
pub mod compositor;
pub mod errors;
pub mod ports;
pub mod render;
pub mod tile_pool;
