use tracing::{debug, trace};

use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::render_tiles::errors::RenderError;
use crate::core::actions::render_tiles::ports::accelerator::{
    Accelerator, Launch, LaunchQueue, WorkExtent,
};
use crate::core::actions::render_tiles::ports::pixel_kernel::PixelKernel;
use crate::core::actions::render_tiles::ports::tile_sink::TileSink;
use crate::core::actions::render_tiles::tile_pool::{SlotId, TilePool, TilePoolError};
use crate::core::data::tile::{TileIndex, TileState};
use crate::core::util::tile_grid::TileGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub tiles: usize,
    pub batches: usize,
}

/// Per-tile state for one render, indexed by position in the pending sequence.
#[derive(Debug)]
struct TileLedger {
    states: Vec<TileState>,
}

impl TileLedger {
    fn new(tiles: usize) -> Self {
        Self {
            states: vec![TileState::Pending; tiles],
        }
    }

    fn advance(&mut self, position: usize, tile: TileIndex, to: TileState) -> Result<(), RenderError> {
        let from = self.states[position];

        if !from.can_advance_to(to) {
            return Err(RenderError::TileTransition { tile, from, to });
        }

        self.states[position] = to;
        Ok(())
    }

    fn all_composited(&self) -> bool {
        self.states.iter().all(|&s| s == TileState::Composited)
    }
}

/// Renders every tile of `grid` into `sink`, at most `pool.capacity()` tiles
/// at a time.
///
/// For cancel-aware rendering, use [`render_tiles_cancelable`].
pub fn render_tiles<A, K, S>(
    grid: &TileGrid,
    kernel: &K,
    accelerator: &A,
    pool: &mut TilePool,
    sink: &mut S,
) -> Result<RenderSummary, RenderError>
where
    A: Accelerator,
    K: PixelKernel,
    S: TileSink,
{
    render_tiles_cancelable(grid, kernel, accelerator, pool, sink, &NeverCancel)
}

/// Like [`render_tiles`], but polls `cancel` before each batch.
///
/// Tiles are taken in row-major order. Each batch leases one pool slot per
/// tile, submits one launch per tile, waits on the accelerator's barrier and
/// only then hands the buffers to `sink`. Any error discards the batch in
/// flight and ends the render.
pub fn render_tiles_cancelable<A, K, S, C>(
    grid: &TileGrid,
    kernel: &K,
    accelerator: &A,
    pool: &mut TilePool,
    sink: &mut S,
    cancel: &C,
) -> Result<RenderSummary, RenderError>
where
    A: Accelerator,
    K: PixelKernel,
    S: TileSink,
    C: CancelToken,
{
    let pending = grid.pending_tiles();
    let batch_capacity = pool.capacity();

    if batch_capacity == 0 && !pending.is_empty() {
        return Err(TilePoolError::Exhausted { capacity: 0 }.into());
    }

    let mut ledger = TileLedger::new(pending.len());
    let mut summary = RenderSummary::default();

    for (batch_index, batch) in pending.chunks(batch_capacity.max(1)).enumerate() {
        if cancel.is_cancelled() {
            return Err(Cancelled {
                batches_completed: summary.batches,
            }
            .into());
        }

        let first = batch_index * batch_capacity;
        debug!(batch = batch_index, tiles = batch.len(), "starting batch");

        let slots = acquire_slots(pool, batch.len())?;
        let outcome = run_batch(grid, kernel, accelerator, pool, sink, &mut ledger, first, batch, &slots);

        if let Err(err) = outcome {
            discard_slots(pool, &slots);
            return Err(err);
        }

        summary.tiles += batch.len();
        summary.batches += 1;
        debug!(batch = batch_index, composited = summary.tiles, "batch composited");
    }

    debug_assert!(ledger.all_composited());

    Ok(summary)
}

fn acquire_slots(pool: &mut TilePool, count: usize) -> Result<Vec<SlotId>, RenderError> {
    let mut slots = Vec::with_capacity(count);

    for _ in 0..count {
        match pool.acquire() {
            Ok(slot) => slots.push(slot),
            Err(err) => {
                discard_slots(pool, &slots);
                return Err(err.into());
            }
        }
    }

    Ok(slots)
}

fn discard_slots(pool: &mut TilePool, slots: &[SlotId]) {
    for &slot in slots {
        // slots already returned by a partially composited batch are skipped
        if pool.view(slot).is_ok() {
            let _ = pool.release(slot);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_batch<A, K, S>(
    grid: &TileGrid,
    kernel: &K,
    accelerator: &A,
    pool: &mut TilePool,
    sink: &mut S,
    ledger: &mut TileLedger,
    first: usize,
    batch: &[TileIndex],
    slots: &[SlotId],
) -> Result<(), RenderError>
where
    A: Accelerator,
    K: PixelKernel,
    S: TileSink,
{
    let extent = WorkExtent::square(grid.tile_px());

    {
        let views = pool.views_mut(slots)?;
        let mut queue = accelerator.queue();

        for (offset, (&tile, view)) in batch.iter().zip(views).enumerate() {
            let grid = *grid;

            queue.submit(Launch::new(extent, view.as_mut_slice(), move |px, py| {
                kernel.intensity(grid.pixel_to_complex(tile, px, py))
            }));
            ledger.advance(first + offset, tile, TileState::Submitted)?;
            trace!(%tile, "tile submitted");
        }

        queue.barrier()?;
    }

    for (offset, &tile) in batch.iter().enumerate() {
        ledger.advance(first + offset, tile, TileState::Rendered)?;
    }

    for (offset, (&tile, &slot)) in batch.iter().zip(slots).enumerate() {
        sink.composite(tile, pool.view(slot)?)?;
        pool.release(slot)?;
        ledger.advance(first + offset, tile, TileState::Composited)?;
        trace!(%tile, "tile composited");
    }

    Ok(())
}
