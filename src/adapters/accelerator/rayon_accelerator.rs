use rayon::prelude::*;

use crate::adapters::accelerator::fault::run_guarded;
use crate::core::actions::render_tiles::ports::accelerator::{
    Accelerator, AcceleratorError, Launch, LaunchQueue,
};

/// Work-stealing CPU backend.
///
/// Launches queue up until the barrier, which then runs the whole batch in
/// parallel: across tiles, and across rows inside each tile. Uses rayon's
/// global pool unless built with [`RayonAccelerator::with_threads`].
#[derive(Debug, Default)]
pub struct RayonAccelerator {
    pool: Option<rayon::ThreadPool>,
}

impl RayonAccelerator {
    #[must_use]
    pub fn new() -> Self {
        Self { pool: None }
    }

    pub fn with_threads(threads: usize) -> Result<Self, AcceleratorError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("tile-worker-{}", index))
            .build()
            .map_err(|err| AcceleratorError::Init(err.to_string()))?;

        Ok(Self { pool: Some(pool) })
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }
}

#[derive(Debug)]
pub struct RayonQueue<'a> {
    accelerator: &'a RayonAccelerator,
    launches: Vec<Launch<'a>>,
}

impl Accelerator for RayonAccelerator {
    type Queue<'a>
        = RayonQueue<'a>
    where
        Self: 'a;

    fn name(&self) -> &str {
        "rayon"
    }

    fn queue(&self) -> Self::Queue<'_> {
        RayonQueue {
            accelerator: self,
            launches: Vec::new(),
        }
    }
}

impl<'a> LaunchQueue<'a> for RayonQueue<'a> {
    fn submit(&mut self, launch: Launch<'a>) {
        self.launches.push(launch);
    }

    fn pending(&self) -> usize {
        self.launches.len()
    }

    fn barrier(self) -> Result<(), AcceleratorError> {
        let RayonQueue {
            accelerator,
            launches,
        } = self;

        for launch in &launches {
            launch.check_shape()?;
        }

        let run = move || {
            launches
                .into_par_iter()
                .for_each(|mut launch| run_launch_parallel(&mut launch))
        };

        run_guarded(|| {
            match &accelerator.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }

            Ok(())
        })
    }
}

fn run_launch_parallel(launch: &mut Launch<'_>) {
    let width = launch.extent.width as usize;
    let item = &*launch.item;

    launch
        .target
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate() {
                *value = item(x as u32, y as u32);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::accelerator::serial_accelerator::SerialAccelerator;
    use crate::core::actions::render_tiles::ports::accelerator::WorkExtent;

    fn run_batch<A: Accelerator>(accelerator: &A, tiles: usize, side: u32) -> Vec<Vec<f32>> {
        let mut targets = vec![vec![0.0; side as usize * side as usize]; tiles];

        let mut queue = accelerator.queue();
        for (tile, target) in targets.iter_mut().enumerate() {
            queue.submit(Launch::new(WorkExtent::square(side), target, move |x, y| {
                (tile as u32 * 1000 + y * side + x) as f32
            }));
        }
        queue.barrier().unwrap();

        targets
    }

    #[test]
    fn test_rayon_produces_same_results_as_serial() {
        let rayon = RayonAccelerator::new();

        assert_eq!(
            run_batch(&rayon, 5, 7),
            run_batch(&SerialAccelerator::new(), 5, 7)
        );
    }

    #[test]
    fn test_dedicated_pool_produces_same_results_as_serial() {
        let rayon = RayonAccelerator::with_threads(3).unwrap();

        assert_eq!(rayon.threads(), 3);
        assert_eq!(
            run_batch(&rayon, 4, 16),
            run_batch(&SerialAccelerator::new(), 4, 16)
        );
    }

    #[test]
    fn test_empty_batch_is_fine() {
        let rayon = RayonAccelerator::new();

        assert!(rayon.queue().barrier().is_ok());
    }

    #[test]
    fn test_shape_mismatch_is_reported_before_running() {
        let rayon = RayonAccelerator::new();
        let mut good = vec![0.0; 4];
        let mut bad = vec![0.0; 5];

        let mut queue = rayon.queue();
        queue.submit(Launch::new(WorkExtent::square(2), &mut good, |_, _| 1.0));
        queue.submit(Launch::new(WorkExtent::square(2), &mut bad, |_, _| 1.0));

        assert!(matches!(
            queue.barrier(),
            Err(AcceleratorError::ExtentMismatch { target_len: 5, .. })
        ));
        assert_eq!(good, vec![0.0; 4]);
    }

    #[test]
    fn test_panicking_item_is_a_fault() {
        let rayon = RayonAccelerator::with_threads(2).unwrap();
        let mut target = vec![0.0; 64];

        let mut queue = rayon.queue();
        queue.submit(Launch::new(WorkExtent::square(8), &mut target, |x, y| {
            if x == 3 && y == 5 {
                panic!("device fault");
            }
            0.0
        }));

        assert_eq!(
            queue.barrier(),
            Err(AcceleratorError::Fault("device fault".to_string()))
        );
    }
}
