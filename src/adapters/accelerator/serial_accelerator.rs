use crate::adapters::accelerator::fault::run_guarded;
use crate::core::actions::render_tiles::ports::accelerator::{
    Accelerator, AcceleratorError, Launch, LaunchQueue,
};

/// Runs every launch on the calling thread, in submission order, when the
/// barrier is reached. Reference backend for determinism checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialAccelerator;

impl SerialAccelerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
pub struct SerialQueue<'a> {
    launches: Vec<Launch<'a>>,
}

impl Accelerator for SerialAccelerator {
    type Queue<'a>
        = SerialQueue<'a>
    where
        Self: 'a;

    fn name(&self) -> &str {
        "serial"
    }

    fn queue(&self) -> Self::Queue<'_> {
        SerialQueue {
            launches: Vec::new(),
        }
    }
}

impl<'a> LaunchQueue<'a> for SerialQueue<'a> {
    fn submit(&mut self, launch: Launch<'a>) {
        self.launches.push(launch);
    }

    fn pending(&self) -> usize {
        self.launches.len()
    }

    fn barrier(self) -> Result<(), AcceleratorError> {
        let mut launches = self.launches;

        run_guarded(move || {
            for launch in &mut launches {
                launch.check_shape()?;
                run_launch_serial(launch);
            }

            Ok(())
        })
    }
}

fn run_launch_serial(launch: &mut Launch<'_>) {
    let width = launch.extent.width as usize;
    let item = &*launch.item;

    for (index, value) in launch.target.iter_mut().enumerate() {
        *value = item((index % width) as u32, (index / width) as u32);
    }
}
