use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceleratorError {
    #[error("launch of {width}x{height} work items does not match target of {target_len} values")]
    ExtentMismatch {
        width: u32,
        height: u32,
        target_len: usize,
    },
    #[error("kernel launch faulted: {0}")]
    Fault(String),
    #[error("accelerator could not be initialised: {0}")]
    Init(String),
}

/// Shape of one data-parallel launch: one work item per `(x, y)` pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WorkExtent {
    pub width: u32,
    pub height: u32,
}

impl WorkExtent {
    #[must_use]
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Work item body: receives `(x, y)` and returns the value stored in the
/// item's own slot of the launch target.
pub type WorkItemFn<'a> = Box<dyn Fn(u32, u32) -> f32 + Send + Sync + 'a>;

/// One submitted launch. The target is borrowed until the queue's barrier.
pub struct Launch<'a> {
    pub extent: WorkExtent,
    pub target: &'a mut [f32],
    pub item: WorkItemFn<'a>,
}

impl<'a> Launch<'a> {
    pub fn new<F>(extent: WorkExtent, target: &'a mut [f32], item: F) -> Self
    where
        F: Fn(u32, u32) -> f32 + Send + Sync + 'a,
    {
        Self {
            extent,
            target,
            item: Box::new(item),
        }
    }

    /// Rejects launches whose extent does not cover the target exactly.
    pub fn check_shape(&self) -> Result<(), AcceleratorError> {
        if self.extent.is_empty() || self.extent.len() != self.target.len() {
            return Err(AcceleratorError::ExtentMismatch {
                width: self.extent.width,
                height: self.extent.height,
                target_len: self.target.len(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for Launch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launch")
            .field("extent", &self.extent)
            .field("target_len", &self.target.len())
            .finish_non_exhaustive()
    }
}

/// FIFO of launches opened for one batch.
///
/// Launches may start executing as soon as they are submitted, but their
/// targets must not be read before [`LaunchQueue::barrier`] returns.
pub trait LaunchQueue<'a> {
    fn submit(&mut self, launch: Launch<'a>);

    fn pending(&self) -> usize;

    /// Blocks until every submitted launch has completed.
    fn barrier(self) -> Result<(), AcceleratorError>;
}

/// Parallel-compute backend driving kernel launches.
pub trait Accelerator {
    type Queue<'a>: LaunchQueue<'a>
    where
        Self: 'a;

    fn name(&self) -> &str;

    fn queue(&self) -> Self::Queue<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_extent_len() {
        assert_eq!(WorkExtent::square(8).len(), 64);
        assert!(WorkExtent::square(0).is_empty());
        assert_eq!(WorkExtent { width: 3, height: 2 }.len(), 6);
    }

    #[test]
    fn test_check_shape_accepts_exact_fit() {
        let mut target = vec![0.0; 16];
        let launch = Launch::new(WorkExtent::square(4), &mut target, |_, _| 0.0);

        assert!(launch.check_shape().is_ok());
    }

    #[test]
    fn test_check_shape_rejects_mismatch() {
        let mut target = vec![0.0; 15];
        let launch = Launch::new(WorkExtent::square(4), &mut target, |_, _| 0.0);

        assert_eq!(
            launch.check_shape(),
            Err(AcceleratorError::ExtentMismatch {
                width: 4,
                height: 4,
                target_len: 15
            })
        );
    }

    #[test]
    fn test_launch_debug_hides_closure() {
        let mut target = vec![0.0; 4];
        let launch = Launch::new(WorkExtent::square(2), &mut target, |_, _| 0.0);

        let debug = format!("{:?}", launch);

        assert!(debug.contains("target_len: 4"));
    }
}
