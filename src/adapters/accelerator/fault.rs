//! Turns panics raised by work items into launch faults.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::core::actions::render_tiles::ports::accelerator::AcceleratorError;

/// Runs `work`, reporting a panic anywhere inside it as [`AcceleratorError::Fault`].
pub(crate) fn run_guarded<F>(work: F) -> Result<(), AcceleratorError>
where
    F: FnOnce() -> Result<(), AcceleratorError>,
{
    match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(result) => result,
        Err(payload) => Err(AcceleratorError::Fault(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "work item panicked".to_string()
    }
}
