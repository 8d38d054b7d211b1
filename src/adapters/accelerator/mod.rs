mod fault;
pub mod rayon_accelerator;
pub mod serial_accelerator;
