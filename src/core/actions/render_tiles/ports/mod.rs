pub mod accelerator;
pub mod pixel_kernel;
pub mod tile_sink;
