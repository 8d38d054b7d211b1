pub mod argand_window;
pub mod complex;
pub mod gray_raster;
pub mod render_config;
pub mod tile;
pub mod tile_buffer;
