pub mod tile_grid;
