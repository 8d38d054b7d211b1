pub mod auto;
pub mod image_file;
pub mod pgm;
