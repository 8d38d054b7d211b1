pub mod file_presenter;

pub use file_presenter::{FilePresenterPort, PresentError};
