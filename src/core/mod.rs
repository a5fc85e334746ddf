pub mod class_book;
pub mod rotation;
pub mod services;
pub mod utils;

pub use class_book::{ClassBook, StudentDetail};
pub use rotation::{rotate, RotationReport};
