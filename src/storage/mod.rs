pub mod fs;

pub use fs::{DirStatus, Storage};
