//! Concrete data channel kinds handed to components by the scheduler.

pub mod files;
pub mod graph;

pub use files::FilesDataUnit;
pub use graph::GraphDataUnit;
