// qualitas-core/src/ports/mod.rs

pub mod reader;

pub use reader::DatasetReader;
