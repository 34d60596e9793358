// qualitas-core/src/infrastructure/mod.rs

pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod readers;

pub use discovery::{discover_files, unique_paths};
pub use readers::{CsvReader, JsonReader, XlsxReader, reader_for_path};
