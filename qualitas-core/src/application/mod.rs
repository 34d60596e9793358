// qualitas-core/src/application/mod.rs

pub mod assessment;
pub mod report;

// Facade: the CLI imports `qualitas_core::application::{assess_files, write_report}`
// without knowing the file layout.
pub use assessment::{assess_dataset, assess_file, assess_files};
pub use report::{BadRow, BatchReport, DatasetReport, FileOutcome, write_report};
