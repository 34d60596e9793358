pub mod dataset;
pub mod error;
pub mod quality;

// Re-exports to keep imports short elsewhere
pub use dataset::{Dataset, Row, Value};
pub use error::DomainError;
