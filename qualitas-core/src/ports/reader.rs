// qualitas-core/src/ports/reader.rs

// What the application needs from file ingestion, without knowing the format.
// A reader either returns the whole dataset or fails: the classifier never sees
// a partially parsed file.

use crate::domain::dataset::Dataset;
use crate::error::QualitasError;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait DatasetReader: Send + Sync {
    /// Short format name, used in logs ("csv", "json").
    fn format(&self) -> &'static str;

    /// Parses raw file content.
    fn parse(&self, content: &[u8]) -> Result<Dataset, QualitasError>;

    /// Reads and parses a file.
    async fn read(&self, path: &Path) -> Result<Dataset, QualitasError> {
        let content = tokio::fs::read(path).await?;
        self.parse(&content)
    }
}
