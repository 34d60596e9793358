// qualitas-core/src/infrastructure/discovery.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::readers::is_supported;

/// Lists every readable dataset under `root` (recursively), sorted by path.
#[instrument]
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    if !root.is_dir() {
        return Err(InfrastructureError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("'{}' is not a directory", root.display()),
        )));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_supported(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!(count = files.len(), "Discovered dataset files");
    Ok(files)
}

/// Drops paths naming a file already listed (`a.csv`, `./a.csv`, or the same
/// file found again by [`discover_files`]). The first occurrence keeps its place.
pub fn unique_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for path in paths {
        let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            unique.push(path);
        } else {
            debug!(path = ?path, "Skipping duplicate input");
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_supported_files_sorted() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("b.csv"), "a\n")?;
        fs::write(dir.path().join("a.json"), "[]")?;
        fs::write(dir.path().join("notes.txt"), "skip me")?;
        fs::write(dir.path().join("nested/c.tsv"), "a\n")?;

        let files = discover_files(dir.path())?;
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).map(|r| r.display().to_string()))
            .collect::<Result<_, _>>()?;
        assert_eq!(names, ["a.json", "b.csv", "nested/c.tsv"]);
        Ok(())
    }

    #[test]
    fn test_unique_paths_keeps_first_occurrence() -> Result<()> {
        let dir = tempdir()?;
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "a\n")?;
        fs::write(&b, "a\n")?;

        let mut inputs = vec![b.clone(), a.clone(), dir.path().join(".").join("b.csv")];
        inputs.extend(discover_files(dir.path())?);
        inputs.push(PathBuf::from("missing.csv"));
        inputs.push(PathBuf::from("missing.csv"));

        assert_eq!(unique_paths(inputs), [b, a, PathBuf::from("missing.csv")]);
        Ok(())
    }

    #[test]
    fn test_missing_directory() {
        assert!(discover_files(Path::new("/no/such/dir")).is_err());
    }
}
