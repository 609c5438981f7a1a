use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{AssuranceError, SourceContext};

/// Extension of assurance-case documents.
pub const GSN_EXTENSION: &str = "gsn";

/// `root` itself when it is a file, otherwise every `.gsn` file below it.
///
/// The returned list is sorted so that output order is deterministic.
pub fn discover_gsn_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, AssuranceError> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            AssuranceError::io(path, io::Error::from(e))
        })?;

        if !entry.file_type().is_file() || !is_gsn_file(entry.path()) {
            continue;
        }
        files.push(entry.path().to_path_buf());
    }
    files.sort();
    Ok(files)
}

pub fn is_gsn_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == GSN_EXTENSION)
}

/// Reads a document and pairs it with its diagnostic context.
pub fn load_source(path: &Path) -> Result<SourceContext, AssuranceError> {
    let content = fs::read_to_string(path).map_err(|e| AssuranceError::io(path, e))?;
    Ok(SourceContext::from_file(path.display().to_string(), content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_gsn_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/b.gsn"), "").unwrap();
        fs::write(dir.path().join("a.gsn"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = discover_gsn_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("a.gsn"), PathBuf::from("nested/b.gsn")]);
    }

    #[test]
    fn a_file_root_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.txt");
        fs::write(&file, "").unwrap();
        assert_eq!(discover_gsn_files(&file).unwrap(), vec![file]);
    }
}
