use std::path::{Path, PathBuf};

/// Decorative marker shown beside every staged file. No check is made that
/// the file is actually readable.
pub const STAGED_INDICATOR: &str = "✅";

/// A file the user picked, identified by its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

impl From<PathBuf> for FileEntry {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// Final path component, or the whole path when there is none (e.g. `/`).
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// One rendered line in a file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub entry: FileEntry,
    pub indicator: Option<&'static str>,
}

impl FileRow {
    pub fn staged(entry: FileEntry) -> Self {
        Self {
            entry,
            indicator: Some(STAGED_INDICATOR),
        }
    }

    pub fn committed(entry: FileEntry) -> Self {
        Self {
            entry,
            indicator: None,
        }
    }
}
