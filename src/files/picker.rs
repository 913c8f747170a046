use rfd::FileDialog;
use std::path::PathBuf;

/// A labelled group of glob patterns offered by the file picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub patterns: &'static [&'static str],
}

impl FileFilter {
    /// Extensions in the form the native dialog expects (`*.txt` -> `txt`).
    pub fn extensions(&self) -> Vec<&'static str> {
        self.patterns
            .iter()
            .map(|p| p.strip_prefix("*.").unwrap_or(p))
            .collect()
    }
}

pub const NOTE_FILTERS: [FileFilter; 4] = [
    FileFilter {
        label: "Text files",
        patterns: &["*.txt"],
    },
    FileFilter {
        label: "PDF files",
        patterns: &["*.pdf"],
    },
    FileFilter {
        label: "Word documents",
        patterns: &["*.doc", "*.docx"],
    },
    FileFilter {
        label: "All files",
        patterns: &["*"],
    },
];

/// Blocking file selection. An empty result means the user cancelled.
pub trait FilePicker {
    fn pick_files(&self, filters: &[FileFilter]) -> Vec<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick_files(&self, filters: &[FileFilter]) -> Vec<PathBuf> {
        let dialog = filters.iter().fold(
            FileDialog::new().set_title("Select notes"),
            |dialog, filter| dialog.add_filter(filter.label, filter.extensions().as_slice()),
        );
        dialog.pick_files().unwrap_or_default()
    }
}
