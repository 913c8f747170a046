use crate::files::{FileEntry, FileRow};

/// Committed files and everything on the main screen derived from them.
///
/// `files` only changes through [`MainScreenState::commit`], which also
/// recomputes the status line, the Generate state and the rows.
#[derive(Debug, Clone)]
pub struct MainScreenState {
    files: Vec<FileEntry>,
    rows: Vec<FileRow>,
    status_text: String,
    can_generate: bool,
    error_message: Option<String>,
}

impl Default for MainScreenState {
    fn default() -> Self {
        let mut state = Self {
            files: Vec::new(),
            rows: Vec::new(),
            status_text: String::new(),
            can_generate: false,
            error_message: None,
        };
        state.refresh();
        state
    }
}

impl MainScreenState {
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn rows(&self) -> &[FileRow] {
        &self.rows
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn can_generate(&self) -> bool {
        self.can_generate
    }

    /// Last action failure, shown under the action buttons.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    /// Replace the committed files and refresh the main screen.
    pub fn commit(&mut self, files: Vec<FileEntry>) {
        self.files = files;
        self.refresh();
        tracing::info!(
            event = "ui.files.committed",
            files = self.files.len(),
            status = %self.status_text
        );
    }

    /// Delete the first committed entry equal to `entry`, committing at once.
    pub fn remove(&mut self, entry: &FileEntry) -> bool {
        let Some(index) = self.files.iter().position(|e| e == entry) else {
            tracing::debug!(
                event = "ui.files.remove_ignored",
                path = %entry.path.display()
            );
            return false;
        };
        let mut files = self.files.clone();
        files.remove(index);
        self.commit(files);
        true
    }

    fn refresh(&mut self) {
        self.status_text = status_text(self.files.len());
        self.can_generate = !self.files.is_empty();
        self.rows = self.files.iter().cloned().map(FileRow::committed).collect();
    }
}

pub fn status_text(count: usize) -> String {
    match count {
        0 => "No files uploaded yet.".to_string(),
        1 => "1 file uploaded.".to_string(),
        n => format!("{} files uploaded.", n),
    }
}
