use super::types::{FileEntry, FileRow};
use std::path::PathBuf;

/// Working copy of the committed files while the upload dialog is open.
///
/// A session owns its own list. Nothing done here is visible to the committed
/// list until the session is handed back through [`UploadSession::into_entries`].
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    staging: Vec<FileEntry>,
    rows: Vec<FileRow>,
    clear_enabled: bool,
}

impl UploadSession {
    pub fn open(committed: &[FileEntry]) -> Self {
        let mut session = Self {
            staging: committed.to_vec(),
            ..Self::default()
        };
        session.rebuild_rows();
        session.refresh_clear_button();
        tracing::debug!(
            event = "ui.upload_session.opened",
            staged = session.staging.len()
        );
        session
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.staging
    }

    pub fn rows(&self) -> &[FileRow] {
        &self.rows
    }

    pub fn can_clear(&self) -> bool {
        self.clear_enabled
    }

    /// Replace the staged files with a picker result. An empty selection is
    /// a cancelled picker and leaves the session as it was.
    ///
    /// Returns true when the staged files were replaced.
    pub fn apply_selection(&mut self, selection: Vec<PathBuf>) -> bool {
        let replaced = if selection.is_empty() {
            tracing::debug!(event = "ui.upload_session.browse_cancelled");
            false
        } else {
            self.staging = selection.into_iter().map(FileEntry::from).collect();
            self.rebuild_rows();
            tracing::debug!(
                event = "ui.upload_session.browse_applied",
                staged = self.staging.len()
            );
            true
        };
        self.refresh_clear_button();
        replaced
    }

    /// Remove the first staged entry equal to `entry`. Stale callbacks for an
    /// entry that is already gone are ignored.
    pub fn remove(&mut self, entry: &FileEntry) -> bool {
        let removed = match self.staging.iter().position(|e| e == entry) {
            Some(index) => {
                self.staging.remove(index);
                if let Some(row) = self.rows.iter().position(|r| &r.entry == entry) {
                    self.rows.remove(row);
                }
                tracing::debug!(
                    event = "ui.upload_session.entry_removed",
                    path = %entry.path.display(),
                    staged = self.staging.len()
                );
                true
            }
            None => {
                tracing::debug!(
                    event = "ui.upload_session.remove_ignored",
                    path = %entry.path.display()
                );
                false
            }
        };
        self.refresh_clear_button();
        removed
    }

    pub fn clear(&mut self) {
        self.staging.clear();
        self.rows.clear();
        self.refresh_clear_button();
        tracing::debug!(event = "ui.upload_session.cleared");
    }

    /// Hand the staged files over for commit, ending the session.
    pub fn into_entries(self) -> Vec<FileEntry> {
        self.staging
    }

    fn rebuild_rows(&mut self) {
        self.rows = self.staging.iter().cloned().map(FileRow::staged).collect();
    }

    fn refresh_clear_button(&mut self) {
        self.clear_enabled = !self.staging.is_empty();
    }
}
