mod actions;
mod state;
mod ui;

use crate::config::Palette;
use crate::files::{FileEntry, FilePicker, NativeFilePicker, UploadSession, NOTE_FILTERS};
use derivative::Derivative;
use eframe::{egui, App};
pub use actions::{Action, ActionHandler, ConsoleActions};
use state::MainScreenState;

/// Something the user did during a frame, applied once rendering is done.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    OpenUpload,
    Browse,
    RemoveStaged(FileEntry),
    ClearStaged,
    ConfirmUpload,
    AbandonUpload,
    RemoveCommitted(FileEntry),
    Run(Action),
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct ExamAi {
    state: MainScreenState,
    session: Option<UploadSession>,
    palette: Palette,
    #[derivative(Debug = "ignore")]
    picker: Box<dyn FilePicker>,
    #[derivative(Debug = "ignore")]
    actions: Box<dyn ActionHandler>,
}

impl ExamAi {
    pub fn new(cc: &eframe::CreationContext<'_>, palette: Palette) -> Self {
        tracing::info!(event = "ui.app.started");
        ui::apply_theme(&cc.egui_ctx, &palette);
        Self::with_collaborators(
            palette,
            Box::new(NativeFilePicker),
            Box::new(ConsoleActions),
        )
    }

    pub fn with_collaborators(
        palette: Palette,
        picker: Box<dyn FilePicker>,
        actions: Box<dyn ActionHandler>,
    ) -> Self {
        Self {
            state: MainScreenState::default(),
            session: None,
            palette,
            picker,
            actions,
        }
    }

    pub fn state(&self) -> &MainScreenState {
        &self.state
    }

    pub fn session(&self) -> Option<&UploadSession> {
        self.session.as_ref()
    }

    /// Start a fresh upload session from the committed files, dropping any
    /// session that was still open.
    pub fn open_session(&mut self) {
        if self.session.is_some() {
            tracing::debug!(event = "ui.upload_session.replaced");
        }
        self.session = Some(UploadSession::open(self.state.files()));
    }

    pub fn browse_for_files(&mut self) {
        let Some(session) = self.session.as_mut() else {
            tracing::warn!(event = "ui.upload_session.browse_without_session");
            return;
        };
        let selection = self.picker.pick_files(&NOTE_FILTERS);
        session.apply_selection(selection);
    }

    pub fn remove_from_staging(&mut self, entry: &FileEntry) {
        if let Some(session) = self.session.as_mut() {
            session.remove(entry);
        }
    }

    pub fn clear_staging(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.clear();
        }
    }

    /// Commit the staged files and close the dialog.
    pub fn confirm_session(&mut self) {
        if let Some(session) = self.session.take() {
            self.state.commit(session.into_entries());
        }
    }

    /// Close the dialog without touching the committed files.
    pub fn abandon_session(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(
                event = "ui.upload_session.abandoned",
                discarded = session.entries().len()
            );
        }
    }

    /// Delete a committed file from the main screen. Ignored while the upload
    /// dialog is open, since Done would restore the session's copy.
    pub fn remove_committed(&mut self, entry: &FileEntry) {
        if self.session.is_some() {
            tracing::debug!(
                event = "ui.files.remove_blocked_by_session",
                path = %entry.path.display()
            );
            return;
        }
        self.state.remove(entry);
    }

    pub fn run_action(&mut self, action: Action) {
        if action == Action::Generate && !self.state.can_generate() {
            tracing::debug!(event = "ui.action.generate_disabled");
            return;
        }

        match self.actions.dispatch(action, self.state.files()) {
            Ok(()) => self.state.set_error(None),
            Err(e) => {
                tracing::error!(
                    event = "ui.action.failed",
                    action = action.label(),
                    error = %e
                );
                self.state.set_error(Some(e.to_string()));
            }
        }
    }

    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::OpenUpload => self.open_session(),
            UiEvent::Browse => self.browse_for_files(),
            UiEvent::RemoveStaged(entry) => self.remove_from_staging(&entry),
            UiEvent::ClearStaged => self.clear_staging(),
            UiEvent::ConfirmUpload => self.confirm_session(),
            UiEvent::AbandonUpload => self.abandon_session(),
            UiEvent::RemoveCommitted(entry) => self.remove_committed(&entry),
            UiEvent::Run(action) => self.run_action(action),
        }
    }
}

impl App for ExamAi {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.render(ctx) {
            self.handle(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionError;
    use crate::files::FileFilter;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Hands out queued selections; an exhausted queue behaves like cancel.
    struct ScriptedPicker {
        selections: RefCell<VecDeque<Vec<PathBuf>>>,
        calls: Rc<RefCell<Vec<usize>>>,
    }

    impl FilePicker for ScriptedPicker {
        fn pick_files(&self, filters: &[FileFilter]) -> Vec<PathBuf> {
            self.calls.borrow_mut().push(filters.len());
            self.selections.borrow_mut().pop_front().unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct RecordingActions {
        calls: Rc<RefCell<Vec<(Action, usize)>>>,
        fail_history: bool,
    }

    impl ActionHandler for RecordingActions {
        fn generate(&mut self, files: &[FileEntry]) -> Result<(), ActionError> {
            self.calls.borrow_mut().push((Action::Generate, files.len()));
            Ok(())
        }

        fn history(&mut self) -> Result<(), ActionError> {
            self.calls.borrow_mut().push((Action::History, 0));
            if self.fail_history {
                return Err(ActionError::Failed {
                    action: "history",
                    message: "no history yet".to_string(),
                });
            }
            Ok(())
        }

        fn options(&mut self) -> Result<(), ActionError> {
            self.calls.borrow_mut().push((Action::Options, 0));
            Ok(())
        }
    }

    struct Harness {
        app: ExamAi,
        picker_calls: Rc<RefCell<Vec<usize>>>,
        action_calls: Rc<RefCell<Vec<(Action, usize)>>>,
    }

    fn harness(selections: Vec<Vec<&str>>) -> Harness {
        harness_with(selections, false)
    }

    fn harness_with(selections: Vec<Vec<&str>>, fail_history: bool) -> Harness {
        let picker_calls = Rc::new(RefCell::new(Vec::new()));
        let action_calls = Rc::new(RefCell::new(Vec::new()));
        let picker = ScriptedPicker {
            selections: RefCell::new(
                selections
                    .into_iter()
                    .map(|s| s.into_iter().map(PathBuf::from).collect::<Vec<_>>())
                    .collect(),
            ),
            calls: Rc::clone(&picker_calls),
        };
        let actions = RecordingActions {
            calls: Rc::clone(&action_calls),
            fail_history,
        };
        Harness {
            app: ExamAi::with_collaborators(
                Palette::default(),
                Box::new(picker),
                Box::new(actions),
            ),
            picker_calls,
            action_calls,
        }
    }

    fn entries(paths: &[&str]) -> Vec<FileEntry> {
        paths.iter().map(|p| FileEntry::new(*p)).collect()
    }

    fn staged(app: &ExamAi) -> Vec<FileEntry> {
        app.session().expect("session open").entries().to_vec()
    }

    #[test]
    fn test_upload_round_trip_scenario() {
        let mut h = harness(vec![vec!["/a/notes.txt", "/a/book.pdf"]]);

        h.app.handle(UiEvent::OpenUpload);
        assert!(staged(&h.app).is_empty());
        assert!(!h.app.session().unwrap().can_clear());

        h.app.handle(UiEvent::Browse);
        assert_eq!(staged(&h.app), entries(&["/a/notes.txt", "/a/book.pdf"]));
        assert_eq!(h.app.session().unwrap().rows().len(), 2);
        assert!(h.app.session().unwrap().can_clear());
        assert_eq!(*h.picker_calls.borrow(), vec![NOTE_FILTERS.len()]);

        h.app.handle(UiEvent::ConfirmUpload);
        assert!(h.app.session().is_none());
        assert_eq!(
            h.app.state().files(),
            entries(&["/a/notes.txt", "/a/book.pdf"]).as_slice()
        );
        assert_eq!(h.app.state().status_text(), "2 files uploaded.");
        assert!(h.app.state().can_generate());

        h.app.handle(UiEvent::RemoveCommitted(FileEntry::new("/a/book.pdf")));
        assert_eq!(h.app.state().files(), entries(&["/a/notes.txt"]).as_slice());
        assert_eq!(h.app.state().status_text(), "1 file uploaded.");
        assert!(h.app.state().can_generate());
    }

    #[test]
    fn test_open_session_copies_committed() {
        let mut h = harness(vec![vec!["/a/x.txt", "/a/y.txt"]]);
        h.app.open_session();
        h.app.browse_for_files();
        h.app.confirm_session();

        h.app.open_session();
        assert_eq!(staged(&h.app), entries(&["/a/x.txt", "/a/y.txt"]));

        h.app.remove_from_staging(&FileEntry::new("/a/x.txt"));
        assert_eq!(h.app.state().files().len(), 2);
        assert_eq!(h.app.state().rows().len(), 2);
    }

    #[test]
    fn test_reopen_discards_unconfirmed_staging() {
        let mut h = harness(vec![vec!["/a/x.txt"]]);
        h.app.open_session();
        h.app.browse_for_files();
        assert_eq!(staged(&h.app).len(), 1);

        h.app.open_session();
        assert!(staged(&h.app).is_empty());
        assert!(h.app.state().files().is_empty());
    }

    #[test]
    fn test_cancelled_browse_keeps_staging() {
        let mut h = harness(vec![vec!["/a/x.txt"], vec![]]);
        h.app.open_session();
        h.app.browse_for_files();
        h.app.browse_for_files();

        assert_eq!(staged(&h.app), entries(&["/a/x.txt"]));
        assert_eq!(h.app.session().unwrap().rows().len(), 1);
        assert!(h.app.session().unwrap().can_clear());
    }

    #[test]
    fn test_browse_without_session_does_not_open_picker() {
        let mut h = harness(vec![vec!["/a/x.txt"]]);
        h.app.browse_for_files();
        assert!(h.picker_calls.borrow().is_empty());
        assert!(h.app.session().is_none());
    }

    #[test]
    fn test_clear_then_confirm_empties_committed() {
        let mut h = harness(vec![vec!["/a/x.txt", "/a/y.txt"]]);
        h.app.open_session();
        h.app.browse_for_files();
        h.app.confirm_session();
        assert!(h.app.state().can_generate());

        h.app.open_session();
        h.app.clear_staging();
        h.app.clear_staging();
        assert!(staged(&h.app).is_empty());
        assert!(!h.app.session().unwrap().can_clear());

        h.app.confirm_session();
        assert!(h.app.state().files().is_empty());
        assert_eq!(h.app.state().status_text(), "No files uploaded yet.");
        assert!(!h.app.state().can_generate());
    }

    #[test]
    fn test_abandon_leaves_committed_unchanged() {
        let mut h = harness(vec![vec!["/a/x.txt"], vec!["/b/other.pdf"]]);
        h.app.open_session();
        h.app.browse_for_files();
        h.app.confirm_session();

        h.app.handle(UiEvent::OpenUpload);
        h.app.handle(UiEvent::Browse);
        h.app.handle(UiEvent::AbandonUpload);

        assert!(h.app.session().is_none());
        assert_eq!(h.app.state().files(), entries(&["/a/x.txt"]).as_slice());
        assert_eq!(h.app.state().status_text(), "1 file uploaded.");
    }

    #[test]
    fn test_main_screen_delete_is_ignored_while_dialog_open() {
        let mut h = harness(vec![vec!["/a/notes.txt", "/a/book.pdf"]]);
        h.app.open_session();
        h.app.browse_for_files();
        h.app.confirm_session();

        h.app.open_session();
        h.app.handle(UiEvent::RemoveCommitted(FileEntry::new("/a/book.pdf")));
        assert_eq!(h.app.state().status_text(), "2 files uploaded.");

        h.app.confirm_session();
        assert_eq!(
            h.app.state().files(),
            entries(&["/a/notes.txt", "/a/book.pdf"]).as_slice()
        );
        assert_eq!(h.app.state().status_text(), "2 files uploaded.");

        h.app.remove_committed(&FileEntry::new("/a/book.pdf"));
        assert_eq!(h.app.state().files(), entries(&["/a/notes.txt"]).as_slice());
        assert_eq!(h.app.state().status_text(), "1 file uploaded.");
    }

    #[test]
    fn test_confirm_without_session_is_noop() {
        let mut h = harness(vec![]);
        h.app.confirm_session();
        h.app.abandon_session();
        assert!(h.app.state().files().is_empty());
    }

    #[test]
    fn test_generate_only_runs_with_files() {
        let mut h = harness(vec![vec!["/a/x.txt", "/a/y.txt"]]);
        h.app.run_action(Action::Generate);
        assert!(h.action_calls.borrow().is_empty());

        h.app.open_session();
        h.app.browse_for_files();
        h.app.confirm_session();
        h.app.handle(UiEvent::Run(Action::Generate));

        assert_eq!(*h.action_calls.borrow(), vec![(Action::Generate, 2)]);
    }

    #[test]
    fn test_history_and_options_always_dispatch() {
        let mut h = harness(vec![]);
        h.app.handle(UiEvent::Run(Action::History));
        h.app.handle(UiEvent::Run(Action::Options));
        assert_eq!(
            *h.action_calls.borrow(),
            vec![(Action::History, 0), (Action::Options, 0)]
        );
    }

    #[test]
    fn test_failed_action_sets_error_message_only() {
        let mut h = harness_with(vec![], true);
        h.app.run_action(Action::History);
        assert_eq!(
            h.app.state().error_message(),
            Some("history failed: no history yet")
        );
        assert!(h.app.state().files().is_empty());

        h.app.run_action(Action::Options);
        assert!(h.app.state().error_message().is_none());
    }
}
