use crate::error::ActionError;
use crate::files::FileEntry;

/// Main-screen commands that are not part of file management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    History,
    Options,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Generate => "generate",
            Action::History => "history",
            Action::Options => "options",
        }
    }
}

pub trait ActionHandler {
    fn generate(&mut self, files: &[FileEntry]) -> Result<(), ActionError>;
    fn history(&mut self) -> Result<(), ActionError>;
    fn options(&mut self) -> Result<(), ActionError>;

    fn dispatch(&mut self, action: Action, files: &[FileEntry]) -> Result<(), ActionError> {
        match action {
            Action::Generate => self.generate(files),
            Action::History => self.history(),
            Action::Options => self.options(),
        }
    }
}

/// Reports each action on the console and does nothing else.
#[derive(Debug, Default)]
pub struct ConsoleActions;

impl ActionHandler for ConsoleActions {
    fn generate(&mut self, files: &[FileEntry]) -> Result<(), ActionError> {
        tracing::info!(
            event = "ui.action.generate",
            files = files.len(),
            "{}",
            Action::Generate.label()
        );
        Ok(())
    }

    fn history(&mut self) -> Result<(), ActionError> {
        tracing::info!(event = "ui.action.history", "{}", Action::History.label());
        Ok(())
    }

    fn options(&mut self) -> Result<(), ActionError> {
        tracing::info!(event = "ui.action.options", "{}", Action::Options.label());
        Ok(())
    }
}
