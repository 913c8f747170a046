mod picker;
mod session;
mod types;

pub use picker::{FileFilter, FilePicker, NativeFilePicker, NOTE_FILTERS};
pub use session::UploadSession;
pub use types::{FileEntry, FileRow};
