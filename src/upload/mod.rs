mod dispatcher;
mod error;
mod selection;
mod transport;
mod types;

pub use dispatcher::{Notify, UploadDispatcher};
pub use selection::{collect_folder, read_selection};
pub use transport::HttpTransport;
pub use types::{FileId, FileStatus, SelectedFile, TrackedFile, UploadEvent};

#[cfg(test)]
pub(crate) mod fake;
