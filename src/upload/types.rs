use crate::upload::error::PickError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A file chosen by the user. Everything here is captured once at selection
/// time and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Empty when the type could not be guessed from the extension.
    pub mime: String,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Result<Self, PickError> {
        let metadata = fs::metadata(path).map_err(|source| PickError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(PickError::NotAFile(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime,
        })
    }

    pub fn type_label(&self) -> &str {
        if self.mime.is_empty() {
            "Unknown type"
        } else {
            &self.mime
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Pending,
    Uploading,
    Completed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    pub id: FileId,
    pub file: SelectedFile,
    pub progress: u32,
    pub status: FileStatus,
}

impl TrackedFile {
    pub fn new(id: FileId, file: SelectedFile) -> Self {
        Self {
            id,
            file,
            progress: 0,
            status: FileStatus::Pending,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.status == FileStatus::Completed
    }

    pub fn status_text(&self) -> String {
        match &self.status {
            FileStatus::Completed => "Completed".to_string(),
            FileStatus::Failed(_) => "Failed".to_string(),
            FileStatus::Pending | FileStatus::Uploading => format!("{}%", self.progress),
        }
    }
}

/// Messages sent from upload tasks back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Progress { id: FileId, percent: u32 },
    Completed { id: FileId },
    Failed { id: FileId, reason: String },
    /// Every task of the batch has finished, one way or another.
    Settled,
}

/// Percentage of `loaded` over `total`, rounded. A missing or zero total
/// counts as 1 byte.
pub fn percent_complete(loaded: u64, total: Option<u64>) -> u32 {
    let total = total.filter(|t| *t > 0).unwrap_or(1);
    ((loaded as f64 * 100.0) / total as f64).round() as u32
}
