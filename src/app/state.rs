use crate::upload::{
    FileId, FileStatus, Notify, SelectedFile, TrackedFile, UploadDispatcher, UploadEvent,
};
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use tokio::task::AbortHandle;
use tracing::{debug, info};

/// Everything the widget knows about the current selection. Owned by the UI
/// thread; upload tasks only talk to it through `events`.
#[derive(Default)]
pub struct UploadState {
    pub files: Vec<TrackedFile>,
    pub is_uploading: bool,
    pub error_message: Option<String>,
    next_id: u64,
    events: Option<Receiver<UploadEvent>>,
    in_flight: HashMap<FileId, AbortHandle>,
}

impl UploadState {
    /// Appends one entry per file, after whatever is already listed.
    /// Returns how many were added; nothing is added mid-upload.
    pub fn add_files(&mut self, selected: Vec<SelectedFile>) -> usize {
        if self.is_uploading {
            return 0;
        }

        let added = selected.len();
        for file in selected {
            self.next_id += 1;
            self.files.push(TrackedFile::new(FileId(self.next_id), file));
        }
        debug!("Added {} files, {} listed", added, self.files.len());
        added
    }

    pub fn remove(&mut self, id: FileId) -> Option<TrackedFile> {
        if let Some(task) = self.in_flight.remove(&id) {
            debug!(%id, "Aborting upload of removed file");
            task.abort();
        }
        let index = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        info!("Clearing {} files", self.files.len());
        self.abort_all();
        self.files.clear();
        self.error_message = None;
    }

    /// Upload and clear are only offered with a non-empty, idle list.
    pub fn can_act(&self) -> bool {
        !self.files.is_empty() && !self.is_uploading
    }

    /// Starts uploading every listed file. Returns `false` without touching
    /// anything when the list is empty or an upload is already running.
    pub fn begin_upload(&mut self, dispatcher: &UploadDispatcher, notify: Notify) -> bool {
        if !self.can_act() {
            return false;
        }

        info!("Starting upload of {} files", self.files.len());
        self.is_uploading = true;
        self.error_message = None;

        let batch = self
            .files
            .iter_mut()
            .map(|tracked| {
                tracked.progress = 0;
                tracked.status = FileStatus::Uploading;
                (tracked.id, tracked.file.clone())
            })
            .collect();

        let dispatch = dispatcher.dispatch(batch, notify);
        self.events = Some(dispatch.events);
        self.in_flight = dispatch.tasks;
        true
    }

    /// Drains pending upload events. Returns whether anything arrived.
    pub fn poll_events(&mut self) -> bool {
        let Some(receiver) = &self.events else {
            return false;
        };

        let pending: Vec<UploadEvent> = receiver.try_iter().collect();
        let had_updates = !pending.is_empty();
        for event in pending {
            self.apply(event);
        }
        had_updates
    }

    /// Events for ids no longer listed are dropped.
    pub fn apply(&mut self, event: UploadEvent) {
        match event {
            UploadEvent::Progress { id, percent } => {
                if let Some(tracked) = self.get_mut(id) {
                    tracked.progress = percent;
                }
            }
            UploadEvent::Completed { id } => {
                self.in_flight.remove(&id);
                if let Some(tracked) = self.get_mut(id) {
                    tracked.status = FileStatus::Completed;
                }
            }
            UploadEvent::Failed { id, reason } => {
                self.in_flight.remove(&id);
                if let Some(tracked) = self.get_mut(id) {
                    tracked.status = FileStatus::Failed(reason);
                }
            }
            UploadEvent::Settled => {
                self.is_uploading = false;
                self.events = None;
                self.in_flight.clear();

                let uploaded = self.files.iter().filter(|f| f.is_uploaded()).count();
                let failed = self
                    .files
                    .iter()
                    .filter(|f| matches!(f.status, FileStatus::Failed(_)))
                    .count();
                info!("Upload finished: {} uploaded, {} failed", uploaded, failed);
                if failed > 0 {
                    self.error_message = Some(format!(
                        "{} of {} uploads failed. Hover a failed file for details.",
                        failed,
                        self.files.len()
                    ));
                }
            }
        }
    }

    fn get_mut(&mut self, id: FileId) -> Option<&mut TrackedFile> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    fn abort_all(&mut self) {
        for (_, task) in self.in_flight.drain() {
            task.abort();
        }
    }
}

impl Drop for UploadState {
    fn drop(&mut self) {
        self.abort_all();
    }
}
