use crate::upload::transport::{ProgressFn, Transport};
use crate::upload::types::{percent_complete, FileId, SelectedFile, UploadEvent};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

/// Wakes the consumer of the event channel, e.g. by requesting a repaint.
pub type Notify = Arc<dyn Fn() + Send + Sync>;

/// One batch of in-flight uploads.
pub struct Dispatch {
    pub events: Receiver<UploadEvent>,
    pub tasks: HashMap<FileId, AbortHandle>,
}

/// Spawns one task per file on the given runtime. Every task runs at once;
/// a failed or aborted task never affects its siblings.
#[derive(Clone)]
pub struct UploadDispatcher {
    runtime: Handle,
    transport: Arc<dyn Transport>,
}

impl UploadDispatcher {
    pub fn new(runtime: Handle, transport: Arc<dyn Transport>) -> Self {
        Self { runtime, transport }
    }

    pub fn dispatch(&self, files: Vec<(FileId, SelectedFile)>, notify: Notify) -> Dispatch {
        let (sender, events) = channel();
        let mut tasks = HashMap::with_capacity(files.len());
        let mut handles = Vec::with_capacity(files.len());

        info!("Dispatching {} uploads", files.len());

        for (id, file) in files {
            let upload = self
                .transport
                .send(file.clone(), progress_reporter(id, sender.clone(), notify.clone()));
            let sender = sender.clone();
            let notify = notify.clone();

            let handle = self.runtime.spawn(async move {
                let event = match upload.await {
                    Ok(()) => {
                        debug!(%id, file = %file.name, "Upload completed");
                        UploadEvent::Completed { id }
                    }
                    Err(e) => {
                        warn!(%id, file = %file.name, "Upload failed: {}", e);
                        UploadEvent::Failed {
                            id,
                            reason: e.to_string(),
                        }
                    }
                };
                let _ = sender.send(event);
                notify();
            });

            tasks.insert(id, handle.abort_handle());
            handles.push((id, handle));
        }

        self.runtime.spawn(async move {
            for (id, handle) in handles {
                match handle.await {
                    Ok(()) => {}
                    Err(e) if e.is_cancelled() => debug!(%id, "Upload cancelled"),
                    Err(e) => {
                        error!(%id, "Upload task panicked: {}", e);
                        let _ = sender.send(UploadEvent::Failed {
                            id,
                            reason: "upload task panicked".to_string(),
                        });
                    }
                }
            }
            info!("All uploads settled");
            let _ = sender.send(UploadEvent::Settled);
            notify();
        });

        Dispatch { events, tasks }
    }
}

fn progress_reporter(id: FileId, sender: Sender<UploadEvent>, notify: Notify) -> ProgressFn {
    let last = AtomicU32::new(u32::MAX);
    Arc::new(move |loaded, total| {
        let percent = percent_complete(loaded, total);
        if last.swap(percent, Ordering::Relaxed) != percent {
            let _ = sender.send(UploadEvent::Progress { id, percent });
            notify();
        }
    })
}
