use crate::upload::error::UploadError;
use crate::upload::transport::{ProgressFn, Transport};
use crate::upload::types::{SelectedFile, UploadEvent};
use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

/// Reports halfway then full progress. Files whose name starts with
/// `fail` get a 500, files starting with `hang` never finish.
pub(crate) struct FakeTransport {
    pub calls: AtomicUsize,
    barrier: Option<Arc<Barrier>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            barrier: None,
        }
    }

    /// No request finishes until `parties` requests are in flight.
    pub(crate) fn gated(parties: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            barrier: Some(Arc::new(Barrier::new(parties))),
        }
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        file: SelectedFile,
        on_progress: ProgressFn,
    ) -> BoxFuture<'static, Result<(), UploadError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let barrier = self.barrier.clone();
        Box::pin(async move {
            if let Some(barrier) = barrier {
                barrier.wait().await;
            }
            if file.name.starts_with("hang") {
                std::future::pending::<()>().await;
            }
            on_progress(file.size / 2, Some(file.size));
            on_progress(file.size, Some(file.size));
            if file.name.starts_with("fail") {
                return Err(UploadError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(())
        })
    }
}

pub(crate) fn selected(name: &str) -> SelectedFile {
    SelectedFile {
        path: PathBuf::from(name),
        name: name.to_string(),
        size: 100,
        mime: "text/plain".to_string(),
    }
}

/// Polls the channel until `Settled` arrives.
pub(crate) async fn collect_until_settled(events: &Receiver<UploadEvent>) -> Vec<UploadEvent> {
    let mut seen = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            while let Ok(event) = events.try_recv() {
                let settled = event == UploadEvent::Settled;
                seen.push(event);
                if settled {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("uploads did not settle");
    seen
}
