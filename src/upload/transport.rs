use crate::upload::error::UploadError;
use crate::upload::types::SelectedFile;
use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Called with the bytes sent so far and the expected total, if known.
pub type ProgressFn = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;

/// Name of the multipart field carrying the file content.
pub const FORM_FIELD: &str = "file";

pub trait Transport: Send + Sync {
    fn send(
        &self,
        file: SelectedFile,
        on_progress: ProgressFn,
    ) -> BoxFuture<'static, Result<(), UploadError>>;
}

#[derive(Deserialize)]
struct UploadReceipt {
    #[serde(default)]
    url: Option<String>,
}

/// Streams each file as `multipart/form-data` to a single endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn post(
        client: Client,
        endpoint: String,
        file: SelectedFile,
        on_progress: ProgressFn,
    ) -> Result<(), UploadError> {
        // The file may have changed since it was selected. Declare and send
        // exactly what it holds now.
        let handle = tokio::fs::File::open(&file.path).await?;
        let total = handle.metadata().await?.len();

        let report = on_progress.clone();
        let mut loaded = 0u64;
        let stream = ReaderStream::new(handle.take(total)).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                loaded += bytes.len() as u64;
                report(loaded, Some(total));
            }
            chunk
        });

        let mut part = Part::stream_with_length(Body::wrap_stream(stream), total)
            .file_name(file.name.clone());
        if !file.mime.is_empty() {
            part = part.mime_str(&file.mime)?;
        }
        let form = Form::new().part(FORM_FIELD, part);

        let response = client.post(&endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status(status));
        }

        // An empty file streams no chunks; the finished request is the whole body.
        if total == 0 {
            on_progress(1, Some(1));
        }

        // The body is informational only; endpoints are free to answer with anything.
        match response.json::<UploadReceipt>().await {
            Ok(receipt) => debug!(
                file = %file.name,
                url = receipt.url.as_deref().unwrap_or("-"),
                "Upload acknowledged"
            ),
            Err(e) => debug!(file = %file.name, "Upload response was not JSON: {}", e),
        }

        Ok(())
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        file: SelectedFile,
        on_progress: ProgressFn,
    ) -> BoxFuture<'static, Result<(), UploadError>> {
        Box::pin(Self::post(
            self.client.clone(),
            self.endpoint.clone(),
            file,
            on_progress,
        ))
    }
}
