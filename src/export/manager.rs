use std::sync::Arc;

use image::RgbaImage;
use tokio::sync::{Mutex, mpsc};

use crate::export::{
    dependencies::ExportDependencies,
    pipeline::{ExportRequest, ExportSettings, perform_export},
    types::{ExportError, ExportKind, ExportOutcome, ExportStatus},
};

/// Shared state for running exports off the Wayland event loop.
///
/// Requests are queued on a channel and processed one at a time by a task on
/// the tokio runtime; the event loop polls [`ExportManager::try_take_result`].
#[derive(Clone)]
pub struct ExportManager {
    request_tx: mpsc::UnboundedSender<ExportRequest>,
    status: Arc<Mutex<ExportStatus>>,
    last_result: Arc<Mutex<Option<ExportOutcome>>>,
}

impl ExportManager {
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        Self::with_dependencies(runtime_handle, ExportDependencies::default())
    }

    /// Create an export manager with custom dependencies (useful for testing).
    pub fn with_dependencies(
        runtime_handle: &tokio::runtime::Handle,
        dependencies: ExportDependencies,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ExportRequest>();
        let status = Arc::new(Mutex::new(ExportStatus::Idle));
        let last_result = Arc::new(Mutex::new(None));
        let dependencies = Arc::new(dependencies);

        let status_clone = status.clone();
        let result_clone = last_result.clone();

        runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                log::debug!("Processing export request: {:?}", request);
                let kind = request.kind;

                *status_clone.lock().await = ExportStatus::InProgress;

                match perform_export(request, dependencies.clone()).await {
                    Ok(result) => {
                        log::info!("Export to {} succeeded: {:?}", kind, result.path);
                        *status_clone.lock().await = ExportStatus::Success;
                        *result_clone.lock().await = Some(ExportOutcome::Success(result));
                    }
                    Err(e) => {
                        let message = e.to_string();
                        log::error!("Export to {} failed: {}", kind, message);
                        *status_clone.lock().await = ExportStatus::Failed(message.clone());
                        *result_clone.lock().await = Some(ExportOutcome::Failed { kind, message });
                    }
                }
            }
        });

        Self {
            request_tx,
            status,
            last_result,
        }
    }

    /// Queue an export of an already-cropped selection. Returns immediately.
    pub fn request_export(
        &self,
        kind: ExportKind,
        image: RgbaImage,
        settings: ExportSettings,
    ) -> Result<(), ExportError> {
        self.request_tx
            .send(ExportRequest {
                kind,
                image,
                settings,
            })
            .map_err(|_| ExportError::NotRunning)
    }

    pub async fn get_status(&self) -> ExportStatus {
        self.status.lock().await.clone()
    }

    /// Try to get the last result without waiting (non-blocking).
    pub fn try_take_result(&self) -> Option<ExportOutcome> {
        self.last_result.try_lock().ok().and_then(|mut r| r.take())
    }
}

#[cfg(test)]
impl ExportManager {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<ExportRequest>();
        drop(rx);
        Self {
            request_tx: tx,
            status: Arc::new(Mutex::new(ExportStatus::Idle)),
            last_result: Arc::new(Mutex::new(None)),
        }
    }
}
