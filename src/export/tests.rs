use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use image::{Rgba, RgbaImage};
use tokio::time::{Duration, sleep};

use super::{
    dependencies::{ExportClipboard, ExportDependencies, ExportEditor, ExportFileSaver, ExportPrinter},
    editor::EditorSettings,
    file::FileSaveConfig,
    manager::ExportManager,
    pipeline::{ExportRequest, ExportSettings, perform_export},
    types::{ExportError, ExportKind, ExportOutcome, ExportStatus},
};
use crate::config::ImageFormat;
use crate::geometry::Size;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Records every payload it receives; fails on demand.
#[derive(Clone, Default)]
struct Recorder {
    should_fail: bool,
    payloads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Recorder {
    fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    fn record(&self, data: &[u8]) {
        self.payloads.lock().unwrap().push(data.to_vec());
    }

    fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    fn last(&self) -> Vec<u8> {
        self.payloads.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl ExportFileSaver for Recorder {
    fn save(&self, image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
        self.record(image_data);
        if self.should_fail {
            Err(ExportError::SaveError(std::io::Error::other("save failed")))
        } else {
            Ok(config.save_directory.join("saved.png"))
        }
    }
}

impl ExportClipboard for Recorder {
    fn copy(&self, png_data: &[u8]) -> Result<(), ExportError> {
        self.record(png_data);
        if self.should_fail {
            Err(ExportError::ClipboardError("clipboard failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ExportPrinter for Recorder {
    fn print(&self, png_data: &[u8], _command: &str) -> Result<(), ExportError> {
        self.record(png_data);
        if self.should_fail {
            Err(ExportError::PrintError("printer offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ExportEditor for Recorder {
    fn open(&self, png_data: &[u8], settings: &EditorSettings) -> Result<PathBuf, ExportError> {
        self.record(png_data);
        if self.should_fail {
            Err(ExportError::EditorError("no editor".to_string()))
        } else {
            Ok(settings.temp_dir.join("edit.png"))
        }
    }
}

struct Mocks {
    saver: Recorder,
    clipboard: Recorder,
    printer: Recorder,
    editor: Recorder,
}

impl Mocks {
    fn new() -> Self {
        Self {
            saver: Recorder::default(),
            clipboard: Recorder::default(),
            printer: Recorder::default(),
            editor: Recorder::default(),
        }
    }

    fn dependencies(&self) -> Arc<ExportDependencies> {
        Arc::new(ExportDependencies {
            saver: Arc::new(self.saver.clone()),
            clipboard: Arc::new(self.clipboard.clone()),
            printer: Arc::new(self.printer.clone()),
            editor: Arc::new(self.editor.clone()),
        })
    }

    fn total_calls(&self) -> usize {
        self.saver.calls() + self.clipboard.calls() + self.printer.calls() + self.editor.calls()
    }
}

fn selection_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255]))
}

fn settings_in(dir: &Path) -> ExportSettings {
    let mut settings = ExportSettings::default();
    settings.file.save_directory = dir.to_path_buf();
    settings.editor.temp_dir = dir.to_path_buf();
    settings
}

fn request(kind: ExportKind, image: RgbaImage) -> ExportRequest {
    ExportRequest {
        kind,
        image,
        settings: settings_in(Path::new("/tmp/leercopy-test")),
    }
}

async fn wait_for_outcome(manager: &ExportManager) -> Option<ExportOutcome> {
    for _ in 0..50 {
        if let Some(result) = manager.try_take_result() {
            return Some(result);
        }
        sleep(Duration::from_millis(20)).await;
    }
    None
}

#[tokio::test]
async fn test_export_manager_creation() {
    let manager = ExportManager::new(&tokio::runtime::Handle::current());
    assert_eq!(manager.get_status().await, ExportStatus::Idle);
    assert!(manager.try_take_result().is_none());
}

#[tokio::test]
async fn test_clipboard_export_sends_png() {
    let mocks = Mocks::new();
    let result = perform_export(
        request(ExportKind::Clipboard, selection_image(40, 20)),
        mocks.dependencies(),
    )
    .await
    .unwrap();

    assert_eq!(result.kind, ExportKind::Clipboard);
    assert_eq!(result.size, Size::new(40, 20));
    assert!(result.path.is_none());
    assert_eq!(mocks.clipboard.calls(), 1);
    assert_eq!(mocks.total_calls(), 1);
    assert_eq!(&mocks.clipboard.last()[0..8], &PNG_SIGNATURE);

    let decoded = image::load_from_memory(&mocks.clipboard.last()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 20));
}

#[tokio::test]
async fn test_file_export_uses_configured_format() {
    let mocks = Mocks::new();
    let mut req = request(ExportKind::File, selection_image(8, 8));
    req.settings.file.format = ImageFormat::Bmp;

    let result = perform_export(req, mocks.dependencies()).await.unwrap();

    assert_eq!(result.path, Some(PathBuf::from("/tmp/leercopy-test/saved.png")));
    assert_eq!(mocks.saver.calls(), 1);
    assert_eq!(&mocks.saver.last()[0..2], b"BM");
}

#[tokio::test]
async fn test_print_export_scales_to_page() {
    let mocks = Mocks::new();
    let mut req = request(ExportKind::Print, selection_image(400, 100));
    req.settings.print.page = Size::new(200, 200);

    let result = perform_export(req, mocks.dependencies()).await.unwrap();

    assert_eq!(result.size, Size::new(200, 50));
    assert_eq!(mocks.printer.calls(), 1);
    let printed = image::load_from_memory(&mocks.printer.last()).unwrap();
    assert_eq!((printed.width(), printed.height()), (200, 50));
}

#[tokio::test]
async fn test_print_export_keeps_small_selection() {
    let mocks = Mocks::new();
    let result = perform_export(
        request(ExportKind::Print, selection_image(30, 60)),
        mocks.dependencies(),
    )
    .await
    .unwrap();
    assert_eq!(result.size, Size::new(30, 60));
}

#[tokio::test]
async fn test_editor_export_returns_temp_path() {
    let mocks = Mocks::new();
    let result = perform_export(
        request(ExportKind::Editor, selection_image(5, 5)),
        mocks.dependencies(),
    )
    .await
    .unwrap();

    assert_eq!(result.path, Some(PathBuf::from("/tmp/leercopy-test/edit.png")));
    assert_eq!(mocks.editor.calls(), 1);
    assert_eq!(mocks.total_calls(), 1);
}

#[tokio::test]
async fn test_save_failure_propagates() {
    let mut mocks = Mocks::new();
    mocks.saver = Recorder::failing();

    let err = perform_export(
        request(ExportKind::File, selection_image(4, 4)),
        mocks.dependencies(),
    )
    .await
    .unwrap_err();

    match err {
        ExportError::SaveError(_) => {}
        other => panic!("expected SaveError, got {:?}", other),
    }
    assert_eq!(mocks.saver.calls(), 1);
}

#[tokio::test]
async fn test_export_manager_with_dependencies() {
    let mocks = Mocks::new();
    let deps = (*mocks.dependencies()).clone();
    let manager = ExportManager::with_dependencies(&tokio::runtime::Handle::current(), deps);

    manager
        .request_export(
            ExportKind::Clipboard,
            selection_image(10, 10),
            ExportSettings::default(),
        )
        .unwrap();

    match wait_for_outcome(&manager).await {
        Some(ExportOutcome::Success(result)) => {
            assert_eq!(result.kind, ExportKind::Clipboard);
            assert_eq!(result.size, Size::new(10, 10));
        }
        other => panic!("Expected success outcome, got {:?}", other),
    }
    assert_eq!(mocks.clipboard.calls(), 1);
    assert_eq!(manager.get_status().await, ExportStatus::Success);
}

#[tokio::test]
async fn test_export_manager_records_failure() {
    let mut mocks = Mocks::new();
    mocks.printer = Recorder::failing();
    let deps = (*mocks.dependencies()).clone();
    let manager = ExportManager::with_dependencies(&tokio::runtime::Handle::current(), deps);

    manager
        .request_export(
            ExportKind::Print,
            selection_image(10, 10),
            ExportSettings::default(),
        )
        .unwrap();

    match wait_for_outcome(&manager).await {
        Some(ExportOutcome::Failed { kind, message }) => {
            assert_eq!(kind, ExportKind::Print);
            assert!(message.contains("printer offline"));
        }
        other => panic!("Expected failure outcome, got {:?}", other),
    }
    assert!(matches!(
        manager.get_status().await,
        ExportStatus::Failed(ref msg) if msg.contains("printer offline")
    ));
}

#[test]
fn request_export_returns_error_when_channel_closed() {
    let manager = ExportManager::with_closed_channel_for_test();
    let err = manager
        .request_export(
            ExportKind::Clipboard,
            selection_image(1, 1),
            ExportSettings::default(),
        )
        .expect_err("should fail when channel closed");
    assert!(
        matches!(err, ExportError::NotRunning),
        "unexpected error variant: {err:?}"
    );
}

#[test]
fn outcome_notification_text() {
    let saved = ExportOutcome::Success(super::ExportResult {
        kind: ExportKind::File,
        size: Size::new(3, 4),
        path: Some(PathBuf::from("/tmp/Leer_1_2_2024.png")),
    });
    let (summary, body) = saved.notification_text();
    assert_eq!(summary, "Selection saved");
    assert_eq!(body, "Saved to /tmp/Leer_1_2_2024.png");

    let failed = ExportOutcome::Failed {
        kind: ExportKind::Clipboard,
        message: "boom".to_string(),
    };
    assert_eq!(
        failed.notification_text(),
        ("Export to clipboard failed".to_string(), "boom".to_string())
    );
}

#[test]
fn export_kind_from_action() {
    use crate::config::Action;
    assert_eq!(ExportKind::from_action(Action::CopySelection), Some(ExportKind::Clipboard));
    assert_eq!(ExportKind::from_action(Action::EditSelection), Some(ExportKind::Editor));
    assert_eq!(ExportKind::from_action(Action::ViewSelection), None);
}
