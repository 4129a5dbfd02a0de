use std::{fmt, sync::Arc};

use image::RgbaImage;
use tokio::task;

use crate::capture::encode;
use crate::config::{Config, ImageFormat};
use crate::export::{
    dependencies::ExportDependencies,
    editor::EditorSettings,
    file::FileSaveConfig,
    print::{PrintSettings, fit_to_page},
    types::{ExportError, ExportKind, ExportResult},
};
use crate::geometry::Size;

/// Per-destination settings captured from the config when the overlay starts.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub file: FileSaveConfig,
    pub print: PrintSettings,
    pub editor: EditorSettings,
}

impl ExportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            file: FileSaveConfig::from_config(&config.export),
            print: PrintSettings {
                page: Size::new(config.print.page_width, config.print.page_height),
                command: config.print.command.clone(),
            },
            editor: EditorSettings::new(config.export.editor_command.clone()),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file: FileSaveConfig::default(),
            print: PrintSettings::default(),
            editor: EditorSettings::new("xdg-open"),
        }
    }
}

#[derive(Clone)]
pub(crate) struct ExportRequest {
    pub(crate) kind: ExportKind,
    pub(crate) image: RgbaImage,
    pub(crate) settings: ExportSettings,
}

impl fmt::Debug for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportRequest")
            .field("kind", &self.kind)
            .field("size", &self.image.dimensions())
            .finish()
    }
}

pub(crate) async fn perform_export(
    request: ExportRequest,
    dependencies: Arc<ExportDependencies>,
) -> Result<ExportResult, ExportError> {
    let ExportRequest {
        kind,
        image,
        settings,
    } = request;
    log::info!("Starting export to {} ({}x{})", kind, image.width(), image.height());

    let format = match kind {
        ExportKind::File => settings.file.format,
        _ => ImageFormat::Png,
    };
    let page = (kind == ExportKind::Print).then_some(settings.print.page);
    let (data, size) = encode_image(image, format, page).await?;
    log::debug!("Encoded selection: {} bytes as {:?}", data.len(), format);

    let path = match kind {
        ExportKind::File => {
            let saver = Arc::clone(&dependencies.saver);
            let config = settings.file;
            Some(blocking(move || saver.save(&data, &config)).await?)
        }
        ExportKind::Clipboard => {
            let clipboard = Arc::clone(&dependencies.clipboard);
            blocking(move || clipboard.copy(&data)).await?;
            None
        }
        ExportKind::Print => {
            let printer = Arc::clone(&dependencies.printer);
            let command = settings.print.command;
            blocking(move || printer.print(&data, &command)).await?;
            None
        }
        ExportKind::Editor => {
            let editor = Arc::clone(&dependencies.editor);
            let editor_settings = settings.editor;
            Some(blocking(move || editor.open(&data, &editor_settings)).await?)
        }
    };

    Ok(ExportResult { kind, size, path })
}

/// Optionally fits to a page, then encodes off the async workers.
async fn encode_image(
    image: RgbaImage,
    format: ImageFormat,
    page: Option<Size>,
) -> Result<(Vec<u8>, Size), ExportError> {
    blocking(move || {
        let image = match page {
            Some(page) => fit_to_page(image, page),
            None => image,
        };
        let size = Size::new(image.width(), image.height());
        Ok((encode(&image, format)?, size))
    })
    .await
}

async fn blocking<T, F>(work: F) -> Result<T, ExportError>
where
    F: FnOnce() -> Result<T, ExportError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| ExportError::EncodeError(format!("Export task failed: {}", e)))?
}
