//! Configuration type definitions.

use super::enums::{ColorSpec, ImageFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overlay appearance.
///
/// The frozen snapshot is dimmed by `background_color` at `opacity`; the
/// selected region shows through untinted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OverlayConfig {
    /// Tint strength over the snapshot (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Tint color - a named color (gray, white, black, ...) or `[r, g, b]`
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Show the key tips panel when the overlay opens
    #[serde(default = "default_show_tips")]
    pub show_tips: bool,

    /// Color of the tips panel text
    #[serde(default = "default_tips_text_color")]
    pub tips_text_color: ColorSpec,

    /// Font size for the tips panel
    #[serde(default = "default_tips_font_size")]
    pub tips_font_size: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            background_color: default_background_color(),
            show_tips: default_show_tips(),
            tips_text_color: default_tips_text_color(),
            tips_font_size: default_tips_font_size(),
        }
    }
}

/// Selection border settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BorderConfig {
    /// Draw a border around the selection
    #[serde(default = "default_border_enabled")]
    pub enabled: bool,

    /// Border color
    #[serde(default = "default_border_color")]
    pub color: ColorSpec,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            enabled: default_border_enabled(),
            color: default_border_color(),
        }
    }
}

/// Where and how selections are exported.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for saved selections (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template, formatted with chrono (e.g. "Leer_%-d_%-m_%Y")
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// File format for saved selections: "png" or "bmp"
    #[serde(default = "default_format")]
    pub format: String,

    /// Command used to open a selection in an image editor
    #[serde(default = "default_editor_command")]
    pub editor_command: String,

    /// Close the overlay after the editor has been launched
    #[serde(default = "default_exit_after_edit")]
    pub exit_after_edit: bool,

    /// Show a desktop notification when an export finishes
    #[serde(default = "default_notify")]
    pub notify: bool,
}

impl ExportConfig {
    /// Parsed file format. Unknown names were reset during validation.
    pub fn image_format(&self) -> ImageFormat {
        ImageFormat::from_name(&self.format).unwrap_or_default()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: default_format(),
            editor_command: default_editor_command(),
            exit_after_edit: default_exit_after_edit(),
            notify: default_notify(),
        }
    }
}

/// Printing settings.
///
/// Selections larger than the page are scaled down to fit; smaller ones
/// print at their natural size.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PrintConfig {
    /// Printable page width in pixels
    #[serde(default = "default_page_width")]
    pub page_width: u32,

    /// Printable page height in pixels
    #[serde(default = "default_page_height")]
    pub page_height: u32,

    /// Command that receives PNG data on stdin
    #[serde(default = "default_print_command")]
    pub command: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            command: default_print_command(),
        }
    }
}

/// Performance tuning options.
///
/// Most users won't need to change these from their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// Number of buffers for buffering (valid range: 2 - 4)
    /// - 2 = double buffering (lower memory, potential tearing)
    /// - 3 = triple buffering (balanced, recommended)
    /// - 4 = quad buffering (highest memory, smoothest)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Enable vsync frame synchronization to prevent tearing
    #[serde(default = "default_enable_vsync")]
    pub enable_vsync: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            buffer_count: default_buffer_count(),
            enable_vsync: default_enable_vsync(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_opacity() -> f64 {
    0.35
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("gray".to_string())
}

fn default_show_tips() -> bool {
    true
}

fn default_tips_text_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_tips_font_size() -> f64 {
    16.0
}

fn default_border_enabled() -> bool {
    true
}

fn default_border_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_save_directory() -> String {
    "~/Pictures/Leer".to_string()
}

fn default_filename_template() -> String {
    "Leer_%-d_%-m_%Y".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

fn default_editor_command() -> String {
    "xdg-open".to_string()
}

fn default_exit_after_edit() -> bool {
    true
}

fn default_notify() -> bool {
    true
}

// US Letter at 96 dpi
fn default_page_width() -> u32 {
    816
}

fn default_page_height() -> u32 {
    1056
}

fn default_print_command() -> String {
    "lp".to_string()
}

fn default_buffer_count() -> u32 {
    3
}

fn default_enable_vsync() -> bool {
    true
}
