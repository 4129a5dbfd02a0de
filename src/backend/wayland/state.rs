// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; provides rendering and export routing used across them.
use anyhow::{Context, Result};
use log::debug;
use smithay_client_toolkit::{
    compositor::CompositorState, output::OutputState, registry::RegistryState, seat::SeatState,
    shell::{WaylandSurface, wlr_layer::LayerShell}, shm::Shm,
};
use wayland_client::{QueueHandle, protocol::wl_shm};

use crate::{
    capture::CaptureImage,
    config::{Action, Config},
    draw::{Color, OverlayScene, image_to_surface, paint_ops, plan_overlay, plan_view},
    export::{ExportKind, ExportManager, ExportSettings},
    input::InputState,
};

use super::{export::ExportState, surface::SurfaceState};

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    pub(super) surface: SurfaceState,
    pub(super) config: Config,
    pub(super) input_state: InputState,

    /// Frozen screen contents; source of every blit and every crop
    snapshot: CaptureImage,
    snapshot_surface: cairo::ImageSurface,
    tint: Color,
    tips_color: Color,
    tip_lines: Vec<String>,

    pub(super) export: ExportState,
    export_settings: ExportSettings,

    // Tokio runtime handle for async operations
    pub(super) tokio_handle: tokio::runtime::Handle,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        config: Config,
        input_state: InputState,
        snapshot: CaptureImage,
        export_manager: ExportManager,
        tokio_handle: tokio::runtime::Handle,
    ) -> Result<Self> {
        let snapshot_surface = image_to_surface(snapshot.pixels())
            .context("Failed to upload snapshot to cairo")?;
        let tint = config
            .overlay
            .background_color
            .to_color()
            .with_alpha(config.overlay.opacity);
        let tips_color = config.overlay.tips_text_color.to_color();
        let tip_lines = crate::ui::tip_lines(&config.keybindings);
        let export_settings = ExportSettings::from_config(&config);

        Ok(Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            config,
            input_state,
            snapshot,
            snapshot_surface,
            tint,
            tips_color,
            tip_lines,
            export: ExportState::new(export_manager),
            export_settings,
            tokio_handle,
        })
    }

    /// Maps surface-local coordinates to snapshot pixels.
    ///
    /// The layer surface is sized in logical pixels while the snapshot is in
    /// buffer pixels, so scaled outputs need the conversion.
    pub(super) fn to_snapshot_coords(&self, x: f64, y: f64) -> (i32, i32) {
        let (sx, sy) = self.snapshot_scale();
        ((x * sx).round() as i32, (y * sy).round() as i32)
    }

    fn snapshot_scale(&self) -> (f64, f64) {
        let width = self.surface.width();
        let height = self.surface.height();
        if width == 0 || height == 0 {
            return (1.0, 1.0);
        }
        (
            self.snapshot.width() as f64 / width as f64,
            self.snapshot.height() as f64 / height as f64,
        )
    }

    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        debug!("=== RENDER START ===");
        let buffer_count = self.config.performance.buffer_count as usize;
        let width = self.surface.width();
        let height = self.surface.height();

        let (buffer, canvas) = {
            let pool = self.surface.ensure_pool(&self.shm, buffer_count)?;
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: `canvas` is a mutable slice from the SlotPool holding exactly
        // width * height * 4 bytes in ARGB8888 with stride width * 4. The cairo
        // surface and context are dropped before the buffer is attached, so
        // cairo never touches the memory after ownership passes to the compositor.
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;

        let (sx, sy) = self.snapshot_scale();
        // Everything below is drawn in snapshot pixels
        ctx.scale(1.0 / sx, 1.0 / sy);

        let ops = match self.viewed_selection() {
            Some(rect) => plan_view(self.snapshot.width(), self.snapshot.height(), rect),
            None => {
                let scene = OverlayScene {
                    width: self.snapshot.width(),
                    height: self.snapshot.height(),
                    tint: self.tint,
                    selection: self.input_state.visible_selection(),
                    border: self.input_state.border,
                };
                plan_overlay(&scene, self.input_state.take_clear_request())
            }
        };
        debug!("Painting {} draw ops", ops.len());
        paint_ops(&ctx, &self.snapshot_surface, &ops).context("Failed to paint overlay")?;

        if self.input_state.show_tips && !self.input_state.viewing {
            crate::ui::render_tips(
                &ctx,
                &self.tip_lines,
                self.tips_color,
                self.config.overlay.tips_font_size,
                self.snapshot.width(),
            );
        }

        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(
            0,
            0,
            width.min(i32::MAX as u32) as i32,
            height.min(i32::MAX as u32) as i32,
        );

        if self.config.performance.enable_vsync {
            wl_surface.frame(qh, wl_surface.clone());
        }

        wl_surface.commit();
        debug!("=== RENDER COMPLETE ===");

        Ok(())
    }

    fn viewed_selection(&self) -> Option<crate::geometry::Rect> {
        if !self.input_state.viewing {
            return None;
        }
        self.input_state.selection_rect()
    }

    /// Crops the drawn selection and hands it to the ExportManager.
    pub(super) fn handle_export_action(&mut self, action: Action) {
        let Some(kind) = ExportKind::from_action(action) else {
            log::error!("Non-export action passed to handle_export_action: {:?}", action);
            return;
        };

        if self.export.is_in_progress() {
            log::warn!(
                "Export to {} requested while another export is running; ignoring",
                kind
            );
            return;
        }

        let Some(rect) = self.input_state.selection_rect() else {
            debug!("No exportable selection for {}", kind);
            return;
        };

        let Some(image) = self.snapshot.crop(rect) else {
            log::warn!("Selection {:?} lies outside the snapshot; nothing exported", rect);
            return;
        };

        log::info!(
            "Requesting export to {} of {}x{} at ({}, {})",
            kind,
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );
        match self
            .export
            .manager()
            .request_export(kind, image, self.export_settings.clone())
        {
            Ok(()) => self.export.mark_in_progress(),
            Err(e) => log::error!("Failed to request export: {}", e),
        }
    }
}
