//! Layer surface bookkeeping and the shared-memory buffer pool.

use anyhow::{Context, Result};
use log::info;
use smithay_client_toolkit::{
    shell::wlr_layer::LayerSurface,
    shm::{Shm, slot::SlotPool},
};

/// Overlay surface, its configured size and frame pacing.
#[derive(Default)]
pub struct SurfaceState {
    layer_surface: Option<LayerSurface>,
    pool: Option<SlotPool>,
    width: u32,
    height: u32,
    configured: bool,
    frame_callback_pending: bool,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_layer_surface(&mut self, surface: LayerSurface) {
        self.layer_surface = Some(surface);
    }

    pub fn layer_surface(&self) -> Option<&LayerSurface> {
        self.layer_surface.as_ref()
    }

    /// Records the size from a configure event.
    ///
    /// A new size invalidates the pool, which is rebuilt on the next render.
    /// Returns whether the size changed.
    pub fn apply_configure(&mut self, width: u32, height: u32) -> bool {
        if (self.width, self.height) == (width, height) {
            self.configured = true;
            return false;
        }
        self.width = width;
        self.height = height;
        self.pool = None;
        self.configured = true;
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the compositor has sent a usable size yet.
    pub fn is_configured(&self) -> bool {
        self.configured && self.width > 0 && self.height > 0
    }

    pub fn set_frame_callback_pending(&mut self, pending: bool) {
        self.frame_callback_pending = pending;
    }

    pub fn frame_callback_pending(&self) -> bool {
        self.frame_callback_pending
    }

    /// Pool sized for `buffer_count` full-surface ARGB buffers.
    pub fn ensure_pool(&mut self, shm: &Shm, buffer_count: usize) -> Result<&mut SlotPool> {
        if self.pool.is_none() {
            let pool_size = self.width as usize * self.height as usize * 4 * buffer_count;
            info!(
                "Creating SlotPool for {}x{} ({} buffers, {} bytes)",
                self.width, self.height, buffer_count, pool_size
            );
            self.pool = Some(SlotPool::new(pool_size, shm).context("Failed to create slot pool")?);
        }

        self.pool
            .as_mut()
            .context("Buffer pool missing after creation")
    }
}
