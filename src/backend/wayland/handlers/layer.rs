// Responds to layer-shell configure/close events, keeping the buffer size in sync with the compositor.
use log::info;
use smithay_client_toolkit::shell::wlr_layer::{
    LayerShellHandler, LayerSurface, LayerSurfaceConfigure,
};
use wayland_client::{Connection, QueueHandle};

use super::super::state::WaylandState;

impl LayerShellHandler for WaylandState {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        info!("Layer surface closed by compositor");
        self.input_state.should_exit = true;
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        let (width, height) = configure.new_size;
        info!("Layer surface configured: {}x{}", width, height);

        // Selection coordinates stay in snapshot pixels; only the buffer follows the surface
        if self.surface.apply_configure(width, height) {
            info!("Surface size changed, buffer pool will be rebuilt");
        }
        self.input_state.needs_redraw = true;
    }
}
