// wl_buffer release events; SlotPool reclaims released buffers on its own.
use log::trace;
use wayland_client::{Connection, Dispatch, QueueHandle, protocol::wl_buffer};

use super::super::state::WaylandState;

impl Dispatch<wl_buffer::WlBuffer, ()> for WaylandState {
    fn event(
        _state: &mut Self,
        _proxy: &wl_buffer::WlBuffer,
        event: wl_buffer::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if matches!(event, wl_buffer::Event::Release) {
            trace!("Overlay buffer released");
        }
    }
}
