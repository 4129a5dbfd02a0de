// Enumerates outputs before the overlay exists, so the snapshot and the layer
// surface are bound to the same screen.
use anyhow::{Context, Result};
use log::{debug, info};
use smithay_client_toolkit::{
    delegate_output, delegate_registry,
    output::{OutputHandler, OutputInfo, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
};
use wayland_client::{
    Connection, EventQueue, QueueHandle, globals::registry_queue_init, protocol::wl_output,
};

use crate::{
    capture::{ScreenTarget, focus},
    geometry::Rect,
};

/// Minimal registry state used only to learn output names and geometry.
pub(super) struct OutputProbe {
    registry_state: RegistryState,
    output_state: OutputState,
}

impl OutputHandler for OutputProbe {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}

    fn update_output(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {}

    fn output_destroyed(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_output::WlOutput) {
    }
}

impl ProvidesRegistryState for OutputProbe {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState];
}

delegate_output!(OutputProbe);
delegate_registry!(OutputProbe);

/// The screen the session runs on.
pub(super) struct SelectedOutput {
    pub(super) output: wl_output::WlOutput,
    pub(super) target: ScreenTarget,
    // The output proxy belongs to this queue
    _queue: EventQueue<OutputProbe>,
}

/// Picks the focused output, or the first advertised one.
///
/// Returns `None` when the compositor advertises no outputs.
pub(super) fn select_output(conn: &Connection) -> Result<Option<SelectedOutput>> {
    let (globals, mut queue) =
        registry_queue_init::<OutputProbe>(conn).context("Failed to enumerate outputs")?;
    let qh = queue.handle();
    let mut probe = OutputProbe {
        registry_state: RegistryState::new(&globals),
        output_state: OutputState::new(&globals, &qh),
    };

    // First roundtrip binds the outputs, the second delivers their info
    queue.roundtrip(&mut probe).context("Output roundtrip failed")?;
    queue.roundtrip(&mut probe).context("Output roundtrip failed")?;

    let mut outputs: Vec<(wl_output::WlOutput, OutputInfo)> = probe
        .output_state
        .outputs()
        .filter_map(|output| {
            let info = probe.output_state.info(&output)?;
            Some((output, info))
        })
        .collect();

    let names: Vec<Option<String>> = outputs.iter().map(|(_, info)| info.name.clone()).collect();
    let regions: Vec<Rect> = outputs.iter().map(|(_, info)| region_of(info)).collect();
    debug!("Outputs: {:?} at {:?}", names, regions);

    let focused = focus::focused_output_name();
    let Some(index) = choose_output(&names, focused.as_deref()) else {
        return Ok(None);
    };
    let Some(layout) = layout_bounds(&regions) else {
        return Ok(None);
    };

    let (output, _) = outputs.swap_remove(index);
    let target = ScreenTarget {
        name: names[index].clone(),
        region: regions[index],
        layout,
    };
    info!("Using output {:?} at {:?}", target.name, target.region);

    Ok(Some(SelectedOutput {
        output,
        target,
        _queue: queue,
    }))
}

fn region_of(info: &OutputInfo) -> Rect {
    let current_mode = info.modes.iter().find(|mode| mode.current).map(|mode| mode.dimensions);
    logical_region(
        info.logical_position.unwrap_or(info.location),
        info.logical_size,
        current_mode,
        info.scale_factor,
    )
}

/// Logical rectangle of an output, derived from its mode when the compositor
/// lacks xdg-output.
fn logical_region(
    position: (i32, i32),
    logical_size: Option<(i32, i32)>,
    mode: Option<(i32, i32)>,
    scale: i32,
) -> Rect {
    let scale = scale.max(1);
    let (width, height) = logical_size
        .or_else(|| mode.map(|(w, h)| (w / scale, h / scale)))
        .unwrap_or((0, 0));
    Rect::new(position.0, position.1, width, height)
}

/// Index of the output named `focused`, else the first output.
fn choose_output(names: &[Option<String>], focused: Option<&str>) -> Option<usize> {
    if names.is_empty() {
        return None;
    }
    let matched = focused.and_then(|focused| {
        names
            .iter()
            .position(|name| name.as_deref() == Some(focused))
    });
    Some(matched.unwrap_or(0))
}

/// Bounding box of all output regions.
fn layout_bounds(regions: &[Rect]) -> Option<Rect> {
    let left = regions.iter().map(|r| r.x).min()?;
    let top = regions.iter().map(|r| r.y).min()?;
    let right = regions.iter().map(|r| r.x + r.width).max()?;
    let bottom = regions.iter().map(|r| r.y + r.height).max()?;
    Some(Rect::new(left, top, right - left, bottom - top))
}
