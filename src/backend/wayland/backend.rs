// Coordinates startup and shutdown and drives the event loop while delegating
// rendering & protocol state to `WaylandState` and its handler modules.
use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell},
    },
    shm::Shm,
};
use std::path::PathBuf;
use wayland_client::{Connection, globals::registry_queue_init};

use super::{outputs, state::WaylandState};
use crate::{
    capture::{self, CaptureImage, ScreenTarget},
    config::Config,
    draw::BorderSpec,
    export::{ExportKind, ExportManager, ExportOutcome},
    input::InputState,
    notification,
};

const MAX_RENDER_FAILURES: u32 = 10;

/// Wayland backend state
pub struct WaylandBackend {
    snapshot_file: Option<PathBuf>,
    /// Tokio runtime for snapshot capture, exports and notifications
    tokio_runtime: tokio::runtime::Runtime,
}

impl WaylandBackend {
    pub fn new(snapshot_file: Option<PathBuf>) -> Result<Self> {
        let tokio_runtime = tokio::runtime::Runtime::new()
            .context("Failed to create Tokio runtime for capture and export")?;
        Ok(Self {
            snapshot_file,
            tokio_runtime,
        })
    }

    /// Takes the session snapshot of `target` before anything is shown.
    fn acquire_snapshot(&self, target: Option<&ScreenTarget>) -> Result<CaptureImage> {
        let (snapshot, source) = match &self.snapshot_file {
            Some(path) => capture::load_snapshot(path)
                .with_context(|| format!("Failed to load snapshot from {}", path.display()))?,
            None => self
                .tokio_runtime
                .block_on(capture::capture_screen(target))
                .context("Failed to capture the screen")?,
        };
        info!(
            "Snapshot ready: {}x{} from {}",
            snapshot.width(),
            snapshot.height(),
            source
        );
        Ok(snapshot)
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");

        // A config that failed to load is never written back over
        let (config, persist_preferences) = match Config::load() {
            Ok(config) => (config, true),
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                (Config::default(), false)
            }
        };
        info!("Configuration loaded");
        debug!("  Opacity: {:.2}", config.overlay.opacity);
        debug!("  Border: {} ({:?})", config.border.enabled, config.border.color);
        debug!("  Save directory: {}", config.export.save_directory);
        debug!("  Buffer count: {}", config.performance.buffer_count);
        debug!("  VSync: {}", config.performance.enable_vsync);

        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|e| anyhow::anyhow!("Invalid keybindings: {}", e))?;

        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        let selected = outputs::select_output(&conn)?;
        if selected.is_none() {
            warn!("No outputs advertised; the compositor will place the overlay");
        }

        // Must happen before the overlay maps, or the overlay would capture itself
        let snapshot = self.acquire_snapshot(selected.as_ref().map(|s| &s.target))?;

        let (globals, mut event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        let output_state = OutputState::new(&globals, &qh);
        let seat_state = SeatState::new(&globals, &qh);
        let registry_state = RegistryState::new(&globals);
        debug!("Bound compositor, layer shell, shm, output and seat globals");

        let border = BorderSpec::new(config.border.enabled, config.border.color.to_color());
        let mut input_state =
            InputState::with_defaults(border, config.overlay.show_tips, action_map);
        input_state.update_screen_dimensions(snapshot.width(), snapshot.height());

        let export_manager = ExportManager::new(self.tokio_runtime.handle());
        info!("Export manager initialized");

        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            config,
            input_state,
            snapshot,
            export_manager,
            self.tokio_runtime.handle().clone(),
        )?;

        info!("Creating layer shell surface");
        let wl_surface = state.compositor_state.create_surface(&qh);
        let layer_surface = state.layer_shell.create_layer_surface(
            &qh,
            wl_surface,
            Layer::Overlay,
            Some("leercopy"),
            selected.as_ref().map(|s| &s.output),
        );
        layer_surface.set_anchor(Anchor::all());
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
        layer_surface.set_size(0, 0);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.commit();
        state.surface.set_layer_surface(layer_surface);

        let mut consecutive_render_failures = 0u32;
        let mut loop_error: Option<anyhow::Error> = None;

        loop {
            if state.input_state.should_exit {
                info!("Exit requested, breaking event loop");
                break;
            }

            if let Err(e) = event_queue.blocking_dispatch(&mut state) {
                warn!("Event queue error: {}", e);
                loop_error = Some(anyhow::anyhow!("Wayland event queue error: {}", e));
                break;
            }

            if let Some(outcome) = state.export.poll() {
                handle_export_outcome(&mut state, outcome);
            }

            if state.input_state.should_exit {
                info!("Exit requested after dispatch, breaking event loop");
                break;
            }

            // Throttle to the display refresh rate when vsync is on
            let can_render = state.surface.is_configured()
                && state.input_state.needs_redraw
                && (!state.surface.frame_callback_pending()
                    || !state.config.performance.enable_vsync);

            if !can_render {
                continue;
            }

            match state.render(&qh) {
                Ok(()) => {
                    consecutive_render_failures = 0;
                    state.input_state.needs_redraw = false;
                    if state.config.performance.enable_vsync {
                        state.surface.set_frame_callback_pending(true);
                    }
                }
                Err(e) => {
                    consecutive_render_failures += 1;
                    warn!(
                        "Rendering error (attempt {}/{}): {}",
                        consecutive_render_failures, MAX_RENDER_FAILURES, e
                    );

                    if consecutive_render_failures >= MAX_RENDER_FAILURES {
                        return Err(anyhow::anyhow!(
                            "Too many consecutive render failures ({}), exiting: {}",
                            consecutive_render_failures,
                            e
                        ));
                    }

                    // Avoid spinning on a frame that keeps failing
                    state.input_state.needs_redraw = false;
                }
            }
        }

        if persist_preferences {
            save_preferences(&mut state);
        }

        info!("Wayland backend exiting");

        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Writes the session's border and tips toggles back to the config file.
fn save_preferences(state: &mut WaylandState) {
    let border_enabled = state.input_state.border.enabled;
    let show_tips = state.input_state.show_tips;
    if !state.config.remember_toggles(border_enabled, show_tips) {
        return;
    }

    if let Err(e) = state.config.save() {
        warn!("Failed to save preferences: {}", e);
    }
}

fn handle_export_outcome(state: &mut WaylandState, outcome: ExportOutcome) {
    match &outcome {
        ExportOutcome::Success(result) => {
            info!("Export to {} finished ({:?})", result.kind, result.path);
            if result.kind == ExportKind::Editor && state.config.export.exit_after_edit {
                info!("Editor launched, closing overlay");
                state.input_state.should_exit = true;
            }
        }
        ExportOutcome::Failed { kind, message } => {
            warn!("Export to {} failed: {}", kind, message);
        }
    }

    if state.config.export.notify {
        notification::notify_outcome(&state.tokio_handle, &outcome);
    }
}
