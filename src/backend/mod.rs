use anyhow::Result;
use std::path::PathBuf;

pub mod wayland;

/// Run the selection overlay until the user exits.
///
/// # Arguments
/// * `snapshot_file` - Image to select from instead of capturing the screen
pub fn run_wayland(snapshot_file: Option<PathBuf>) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(snapshot_file)?;
    backend.run()
}
