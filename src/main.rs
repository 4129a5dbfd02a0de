use clap::{ArgAction, Parser};
use leercopy::{Config, backend};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "leercopy")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEERCOPY_GIT_HASH"), ")"),
    about = "Screen region capture overlay for Wayland compositors"
)]
struct Cli {
    /// Select from an image file instead of capturing the screen
    #[arg(long, value_name = "IMAGE")]
    from: Option<PathBuf>,

    /// Write a documented default config to ~/.config/leercopy/config.toml and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor with wlr-layer-shell (Hyprland, Sway, etc.).");
        return Err(anyhow::anyhow!("WAYLAND_DISPLAY not set"));
    }

    log::info!("Starting selection overlay...");
    log::info!("  - Drag with the left button to select a region");
    log::info!("  - Arrow keys resize it (Shift: x3, Ctrl: shrink)");
    log::info!("  - C copy, S save, P print, E edit, V view, Q/Escape quit");

    backend::run_wayland(cli.from)?;

    log::info!("Selection overlay closed.");
    Ok(())
}
