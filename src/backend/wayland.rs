// Wayland backend: a fullscreen wlr-layer-shell overlay showing the frozen
// snapshot, with pointer and keyboard input routed into `InputState`.
mod backend;
mod export;
mod handlers;
mod outputs;
mod state;
mod surface;

pub use backend::WaylandBackend;
