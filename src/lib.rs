//! Leer Copy: a region-selection screen capture overlay for Wayland.
//!
//! The screen is captured once into a frozen snapshot; the user drags out a
//! rectangle over it and exports the crop to the clipboard, a file, the
//! printer or an editor.
//!
//! - [`geometry`]: pure rectangle math (quadrants, normalization, nudging)
//! - [`input`]: the selection state machine
//! - [`draw`]: frame planning and cairo painting
//! - [`capture`] / [`export`]: snapshot in, crops out
//! - [`backend`]: the Wayland layer-shell overlay tying it together

pub mod backend;
pub mod capture;
pub mod config;
pub mod draw;
pub mod export;
pub mod geometry;
pub mod input;
pub mod notification;
pub mod ui;

pub use config::Config;
