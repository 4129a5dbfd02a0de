//! Overlay drawing (Cairo-based).
//!
//! - [`Color`]: RGBA color representation with named constants
//! - [`frame`]: pure planning of overlay frames into [`DrawOp`]s
//! - [`render`]: the cairo painter that executes a plan against the snapshot

pub mod color;
pub mod frame;
pub mod render;

pub use color::Color;
pub use frame::{BorderSpec, ClearRequest, DrawOp, OverlayScene, plan_overlay, plan_view};
pub use render::{image_to_surface, paint_ops};
