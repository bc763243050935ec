//! Software renderer for the first-person view
//!
//! Features:
//! - Per-column ray marching against the tile grid
//! - Linear distance shading, flat ceiling/floor bands
//! - Crosshair and overhead minimap overlays
//!
//! Everything draws into a CPU `Framebuffer`; uploading it to the screen is
//! left to the caller.

mod minimap;
mod raycast;
mod render;
mod types;

pub use minimap::*;
pub use raycast::*;
pub use render::*;
pub use types::*;
