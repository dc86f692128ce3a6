//! Rendering: image observations for agents and a terminal dashboard for
//! manual driving

pub mod dashboard;
pub mod raster;

pub use dashboard::{Dashboard, DashboardView};
pub use raster::{RasterRenderer, Renderer, RgbImage};
