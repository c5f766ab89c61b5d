//! Canvas rendering module
//!
//! Each frame is drawn back to front: atmosphere, scene, HUD. Renderers
//! only read the world.

pub mod atmosphere;
pub mod canvas;
pub mod hud;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web_canvas;

pub use atmosphere::{Atmosphere, draw_atmosphere};
pub use canvas::{Canvas2d, DrawCmd, DrawList, SpriteId, TextAlign, TextStyle};
pub use hud::draw_hud;
pub use scene::draw_scene;
#[cfg(target_arch = "wasm32")]
pub use web_canvas::{SpriteSheet, WebCanvas};

use crate::settings::Settings;
use crate::sim::state::World;

/// Draw one complete frame
pub fn render_frame(canvas: &mut dyn Canvas2d, world: &World, high_score: u64, settings: &Settings) {
    draw_atmosphere(canvas, world);
    draw_scene(canvas, world, settings);
    draw_hud(canvas, world, high_score, settings);
}
