//! Player, entities and particles

use super::canvas::{Canvas2d, SpriteId};
use crate::settings::Settings;
use crate::sim::collision::Rect;
use crate::sim::state::{DINO_COLOR, RunPhase, World};

/// Length of one blink window while invincible (frames)
const BLINK_FRAMES: u64 = 6;

/// Frames each run-cycle image is held; faster runs animate faster
pub fn run_frame_period(speed: f32) -> u64 {
    (12.0 - (speed / 1.5).floor()).max(5.0) as u64
}

/// Which player image to show this frame
pub fn player_sprite(world: &World) -> SpriteId {
    if !world.player.is_grounded(world.ground_y()) {
        return SpriteId::PlayerJump;
    }
    if world.phase != RunPhase::Playing {
        return SpriteId::PlayerIdle;
    }
    if (world.frame / run_frame_period(world.speed)) % 2 == 0 {
        SpriteId::PlayerRun1
    } else {
        SpriteId::PlayerRun2
    }
}

/// Invincible players skip every other blink window
pub fn player_visible(world: &World, settings: &Settings) -> bool {
    !world.timers.is_invincible()
        || !settings.effective_blink()
        || (world.frame / BLINK_FRAMES) % 2 == 0
}

pub fn draw_scene(canvas: &mut dyn Canvas2d, world: &World, settings: &Settings) {
    if player_visible(world, settings) {
        let sprite = player_sprite(world);
        if canvas.sprite_ready(sprite) {
            canvas.draw_sprite(sprite, world.player.rect);
        } else {
            canvas.fill_rect(world.player.rect, DINO_COLOR);
        }
    }

    for entity in &world.entities {
        canvas.fill_rect(entity.rect, entity.color);
    }

    if world.particles.is_empty() {
        return;
    }
    for p in world.particles.iter() {
        canvas.set_alpha(p.opacity());
        canvas.fill_rect(Rect::new(p.pos.x, p.pos.y, p.size, p.size), p.color);
    }
    canvas.set_alpha(1.0);
}
