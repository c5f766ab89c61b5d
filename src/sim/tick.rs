//! Fixed tick simulation step
//!
//! One call advances the world by one display refresh:
//! jump intent → clock → spawner → physics/collisions → particles.

use glam::Vec2;

use super::clock::advance_clock;
use super::collision::{Rect, check_collision};
use super::particles;
use super::spawner::run_spawner;
use super::state::{Entity, EntityKind, GameEvent, RunPhase, World};
use crate::consts::*;

/// Half-height of the fireball's vertical bounce around its spawn height
pub const FIREBALL_RANGE: f32 = 60.0;
/// A shooter fires once the player is closer than this...
pub const SHOOTER_FAR: f32 = 300.0;
/// ...but still farther than this
pub const SHOOTER_NEAR: f32 = 100.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space / up / click / tap)
    pub jump: bool,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) {
    match world.phase {
        // Everything freezes, particles included
        RunPhase::Paused => return,
        RunPhase::Playing => {
            if input.jump {
                try_jump(world);
            }
            advance_clock(world);
            run_spawner(world);
            step_physics(world);
        }
        RunPhase::Start | RunPhase::GameOver => {}
    }

    world.particles.update();
}

/// Apply a jump if the player is close enough to the ground
pub fn try_jump(world: &mut World) -> bool {
    if world.phase != RunPhase::Playing {
        return false;
    }
    let ground_y = world.ground_y();
    if !world.player.is_grounded(ground_y) {
        return false;
    }

    let boosted = world.timers.is_boosted();
    world.player.vel.y = if boosted {
        world.tuning.jump_force_boosted
    } else {
        world.tuning.jump_force
    };

    let rect = world.player.rect;
    let feet = Vec2::new(rect.x + rect.w / 2.0, rect.bottom());
    world
        .particles
        .emit(&mut world.rng, particles::jump_dust(feet, boosted));
    world.events.push(GameEvent::Jumped { boosted });
    true
}

/// Player physics, entity kinetics, collisions, then purge
pub fn step_physics(world: &mut World) {
    update_player(world);
    update_entities(world);
}

fn update_player(world: &mut World) {
    let scale = if world.timers.is_giant() { GIANT_SCALE } else { 1.0 };
    let ground_y = world.ground_y();
    let gravity = world.tuning.gravity;
    let player = &mut world.player;

    player.rect.w = DINO_WIDTH * scale;
    player.rect.h = DINO_HEIGHT * scale;

    player.vel.y += gravity;
    player.rect.y += player.vel.y;

    if player.rect.bottom() > ground_y {
        player.rect.y = ground_y - player.rect.h;
        player.vel.y = 0.0;
    }
}

fn update_entities(world: &mut World) {
    let ground_y = world.ground_y();
    let mut entities = std::mem::take(&mut world.entities);
    // Projectiles launched this tick join the list after the pass
    let mut launched = Vec::new();

    for entity in entities.iter_mut() {
        entity.rect.translate(entity.vel);
        if let EntityKind::Fireball { base_y } = entity.kind {
            if entity.rect.y > base_y + FIREBALL_RANGE {
                entity.rect.y = base_y + FIREBALL_RANGE;
                entity.vel.y = -entity.vel.y.abs();
            } else if entity.rect.y < base_y - FIREBALL_RANGE {
                entity.rect.y = base_y - FIREBALL_RANGE;
                entity.vel.y = entity.vel.y.abs();
            }
        }
        let center = entity.rect.center();

        match entity.kind {
            EntityKind::Fireball { .. } => {
                if world.roll() > 0.3 {
                    world
                        .particles
                        .emit(&mut world.rng, particles::fireball_trail(center));
                }
            }
            EntityKind::Meteor => {
                world
                    .particles
                    .emit(&mut world.rng, particles::meteor_trail(center));
                if entity.rect.bottom() > ground_y {
                    entity.marked_for_deletion = true;
                    let impact = Vec2::new(center.x, ground_y);
                    world
                        .particles
                        .emit(&mut world.rng, particles::meteor_impact(impact, entity.color));
                }
            }
            EntityKind::BoostStar => {
                if world.roll() > 0.5 {
                    let speed = world.speed;
                    world
                        .particles
                        .emit(&mut world.rng, particles::star_sparkle(center, speed));
                }
            }
            EntityKind::StormCloud => {
                if world.roll() > 0.8 {
                    let underside = Vec2::new(center.x, entity.rect.bottom() - 5.0);
                    world.particles.emit(
                        &mut world.rng,
                        particles::cloud_drip(underside, entity.rect.w / 2.0),
                    );
                }
            }
            EntityKind::Shooter { fired: false } => {
                let dist = entity.rect.x - world.player.rect.x;
                if dist < SHOOTER_FAR && dist > SHOOTER_NEAR {
                    entity.kind = EntityKind::Shooter { fired: true };
                    let id = world.next_entity_id();
                    let spike = Entity::new(
                        id,
                        EntityKind::Spike,
                        Rect::new(entity.rect.x + entity.rect.w / 2.0 - 5.0, entity.rect.y, 10.0, 20.0),
                        Vec2::new(-world.speed, -7.0),
                    );
                    log::debug!("Shooter {} fired spike {}", entity.id, id);
                    launched.push(spike);
                }
            }
            _ => {}
        }

        if entity.rect.right() < -OFFSCREEN_MARGIN || entity.rect.y > world.height + OFFSCREEN_MARGIN
        {
            entity.marked_for_deletion = true;
        }

        // Entities flagged earlier this tick still collide; they go at the purge
        if world.phase == RunPhase::Playing
            && check_collision(&world.player.rect, &entity.rect)
        {
            resolve_collision(world, entity);
        }
    }

    entities.extend(launched);
    entities.retain(|e| !e.marked_for_deletion);
    world.entities = entities;
}

/// Apply the effect of the player touching `entity`
fn resolve_collision(world: &mut World, entity: &mut Entity) {
    let player_center = world.player.rect.center();

    match entity.kind {
        EntityKind::HealthPill => {
            world.lives = world.lives.saturating_add(1).min(world.tuning.max_lives);
            entity.marked_for_deletion = true;
            world
                .particles
                .emit(&mut world.rng, particles::heal(player_center));
            world.events.push(GameEvent::PickedUp { kind: entity.kind });
        }
        EntityKind::BoostStar => {
            world.timers.jump_boost = world.timers.jump_boost.saturating_add(world.tuning.boost_ticks);
            entity.marked_for_deletion = true;
            world
                .particles
                .emit(&mut world.rng, particles::boost_pickup(player_center));
            world.events.push(GameEvent::PickedUp { kind: entity.kind });
        }
        EntityKind::GiantMushroom => {
            world.timers.giant = world.timers.giant.saturating_add(world.tuning.giant_ticks);
            entity.marked_for_deletion = true;
            world
                .particles
                .emit(&mut world.rng, particles::giant_pickup(player_center));
            world.events.push(GameEvent::PickedUp { kind: entity.kind });
        }
        _ => {
            if world.timers.is_giant() {
                entity.marked_for_deletion = true;
                world.score += world.tuning.smash_bonus;
                world
                    .particles
                    .emit(&mut world.rng, particles::smash(entity.rect.center(), entity.color));
                world.events.push(GameEvent::Smashed { kind: entity.kind });
            } else if !world.timers.is_invincible() {
                world.lives = world.lives.saturating_sub(1);
                world.events.push(GameEvent::LifeLost {
                    remaining: world.lives,
                });

                if world.lives == 0 {
                    let score = world.floored_score();
                    world.phase = RunPhase::GameOver;
                    world.events.push(GameEvent::GameOver { score });
                    log::info!("Run over: {} hit the player, score {}", entity.kind.name(), score);
                } else {
                    world.timers.invincibility = world.tuning.invincibility_ticks;
                    entity.marked_for_deletion = true;
                    world
                        .particles
                        .emit(&mut world.rng, particles::hit(player_center));
                }
            }
            // Invincible: ignore the hit entirely, the hazard stays
        }
    }
}
