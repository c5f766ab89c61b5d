//! Obstacle and pickup spawner
//!
//! One uniform roll per spawn is tested against ordered probability bands.
//! Several bands overlap, so the order of the checks is part of the
//! balance: a roll that misses an earlier band only because of its gate
//! (night, score, lives) falls through to the later ones.

use glam::Vec2;

use super::collision::Rect;
use super::state::{Entity, EntityKind, GameEvent, World};
use crate::consts::SPAWN_JITTER;
use crate::tuning::Tuning;

/// Score needed before fireballs appear
pub const FIREBALL_MIN_SCORE: f64 = 15.0;
/// Score needed before meteors appear
pub const METEOR_MIN_SCORE: f64 = 10.0;
/// Score needed before shooters appear
pub const SHOOTER_MIN_SCORE: f64 = 20.0;

/// Which entity a roll selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnChoice {
    HealthPill,
    GiantMushroom,
    BoostStar,
    StormCloud,
    Fireball,
    Meteor,
    Shooter,
    Cactus,
}

/// Gates consulted by the bands
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    pub night: bool,
    pub day: bool,
    pub score: f64,
    pub lives: u8,
    pub max_lives: u8,
}

impl SpawnContext {
    pub fn of(world: &World) -> Self {
        Self {
            night: world.is_night(),
            day: world.is_day(),
            score: world.score,
            lives: world.lives,
            max_lives: world.tuning.max_lives,
        }
    }
}

/// Map a roll in `[0, 1)` to a spawn choice. First matching band wins.
pub fn choose_spawn(roll: f32, ctx: &SpawnContext) -> SpawnChoice {
    if roll < 0.05 && ctx.lives < ctx.max_lives {
        SpawnChoice::HealthPill
    } else if roll > 0.95 {
        SpawnChoice::GiantMushroom
    } else if ctx.night && roll > 0.85 && roll < 0.95 {
        SpawnChoice::BoostStar
    } else if ctx.night && roll > 0.75 && roll < 0.85 {
        SpawnChoice::StormCloud
    } else if ctx.day && roll > 0.70 && roll < 0.80 && ctx.score > FIREBALL_MIN_SCORE {
        SpawnChoice::Fireball
    } else if roll < 0.25 && ctx.score > METEOR_MIN_SCORE {
        SpawnChoice::Meteor
    } else if roll < 0.45 && ctx.score > SHOOTER_MIN_SCORE {
        SpawnChoice::Shooter
    } else {
        SpawnChoice::Cactus
    }
}

/// Ticks until the next spawn, before jitter. Shrinks as speed rises but
/// never below `spawn_rate_min`.
pub fn spawn_gap(speed: f32, tuning: &Tuning) -> f32 {
    let difficulty = speed / tuning.base_speed;
    (tuning.spawn_rate_initial / difficulty).max(tuning.spawn_rate_min)
}

/// Spawn one entity if the schedule says so
pub fn run_spawner(world: &mut World) {
    if (world.frame as f32) <= world.next_spawn_frame {
        return;
    }

    let roll = world.roll();
    let choice = choose_spawn(roll, &SpawnContext::of(world));
    let entity = build_entity(world, choice);
    log::debug!(
        "Spawned {} at frame {} (roll {:.3})",
        entity.kind.name(),
        world.frame,
        roll
    );
    world.events.push(GameEvent::Spawned { kind: entity.kind });
    world.entities.push(entity);

    let gap = spawn_gap(world.speed, &world.tuning) + world.random_between(0.0, SPAWN_JITTER);
    world.next_spawn_frame = world.frame as f32 + gap;
}

/// Position, size and velocity for a freshly spawned entity
fn build_entity(world: &mut World, choice: SpawnChoice) -> Entity {
    let ground_y = world.ground_y();
    let right = world.width;
    let speed = world.speed;

    let (kind, rect, vel) = match choice {
        SpawnChoice::HealthPill => (
            EntityKind::HealthPill,
            Rect::new(right, ground_y - 30.0, 30.0, 30.0),
            Vec2::new(-speed, 0.0),
        ),
        SpawnChoice::GiantMushroom => (
            EntityKind::GiantMushroom,
            Rect::new(right, ground_y - 30.0, 30.0, 30.0),
            Vec2::new(-speed, 0.0),
        ),
        SpawnChoice::BoostStar => {
            let y = world.random_between(ground_y - 120.0, ground_y - 60.0);
            (
                EntityKind::BoostStar,
                Rect::new(right, y, 40.0, 40.0),
                Vec2::new(-speed * 1.2, 0.0),
            )
        }
        // Bottom sits above a standing player's head, so only jumps hit it
        SpawnChoice::StormCloud => (
            EntityKind::StormCloud,
            Rect::new(right, ground_y - 90.0, 60.0, 30.0),
            Vec2::new(-speed, 0.0),
        ),
        SpawnChoice::Fireball => {
            let base_y = ground_y - 100.0;
            (
                EntityKind::Fireball { base_y },
                Rect::new(right, base_y, 40.0, 40.0),
                Vec2::new(-speed, 3.0),
            )
        }
        SpawnChoice::Meteor => {
            let y = world.random_between(50.0, world.height / 2.0);
            (
                EntityKind::Meteor,
                Rect::new(right + 50.0, y, 40.0, 40.0),
                Vec2::new(-speed * 1.3, speed * 0.4),
            )
        }
        SpawnChoice::Shooter => (
            EntityKind::Shooter { fired: false },
            Rect::new(right, ground_y - 60.0, 30.0, 60.0),
            Vec2::new(-speed, 0.0),
        ),
        SpawnChoice::Cactus => {
            let large = world.roll() > 0.5;
            let (w, h) = if large { (35.0, 70.0) } else { (25.0, 50.0) };
            (
                EntityKind::Cactus { large },
                Rect::new(right, ground_y - h, w, h),
                Vec2::new(-speed, 0.0),
            )
        }
    };

    let id = world.next_entity_id();
    Entity::new(id, kind, rect, vel)
}
