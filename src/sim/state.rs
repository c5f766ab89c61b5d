//! Run state and core simulation types
//!
//! Everything a run mutates lives in [`World`], which the orchestrator owns
//! and passes by `&mut` into each step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::particles::ParticleSystem;
use crate::color::Color;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Waiting for the first start/jump
    Start,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Lives ran out; only an explicit restart leaves this phase
    GameOver,
}

/// What an entity is, with the data only that kind needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Ground hazard, two sizes
    Cactus { large: bool },
    /// Ground hazard that launches one spike when the player gets close
    Shooter { fired: bool },
    /// Projectile launched by a shooter
    Spike,
    /// Falls diagonally and bursts on the ground
    Meteor,
    /// Bounces vertically around the height it spawned at
    Fireball { base_y: f32 },
    /// Floats at head height at night
    StormCloud,
    /// Restores one life
    HealthPill,
    /// Grants jump boost
    BoostStar,
    /// Grants giant mode
    GiantMushroom,
}

impl EntityKind {
    /// Pickups help the player; everything else hurts
    pub fn is_pickup(&self) -> bool {
        matches!(
            self,
            EntityKind::HealthPill | EntityKind::BoostStar | EntityKind::GiantMushroom
        )
    }

    /// Fallback fill color when no sprite is drawn
    pub fn color(&self) -> Color {
        match self {
            EntityKind::Cactus { .. } => CACTUS_COLOR,
            EntityKind::Shooter { .. } => SHOOTER_COLOR,
            EntityKind::Spike => SPIKE_COLOR,
            EntityKind::Meteor => METEOR_COLOR,
            EntityKind::Fireball { .. } => FIREBALL_COLOR,
            EntityKind::StormCloud => CLOUD_COLOR,
            EntityKind::HealthPill => Color::hex(0x38bdf8),
            EntityKind::BoostStar => Color::hex(0x60a5fa),
            EntityKind::GiantMushroom => Color::hex(0x3b82f6),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Cactus { large: false } => "small cactus",
            EntityKind::Cactus { large: true } => "large cactus",
            EntityKind::Shooter { .. } => "shooter",
            EntityKind::Spike => "spike",
            EntityKind::Meteor => "meteor",
            EntityKind::Fireball { .. } => "fireball",
            EntityKind::StormCloud => "storm cloud",
            EntityKind::HealthPill => "health pill",
            EntityKind::BoostStar => "boost star",
            EntityKind::GiantMushroom => "giant mushroom",
        }
    }
}

pub const DINO_COLOR: Color = Color::hex(0x38bdf8);
pub const CACTUS_COLOR: Color = Color::hex(0x22c55e);
pub const SHOOTER_COLOR: Color = Color::hex(0x15803d);
pub const SPIKE_COLOR: Color = Color::hex(0xfacc15);
pub const METEOR_COLOR: Color = Color::hex(0xef4444);
pub const FIREBALL_COLOR: Color = Color::hex(0xf87171);
pub const CLOUD_COLOR: Color = Color::hex(0xa855f7);

/// A moving world object (obstacle, pickup or projectile)
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub rect: Rect,
    pub vel: Vec2,
    pub marked_for_deletion: bool,
    pub color: Color,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, rect: Rect, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            rect,
            vel,
            marked_for_deletion: false,
            color: kind.color(),
        }
    }
}

/// The player's runner. Never destroyed, only reset at run start.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Player {
    /// Standing on the ground of a world `height` pixels tall
    pub fn on_ground(height: f32) -> Self {
        Self {
            rect: Rect::new(
                DINO_X,
                height - GROUND_HEIGHT - DINO_HEIGHT,
                DINO_WIDTH,
                DINO_HEIGHT,
            ),
            vel: Vec2::ZERO,
        }
    }

    /// Within the jump buffer of the ground line
    pub fn is_grounded(&self, ground_y: f32) -> bool {
        self.rect.y >= ground_y - self.rect.h - JUMP_GROUND_BUFFER
    }
}

/// Countdown timers for timed status effects (ticks remaining)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTimers {
    /// Grace period after a hit
    pub invincibility: u32,
    /// Stronger jumps
    pub jump_boost: u32,
    /// Larger player that smashes hazards
    pub giant: u32,
}

impl StatusTimers {
    /// One tick passes; every timer floors at zero
    pub fn tick_down(&mut self) {
        self.invincibility = self.invincibility.saturating_sub(1);
        self.jump_boost = self.jump_boost.saturating_sub(1);
        self.giant = self.giant.saturating_sub(1);
    }

    #[inline]
    pub fn is_giant(&self) -> bool {
        self.giant > 0
    }

    #[inline]
    pub fn is_boosted(&self) -> bool {
        self.jump_boost > 0
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0
    }
}

/// Notable things that happened during a tick, drained by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped { boosted: bool },
    Spawned { kind: EntityKind },
    PickedUp { kind: EntityKind },
    Smashed { kind: EntityKind },
    LifeLost { remaining: u8 },
    /// Final floored score of the run
    GameOver { score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct World {
    /// Balance values this run was created with
    pub tuning: Tuning,
    /// Canvas size
    pub width: f32,
    pub height: f32,
    /// RNG (seeded once per run)
    pub rng: Pcg32,
    pub phase: RunPhase,
    /// Seconds survived plus bonuses
    pub score: f64,
    pub speed: f32,
    /// Playing ticks elapsed
    pub frame: u64,
    /// Spawner fires once `frame` passes this
    pub next_spawn_frame: f32,
    pub lives: u8,
    pub timers: StatusTimers,
    /// Position in the day/night cycle, wraps at `tuning.day_cycle.duration`
    pub day_phase: u32,
    /// Horizontal scroll of the back, middle and front layers
    pub parallax: [f32; 3],
    pub player: Player,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
    pub particles: ParticleSystem,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64, tuning: Tuning, width: f32, height: f32) -> Self {
        Self {
            lives: tuning.max_lives,
            speed: tuning.base_speed,
            tuning,
            width,
            height,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Start,
            score: 0.0,
            frame: 0,
            next_spawn_frame: 0.0,
            timers: StatusTimers::default(),
            day_phase: 0,
            parallax: [0.0; 3],
            player: Player::on_ground(height),
            entities: Vec::new(),
            particles: ParticleSystem::new(usize::MAX),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a fresh run seeded from entropy
    pub fn unseeded(tuning: Tuning, width: f32, height: f32) -> Self {
        Self::new(rand::random(), tuning, width, height)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// y of the running line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.tuning.day_cycle.is_night(self.day_phase)
    }

    #[inline]
    pub fn is_day(&self) -> bool {
        self.tuning.day_cycle.is_day(self.day_phase)
    }

    /// Score as shown and reported
    #[inline]
    pub fn floored_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Uniform value in `[min, max)`
    pub fn random_between(&mut self, min: f32, max: f32) -> f32 {
        self.rng.random::<f32>() * (max - min) + min
    }

    /// Uniform value in `[0, 1)`
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_defaults() {
        let world = World::new(7, Tuning::default(), CANVAS_WIDTH, CANVAS_HEIGHT);
        assert_eq!(world.phase, RunPhase::Start);
        assert_eq!(world.lives, MAX_LIVES);
        assert_eq!(world.speed, BASE_SPEED);
        assert!(world.entities.is_empty());
        // Player stands on the ground line
        assert_eq!(world.player.rect.bottom(), world.ground_y());
        assert!(world.player.is_grounded(world.ground_y()));
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut timers = StatusTimers {
            invincibility: 1,
            jump_boost: 0,
            giant: 2,
        };
        timers.tick_down();
        timers.tick_down();
        timers.tick_down();
        assert_eq!(timers, StatusTimers::default());
    }

    #[test]
    fn test_pickup_classification() {
        assert!(EntityKind::HealthPill.is_pickup());
        assert!(EntityKind::GiantMushroom.is_pickup());
        assert!(!EntityKind::Spike.is_pickup());
        assert!(!EntityKind::Fireball { base_y: 0.0 }.is_pickup());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut world = World::new(1, Tuning::default(), CANVAS_WIDTH, CANVAS_HEIGHT);
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert!(b > a);
    }
}
