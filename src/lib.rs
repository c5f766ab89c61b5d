//! Neon Dino - An endless runner on a 2D canvas
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (clock, spawner, physics, particles)
//! - `renderer`: Canvas drawing (atmosphere, scene, HUD)
//! - `game`: Frame orchestrator tying simulation, rendering and persistence together
//! - `platform`: Input normalization and frame scheduling
//! - `persistence`: Key-value store port (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod color;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Canvas size in device-independent pixels
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    /// Height of the ground strip below the running line
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Player box (scaled by GIANT_SCALE in giant mode)
    pub const DINO_X: f32 = 50.0;
    pub const DINO_WIDTH: f32 = 44.0;
    pub const DINO_HEIGHT: f32 = 47.0;
    pub const GIANT_SCALE: f32 = 1.5;

    /// Vertical physics (pixels/tick, pixels/tick²)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = -12.0;
    pub const JUMP_FORCE_BOOSTED: f32 = -15.5;
    /// Distance from the ground within which a jump is accepted
    pub const JUMP_GROUND_BUFFER: f32 = 5.0;

    /// World scroll speed (pixels/tick)
    pub const BASE_SPEED: f32 = 5.0;
    pub const MAX_SPEED: f32 = 12.0;
    pub const SPEED_INCREMENT: f32 = 0.001;

    /// Spawn gap bounds (ticks)
    pub const SPAWN_RATE_INITIAL: f32 = 120.0;
    pub const SPAWN_RATE_MIN: f32 = 50.0;
    /// Upper bound of the uniform jitter added to every spawn gap
    pub const SPAWN_JITTER: f32 = 50.0;

    /// Lives and timed effects (ticks)
    pub const MAX_LIVES: u8 = 3;
    pub const INVINCIBILITY_TICKS: u32 = 90;
    pub const BOOST_TICKS: u32 = 300;
    pub const GIANT_TICKS: u32 = 300;
    /// Score awarded for smashing a hazard in giant mode
    pub const SMASH_BONUS: f64 = 10.0;

    /// Score gained per tick (seconds at the assumed 60 Hz refresh)
    pub const SCORE_PER_TICK: f64 = 1.0 / 60.0;

    /// Day/night cycle (ticks)
    pub const DAY_DURATION: u32 = 3600;
    pub const CYCLE_SUNSET_START: u32 = 1800;
    pub const CYCLE_NIGHT_START: u32 = 2400;
    pub const CYCLE_DAWN_START: u32 = 3300;

    /// Parallax layer speed factors (back, middle, front)
    pub const PARALLAX_FACTORS: [f32; 3] = [0.1, 0.3, 0.6];

    /// Hitbox inset applied on every side by the collision test
    pub const COLLISION_PADDING: f32 = 4.0;
    /// Distance past a world edge after which entities are dropped
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Downward acceleration applied to particles
    pub const PARTICLE_GRAVITY: f32 = 0.05;
}
