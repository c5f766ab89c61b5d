//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One fixed step per displayed frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collision};
pub use particles::{Particle, ParticleSystem};
pub use state::{Entity, EntityKind, GameEvent, Player, RunPhase, StatusTimers, World};
pub use tick::{TickInput, tick};
