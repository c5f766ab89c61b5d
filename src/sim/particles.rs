//! Short-lived visual feedback particles
//!
//! Particles never affect gameplay. They are emitted in bursts by physics
//! and collision events and fade out as their life runs down.

use glam::Vec2;
use rand::Rng;

use crate::color::Color;
use crate::consts::PARTICLE_GRAVITY;

/// A single particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: i32,
    pub max_life: i32,
    pub color: Color,
    /// Square side in pixels
    pub size: f32,
}

impl Particle {
    /// Draw opacity: 1 when fresh, 0 when expired
    pub fn opacity(&self) -> f32 {
        if self.max_life <= 0 {
            return 0.0;
        }
        (self.life as f32 / self.max_life as f32).clamp(0.0, 1.0)
    }
}

/// Parameters for one emission
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: u32,
    pub origin: Vec2,
    /// Origin jitter, ± per axis
    pub jitter: Vec2,
    pub vx: (f32, f32),
    pub vy: (f32, f32),
    pub life: i32,
    pub color: Color,
    /// Picked instead of `color` half of the time
    pub alt_color: Option<Color>,
    pub size: (f32, f32),
}

impl Burst {
    fn new(count: u32, origin: Vec2, life: i32, color: Color) -> Self {
        Self {
            count,
            origin,
            jitter: Vec2::ZERO,
            vx: (0.0, 0.0),
            vy: (0.0, 0.0),
            life,
            color,
            alt_color: None,
            size: (2.0, 2.0),
        }
    }

    /// Symmetric velocity spread on both axes
    fn spread(mut self, v: f32) -> Self {
        self.vx = (-v, v);
        self.vy = (-v, v);
        self
    }
}

fn between(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Dust kicked up by a jump
pub fn jump_dust(feet: Vec2, boosted: bool) -> Burst {
    let color = if boosted { Color::hex(0x60a5fa) } else { Color::WHITE };
    Burst {
        vx: (-2.0, 2.0),
        vy: (0.0, 2.0),
        size: (2.0, 4.0),
        ..Burst::new(5, feet, 20, color)
    }
}

pub fn fireball_trail(center: Vec2) -> Burst {
    Burst {
        jitter: Vec2::splat(10.0),
        vx: (1.0, 3.0),
        vy: (-1.0, 1.0),
        alt_color: Some(Color::hex(0xfca5a5)),
        size: (3.0, 6.0),
        ..Burst::new(1, center, 15, Color::hex(0xf87171))
    }
}

pub fn meteor_trail(center: Vec2) -> Burst {
    Burst {
        jitter: Vec2::splat(5.0),
        vx: (1.0, 3.0),
        vy: (-1.0, 1.0),
        alt_color: Some(Color::hex(0xef4444)),
        size: (2.0, 5.0),
        ..Burst::new(2, center, 15, Color::hex(0xf97316))
    }
}

pub fn meteor_impact(at: Vec2, color: Color) -> Burst {
    Burst {
        vx: (-5.0, 5.0),
        vy: (-5.0, -2.0),
        size: (3.0, 6.0),
        ..Burst::new(8, at, 30, color)
    }
}

/// Sparkle left behind by a boost star, drifting with the world
pub fn star_sparkle(center: Vec2, speed: f32) -> Burst {
    Burst {
        vx: (-speed, -speed),
        vy: (-1.0, 1.0),
        size: (2.0, 4.0),
        ..Burst::new(1, center, 20, Color::hex(0x60a5fa))
    }
}

/// Drip from somewhere along the underside of a cloud
pub fn cloud_drip(underside: Vec2, half_width: f32) -> Burst {
    Burst {
        jitter: Vec2::new((half_width - 5.0).max(0.0), 0.0),
        vy: (1.0, 2.0),
        ..Burst::new(1, underside, 20, Color::hex(0xd8b4fe))
    }
}

pub fn heal(center: Vec2) -> Burst {
    Burst {
        size: (4.0, 4.0),
        ..Burst::new(10, center, 30, Color::hex(0x4ade80)).spread(2.0)
    }
}

pub fn boost_pickup(center: Vec2) -> Burst {
    Burst {
        size: (5.0, 5.0),
        ..Burst::new(15, center, 40, Color::hex(0x3b82f6)).spread(3.0)
    }
}

pub fn giant_pickup(center: Vec2) -> Burst {
    Burst {
        size: (6.0, 6.0),
        ..Burst::new(20, center, 45, Color::hex(0xa855f7)).spread(4.0)
    }
}

/// Debris of a hazard smashed in giant mode
pub fn smash(center: Vec2, color: Color) -> Burst {
    Burst {
        size: (5.0, 5.0),
        ..Burst::new(12, center, 25, color).spread(4.0)
    }
}

pub fn hit(center: Vec2) -> Burst {
    Burst {
        size: (4.0, 4.0),
        ..Burst::new(15, center, 20, Color::hex(0xef4444)).spread(5.0)
    }
}

/// All live particles plus the emission cap
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
    next_id: u32,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::new(),
            capacity,
            next_id: 1,
        }
    }

    /// Change the cap; excess particles (oldest first) are dropped
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.particles.len() > capacity {
            let excess = self.particles.len() - capacity;
            self.particles.drain(..excess);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Add one particle. Dropped silently at capacity.
    pub fn push(&mut self, mut particle: Particle) {
        if self.particles.len() >= self.capacity {
            return;
        }
        particle.id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.particles.push(particle);
    }

    /// Emit a burst
    pub fn emit(&mut self, rng: &mut impl Rng, burst: Burst) {
        for _ in 0..burst.count {
            let offset = Vec2::new(
                between(rng, (-burst.jitter.x, burst.jitter.x)),
                between(rng, (-burst.jitter.y, burst.jitter.y)),
            );
            let vel = Vec2::new(between(rng, burst.vx), between(rng, burst.vy));
            let color = match burst.alt_color {
                Some(alt) if rng.random_bool(0.5) => alt,
                _ => burst.color,
            };
            let size = between(rng, burst.size);
            self.push(Particle {
                id: 0,
                pos: burst.origin + offset,
                vel,
                life: burst.life,
                max_life: burst.life,
                color,
                size,
            });
        }
    }

    /// Advance every particle one tick and purge the expired ones
    pub fn update(&mut self) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.life -= 1;
            p.vel.y += PARTICLE_GRAVITY;
        }
        self.particles.retain(|p| p.life > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(life: i32) -> Particle {
        Particle {
            id: 0,
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life,
            max_life: 20,
            color: Color::WHITE,
            size: 2.0,
        }
    }

    #[test]
    fn test_update_moves_and_falls() {
        let mut system = ParticleSystem::new(10);
        system.push(particle(5));
        system.update();
        let p = system.iter().next().unwrap();
        assert_eq!(p.pos, Vec2::new(1.0, 0.0));
        assert_eq!(p.life, 4);
        assert!((p.vel.y - PARTICLE_GRAVITY).abs() < 1e-6);
    }

    #[test]
    fn test_particle_gone_the_tick_life_hits_zero() {
        let mut system = ParticleSystem::new(10);
        system.push(particle(1));
        system.push(particle(2));
        system.update();
        assert_eq!(system.len(), 1);
        system.update();
        assert!(system.is_empty());
    }

    #[test]
    fn test_opacity_fades() {
        let mut p = particle(20);
        assert_eq!(p.opacity(), 1.0);
        p.life = 5;
        assert!((p.opacity() - 0.25).abs() < 1e-6);
        p.life = 0;
        assert_eq!(p.opacity(), 0.0);
    }

    #[test]
    fn test_capacity_limits_emission() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new(12);
        system.emit(&mut rng, hit(Vec2::ZERO));
        assert_eq!(system.len(), 12);

        system.set_capacity(4);
        assert_eq!(system.len(), 4);

        let mut none = ParticleSystem::new(0);
        none.emit(&mut rng, giant_pickup(Vec2::ZERO));
        assert!(none.is_empty());
    }

    #[test]
    fn test_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut system = ParticleSystem::new(usize::MAX);
        system.emit(&mut rng, meteor_impact(Vec2::new(100.0, 350.0), Color::BLACK));
        assert_eq!(system.len(), 8);
        for p in system.iter() {
            assert!(p.vel.x >= -5.0 && p.vel.x <= 5.0);
            assert!(p.vel.y >= -5.0 && p.vel.y <= -2.0);
            assert_eq!(p.life, 30);
            assert_eq!(p.pos, Vec2::new(100.0, 350.0));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut system = ParticleSystem::new(usize::MAX);
        system.emit(&mut rng, heal(Vec2::ZERO));
        let mut ids: Vec<u32> = system.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
