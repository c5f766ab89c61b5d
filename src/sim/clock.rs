//! World clock
//!
//! Advances once per playing tick: frame counter, survival score, speed
//! ramp, status timers, day/night phase and parallax scroll.

use super::state::World;
use crate::consts::{PARALLAX_FACTORS, SCORE_PER_TICK};

/// Advance the clock by one playing tick
pub fn advance_clock(world: &mut World) {
    world.frame += 1;
    world.score += SCORE_PER_TICK;
    world.speed = (world.speed + world.tuning.speed_increment).min(world.tuning.max_speed);

    world.timers.tick_down();

    let duration = world.tuning.day_cycle.duration.max(1);
    world.day_phase = (world.day_phase + 1) % duration;

    let width = world.width.max(1.0);
    for (offset, factor) in world.parallax.iter_mut().zip(PARALLAX_FACTORS) {
        *offset = (*offset + world.speed * factor) % width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::StatusTimers;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(1, Tuning::default(), CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    #[test]
    fn test_one_tick() {
        let mut w = world();
        w.timers.invincibility = 2;
        advance_clock(&mut w);
        assert_eq!(w.frame, 1);
        assert!((w.score - 1.0 / 60.0).abs() < 1e-9);
        assert!(w.speed > BASE_SPEED);
        assert_eq!(w.timers.invincibility, 1);
        assert_eq!(w.day_phase, 1);
        assert!((w.parallax[0] - w.speed * 0.1).abs() < 1e-5);
        assert!(w.parallax[2] > w.parallax[1]);
    }

    #[test]
    fn test_sixty_ticks_is_one_second() {
        let mut w = world();
        for _ in 0..60 {
            advance_clock(&mut w);
        }
        assert_eq!(w.score.floor() as u64, 1);
    }

    #[test]
    fn test_day_phase_period() {
        let mut w = world();
        w.day_phase = 1234;
        for _ in 0..DAY_DURATION {
            advance_clock(&mut w);
        }
        assert_eq!(w.day_phase, 1234);
    }

    #[test]
    fn test_parallax_wraps_within_width() {
        let mut w = world();
        w.speed = MAX_SPEED;
        for _ in 0..5000 {
            advance_clock(&mut w);
            for offset in w.parallax {
                assert!((0.0..w.width).contains(&offset));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_speed_monotonic_and_capped(ticks in 0usize..20_000, start in 0.0f32..MAX_SPEED) {
            let mut w = world();
            w.speed = start;
            let mut last = w.speed;
            for _ in 0..ticks {
                advance_clock(&mut w);
                prop_assert!(w.speed >= last);
                prop_assert!(w.speed <= MAX_SPEED);
                last = w.speed;
            }
        }

        #[test]
        fn prop_timers_count_down_to_zero(
            inv in 0u32..200, boost in 0u32..200, giant in 0u32..200, ticks in 0u32..400,
        ) {
            let mut w = world();
            w.timers = StatusTimers { invincibility: inv, jump_boost: boost, giant };
            for _ in 0..ticks {
                let before = w.timers;
                advance_clock(&mut w);
                prop_assert!(w.timers.invincibility <= before.invincibility);
                prop_assert!(w.timers.jump_boost <= before.jump_boost);
                prop_assert!(w.timers.giant <= before.giant);
            }
            prop_assert_eq!(w.timers.invincibility, inv.saturating_sub(ticks));
            prop_assert_eq!(w.timers.jump_boost, boost.saturating_sub(ticks));
            prop_assert_eq!(w.timers.giant, giant.saturating_sub(ticks));
        }
    }
}
