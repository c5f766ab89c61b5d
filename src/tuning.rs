//! Data-driven game balance
//!
//! Every number the simulation is tuned by lives here so a run can be
//! reconfigured from JSON without a rebuild. Missing fields fall back to
//! the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Day/night cycle thresholds, all in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayCycle {
    /// Full cycle length; the phase counter wraps here
    pub duration: u32,
    /// End of full daylight
    pub sunset_start: u32,
    /// Start of full night
    pub night_start: u32,
    /// End of full night
    pub dawn_start: u32,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self {
            duration: DAY_DURATION,
            sunset_start: CYCLE_SUNSET_START,
            night_start: CYCLE_NIGHT_START,
            dawn_start: CYCLE_DAWN_START,
        }
    }
}

impl DayCycle {
    /// Strictly inside the night window
    #[inline]
    pub fn is_night(&self, phase: u32) -> bool {
        phase > self.night_start && phase < self.dawn_start
    }

    /// Before sunset begins
    #[inline]
    pub fn is_day(&self, phase: u32) -> bool {
        phase < self.sunset_start
    }

    /// Force `0 < sunset < night < dawn < duration`
    fn sanitized(self) -> Self {
        let duration = self.duration.max(4);
        let sunset_start = self.sunset_start.clamp(1, duration - 3);
        let night_start = self.night_start.clamp(sunset_start + 1, duration - 2);
        let dawn_start = self.dawn_start.clamp(night_start + 1, duration - 1);
        Self {
            duration,
            sunset_start,
            night_start,
            dawn_start,
        }
    }
}

/// Tunable balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_force: f32,
    pub jump_force_boosted: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    pub spawn_rate_initial: f32,
    pub spawn_rate_min: f32,
    pub max_lives: u8,
    pub invincibility_ticks: u32,
    pub boost_ticks: u32,
    pub giant_ticks: u32,
    pub smash_bonus: f64,
    pub day_cycle: DayCycle,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            jump_force_boosted: JUMP_FORCE_BOOSTED,
            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            spawn_rate_initial: SPAWN_RATE_INITIAL,
            spawn_rate_min: SPAWN_RATE_MIN,
            max_lives: MAX_LIVES,
            invincibility_ticks: INVINCIBILITY_TICKS,
            boost_ticks: BOOST_TICKS,
            giant_ticks: GIANT_TICKS,
            smash_bonus: SMASH_BONUS,
            day_cycle: DayCycle::default(),
        }
    }
}

impl Tuning {
    /// Store key for developer overrides
    pub const STORAGE_KEY: &'static str = "neon-dino-tuning";

    /// Parse overrides from JSON. The result is sanitized.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Load overrides from a store, falling back to defaults
    pub fn load(store: &dyn crate::persistence::KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning overrides: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Repair values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.base_speed > 0.0) {
            self.base_speed = defaults.base_speed;
        }
        if !(self.max_speed >= self.base_speed) {
            self.max_speed = self.base_speed;
        }
        if !(self.speed_increment >= 0.0) {
            self.speed_increment = 0.0;
        }
        if !(self.spawn_rate_min > 0.0) {
            self.spawn_rate_min = defaults.spawn_rate_min;
        }
        if !(self.spawn_rate_initial >= self.spawn_rate_min) {
            self.spawn_rate_initial = self.spawn_rate_min;
        }
        self.max_lives = self.max_lives.max(1);
        self.boost_ticks = self.boost_ticks.max(1);
        self.giant_ticks = self.giant_ticks.max(1);
        self.day_cycle = self.day_cycle.sanitized();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, MemoryStore};

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "max_lives": 5 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.max_lives, 5);
        assert_eq!(tuning.base_speed, BASE_SPEED);
        assert_eq!(tuning.day_cycle, DayCycle::default());
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let tuning = Tuning::from_json(
            r#"{ "base_speed": -1.0, "max_lives": 0, "spawn_rate_min": 0.0,
                 "day_cycle": { "duration": 100, "sunset_start": 90, "night_start": 10, "dawn_start": 5 } }"#,
        )
        .unwrap();
        assert_eq!(tuning.base_speed, BASE_SPEED);
        assert_eq!(tuning.max_lives, 1);
        assert!(tuning.spawn_rate_min > 0.0);
        let c = tuning.day_cycle;
        assert!(c.sunset_start < c.night_start);
        assert!(c.night_start < c.dawn_start);
        assert!(c.dawn_start < c.duration);
    }

    #[test]
    fn test_day_cycle_predicates() {
        let cycle = DayCycle::default();
        assert!(cycle.is_day(0));
        assert!(!cycle.is_day(CYCLE_SUNSET_START));
        // Night bounds are exclusive on both ends
        assert!(!cycle.is_night(CYCLE_NIGHT_START));
        assert!(cycle.is_night(CYCLE_NIGHT_START + 1));
        assert!(!cycle.is_night(CYCLE_DAWN_START));
        // Sunset transition is neither
        let mid_sunset = (CYCLE_SUNSET_START + CYCLE_NIGHT_START) / 2;
        assert!(!cycle.is_day(mid_sunset) && !cycle.is_night(mid_sunset));
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let mut store = MemoryStore::default();
        store.set(Tuning::STORAGE_KEY, "{not json");
        assert_eq!(Tuning::load(&store), Tuning::default());
    }
}
