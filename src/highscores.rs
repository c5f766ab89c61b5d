//! Best score across runs
//!
//! Read once at startup, written only when a run beats it.

use crate::persistence::KeyValueStore;

/// Best floored score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Store key
    pub const STORAGE_KEY: &'static str = "neon-dino-highscore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Parse a stored value; anything that isn't a non-negative integer reads as 0
    pub fn parse(raw: Option<&str>) -> Self {
        let best = raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0);
        Self { best }
    }

    /// Load the stored high score
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = store.get(Self::STORAGE_KEY);
        let score = Self::parse(raw.as_deref());
        if raw.is_some() && score.best == 0 && raw.as_deref().map(str::trim) != Some("0") {
            log::warn!("Stored high score unreadable, starting from 0");
        }
        log::info!("High score: {}", score.best);
        score
    }

    /// Record a finished run. Persists and returns true on a new record.
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        store.set(Self::STORAGE_KEY, &score.to_string());
        log::info!("New high score: {}", score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_parse_degrades_to_zero() {
        assert_eq!(HighScore::parse(None).best(), 0);
        assert_eq!(HighScore::parse(Some("")).best(), 0);
        assert_eq!(HighScore::parse(Some("abc")).best(), 0);
        assert_eq!(HighScore::parse(Some("-5")).best(), 0);
        assert_eq!(HighScore::parse(Some("42")).best(), 42);
    }

    #[test]
    fn test_submit_only_persists_records() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "30");
        let mut hs = HighScore::load(&store);
        assert_eq!(hs.best(), 30);

        assert!(!hs.submit(30, &mut store));
        assert!(!hs.submit(12, &mut store));
        assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("30"));

        assert!(hs.submit(31, &mut store));
        assert_eq!(hs.best(), 31);
        assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("31"));
    }
}
