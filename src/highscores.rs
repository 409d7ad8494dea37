//! Best-score record
//!
//! A single integer persisted under `highScore`. Anything unreadable counts
//! as zero.

use crate::persistence::KeyValueStore;

/// Best score across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Read the stored best; a missing record is written back as `0`
    pub fn load<S: KeyValueStore>(store: &mut S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                let best = parse_high_score(Some(&raw));
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Ok(None) => {
                let fresh = Self::default();
                fresh.save(store);
                fresh
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Record a finished run; returns true when it beat the best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) {
        match store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}

/// Parse a stored high score; missing or malformed → 0
pub fn parse_high_score(raw: Option<&str>) -> u64 {
    raw.and_then(|s| serde_json::from_str::<u64>(s.trim()).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    /// Store that fails every operation
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::WriteRejected {
                key: key.to_string(),
            })
        }
    }

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score(Some("4200")), 4200);
        assert_eq!(parse_high_score(Some(" 17 ")), 17);
        assert_eq!(parse_high_score(Some("abc")), 0);
        assert_eq!(parse_high_score(Some("-5")), 0);
        assert_eq!(parse_high_score(Some("")), 0);
        assert_eq!(parse_high_score(None), 0);
    }

    #[test]
    fn test_missing_record_is_written_as_zero() {
        let mut store = MemoryStore::new();
        let high = HighScore::load(&mut store);
        assert_eq!(high.best, 0);
        assert_eq!(
            store.get(HighScore::STORAGE_KEY),
            Ok(Some("0".to_string()))
        );
    }

    #[test]
    fn test_malformed_record_loads_as_zero() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "not a number").unwrap();
        assert_eq!(HighScore::load(&mut store).best, 0);
    }

    #[test]
    fn test_record_and_save() {
        let mut store = MemoryStore::new();
        let mut high = HighScore::load(&mut store);
        assert!(high.record(900));
        assert!(!high.record(900));
        assert!(!high.record(100));
        high.save(&mut store);
        assert_eq!(HighScore::load(&mut store).best, 900);
    }

    #[test]
    fn test_broken_store_degrades_to_zero() {
        let mut store = BrokenStore;
        let high = HighScore::load(&mut store);
        assert_eq!(high.best, 0);
        // Saving only logs
        high.save(&mut store);
    }
}
