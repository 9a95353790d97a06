//! Guild availability tracking
//!
//! The aggregate "download complete" condition is the AND over "not
//! unavailable" across every guild the store knows about, recomputed on
//! each guild create or sync. The first time the aggregate turns true the
//! tracker latches, so the download-complete notification fires exactly
//! once per session.

use std::sync::atomic::{AtomicBool, Ordering};

use crest_state::EntityStore;

/// One-shot latch over the aggregate availability of all cached guilds
#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    fired: AtomicBool,
}

impl AvailabilityTracker {
    /// Create an unlatched tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the aggregate after a guild create or sync
    ///
    /// Returns true exactly once: on the first recomputation where every
    /// known guild is available. An empty guild set is vacuously complete.
    pub fn note_sync(&self, store: &EntityStore) -> bool {
        if self.fired.load(Ordering::Acquire) {
            return false;
        }
        let complete = store.guilds().iter().all(|g| !g.is_unavailable());
        if !complete {
            return false;
        }
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the download-complete notification already fired
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Unlatch for a fresh session
    pub fn reset(&self) {
        self.fired.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crest_core::{Guild, Snowflake};
    use crest_state::CachedGuild;

    fn store_with(unavailable: &[bool]) -> EntityStore {
        let store = EntityStore::new();
        for (index, &flag) in unavailable.iter().enumerate() {
            store.insert_guild(Arc::new(CachedGuild::new(
                Guild::phantom(Snowflake::new(index as u64 + 1)),
                flag,
            )));
        }
        store
    }

    #[test]
    fn test_fires_only_when_every_guild_is_available() {
        let store = store_with(&[false, false, true]);
        let tracker = AvailabilityTracker::new();

        assert!(!tracker.note_sync(&store));

        store
            .guild(Snowflake::new(3))
            .unwrap()
            .set_unavailable(false);
        assert!(tracker.note_sync(&store));
    }

    #[test]
    fn test_fires_exactly_once() {
        let store = store_with(&[false]);
        let tracker = AvailabilityTracker::new();

        assert!(tracker.note_sync(&store));
        assert!(!tracker.note_sync(&store));
        assert!(tracker.has_fired());
    }

    #[test]
    fn test_empty_guild_set_is_vacuously_complete() {
        let store = EntityStore::new();
        let tracker = AvailabilityTracker::new();
        assert!(tracker.note_sync(&store));
    }

    #[test]
    fn test_reset_unlatches() {
        let store = store_with(&[false]);
        let tracker = AvailabilityTracker::new();

        assert!(tracker.note_sync(&store));
        tracker.reset();
        assert!(tracker.note_sync(&store));
    }
}
