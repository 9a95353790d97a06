//! Bounded recent-message cache
//!
//! The engine only consumes the predicate-search interface; the storage
//! strategy behind it is replaceable. `BoundedMessageCache` is the default:
//! insertion-ordered, oldest evicted at capacity, capacity 0 disables
//! caching entirely.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crest_core::{Message, Shared};

/// Predicate-searchable message cache interface
pub trait MessageStore: Send + Sync {
    /// Record a message, evicting the oldest entry if at capacity
    fn insert(&self, message: Shared<Message>);

    /// Find the first cached message matching the predicate
    fn try_get(&self, predicate: &dyn Fn(&Message) -> bool) -> Option<Shared<Message>>;

    /// Remove and return the first cached message matching the predicate
    fn remove(&self, predicate: &dyn Fn(&Message) -> bool) -> Option<Shared<Message>>;

    /// Drop every cached message
    fn clear(&self);
}

/// Default insertion-ordered bounded cache
#[derive(Debug)]
pub struct BoundedMessageCache {
    capacity: usize,
    entries: Mutex<VecDeque<Shared<Message>>>,
}

impl BoundedMessageCache {
    /// Create a cache holding at most `capacity` messages
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Configured capacity; 0 means caching is disabled
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of cached messages
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no messages
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl MessageStore for BoundedMessageCache {
    fn insert(&self, message: Shared<Message>) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(message);
    }

    fn try_get(&self, predicate: &dyn Fn(&Message) -> bool) -> Option<Shared<Message>> {
        self.entries
            .lock()
            .iter()
            .find(|m| predicate(&m.read()))
            .cloned()
    }

    fn remove(&self, predicate: &dyn Fn(&Message) -> bool) -> Option<Shared<Message>> {
        let mut entries = self.entries.lock();
        let pos = entries.iter().position(|m| predicate(&m.read()))?;
        entries.remove(pos)
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crest_core::{shared, Snowflake};

    fn message(id: u64) -> Shared<Message> {
        shared(Message::new(
            Snowflake::new(id),
            Snowflake::new(1),
            Snowflake::new(2),
        ))
    }

    #[test]
    fn test_capacity_zero_disables_caching() {
        let cache = BoundedMessageCache::new(0);
        cache.insert(message(1));
        assert!(cache.is_empty());
        assert!(cache.try_get(&|m| m.id == Snowflake::new(1)).is_none());
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let cache = BoundedMessageCache::new(2);
        cache.insert(message(1));
        cache.insert(message(2));
        cache.insert(message(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.try_get(&|m| m.id == Snowflake::new(1)).is_none());
        assert!(cache.try_get(&|m| m.id == Snowflake::new(3)).is_some());
    }

    #[test]
    fn test_remove_by_predicate() {
        let cache = BoundedMessageCache::new(4);
        cache.insert(message(1));
        cache.insert(message(2));

        let removed = cache.remove(&|m| m.id == Snowflake::new(1)).unwrap();
        assert_eq!(removed.read().id, Snowflake::new(1));
        assert_eq!(cache.len(), 1);
        assert!(cache.remove(&|m| m.id == Snowflake::new(1)).is_none());
    }
}
