//! Explicit single-slot cache owned by the orchestrator.
//!
//! Replaces the module-global "cached value plus in-flight guard" pattern:
//! the slot is an owned object with an inspectable state instead of two
//! free-floating statics. The slot is keyed globally -- every caller shares
//! one value regardless of query parameters.

use parking_lot::Mutex;

/// Result of probing the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    /// A value is cached.
    Hit(T),
    /// Another caller is already computing the value.
    Pending,
    /// Nothing cached and nobody computing; the caller should fill it.
    Miss,
}

#[derive(Debug)]
enum SlotState<T> {
    Empty,
    Pending,
    Ready(T),
}

/// Single-slot cache with an in-flight guard.
#[derive(Debug)]
pub struct ResponseCache<T> {
    slot: Mutex<SlotState<T>>,
}

impl<T: Clone> ResponseCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(SlotState::Empty),
        }
    }

    /// Probe the cache without changing it.
    #[must_use]
    pub fn get(&self) -> CacheLookup<T> {
        match &*self.slot.lock() {
            SlotState::Ready(value) => CacheLookup::Hit(value.clone()),
            SlotState::Pending => CacheLookup::Pending,
            SlotState::Empty => CacheLookup::Miss,
        }
    }

    /// Claim the fill. Returns true if this caller became the filler;
    /// false when a value is already cached or another fill is in flight.
    pub fn begin_fill(&self) -> bool {
        let mut slot = self.slot.lock();
        match *slot {
            SlotState::Empty => {
                *slot = SlotState::Pending;
                true
            }
            SlotState::Pending | SlotState::Ready(_) => false,
        }
    }

    /// Store a value, completing any in-flight fill.
    pub fn fill(&self, value: T) {
        *self.slot.lock() = SlotState::Ready(value);
    }

    /// Drop the cached value (also cancels a pending fill claim).
    pub fn clear(&self) {
        *self.slot.lock() = SlotState::Empty;
    }
}

impl<T: Clone> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let cache: ResponseCache<u32> = ResponseCache::new();
        assert_eq!(cache.get(), CacheLookup::Miss);

        cache.fill(7);
        assert_eq!(cache.get(), CacheLookup::Hit(7));
    }

    #[test]
    fn test_single_filler_claims_pending() {
        let cache: ResponseCache<u32> = ResponseCache::new();
        assert!(cache.begin_fill());
        assert!(!cache.begin_fill());
        assert_eq!(cache.get(), CacheLookup::Pending);

        cache.fill(7);
        assert!(!cache.begin_fill());
        assert_eq!(cache.get(), CacheLookup::Hit(7));
    }

    #[test]
    fn test_clear_resets_to_miss() {
        let cache: ResponseCache<u32> = ResponseCache::new();
        cache.fill(7);
        cache.clear();
        assert_eq!(cache.get(), CacheLookup::Miss);
        assert!(cache.begin_fill());
    }
}
