//! Quote ID generation
//!
//! IDs are wall-clock milliseconds, bumped forward whenever the clock has
//! not advanced past the last issued ID. Every issued ID is strictly
//! greater than every ID the generator has seen, so two quotes created in
//! the same millisecond (or after an import of large IDs) never collide.
//! Once `u64::MAX` has been seen there is nothing left to issue.

use chrono::Utc;

/// Monotonic ID generator
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that will only issue IDs above `ids`
    pub fn seeded<I: IntoIterator<Item = u64>>(ids: I) -> Self {
        let mut generator = Self::new();
        for id in ids {
            generator.observe(id);
        }
        generator
    }

    /// Record an ID that was assigned elsewhere
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }

    /// Issue a fresh ID
    ///
    /// Returns `None` when every ID above the highest one seen is taken.
    pub fn next_id(&mut self) -> Option<u64> {
        let floor = self.last.checked_add(1)?;
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(floor);
        Some(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let mut previous = ids.next_id().unwrap();
        for _ in 0..1000 {
            let id = ids.next_id().unwrap();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_ids_follow_wall_clock() {
        let before = Utc::now().timestamp_millis() as u64;
        let id = IdGenerator::new().next_id().unwrap();
        assert!(id >= before);
    }

    #[test]
    fn test_seeded_skips_past_large_ids() {
        let far_future = u64::MAX / 2;
        let mut ids = IdGenerator::seeded([1, far_future, 3]);
        assert_eq!(ids.next_id(), Some(far_future + 1));
    }

    #[test]
    fn test_observe_after_issue() {
        let mut ids = IdGenerator::new();
        let first = ids.next_id().unwrap();
        ids.observe(first + 10_000_000);
        assert_eq!(ids.next_id(), Some(first + 10_000_001));
    }

    #[test]
    fn test_exhausted_after_max_id() {
        let mut ids = IdGenerator::seeded([u64::MAX - 1]);
        assert_eq!(ids.next_id(), Some(u64::MAX));
        assert_eq!(ids.next_id(), None);
        // Stays exhausted
        assert_eq!(ids.next_id(), None);
    }
}
