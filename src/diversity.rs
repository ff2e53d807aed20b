//! Prompt diversity tracking
//!
//! Callers that rotate through a pool of prompt templates keep one
//! [`DiversityTracker`] per pool. It remembers the most recently chosen
//! indices and picks uniformly among the rest. When every index in the pool
//! is recent, the memory is cleared and selection starts over.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

use crate::config::HistoryConfig;

/// Recently used prompt indices for one pool
#[derive(Debug, Clone)]
pub struct DiversityTracker {
    recent: VecDeque<usize>,
    window: usize,
}

impl DiversityTracker {
    pub fn new(window: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(window),
            window,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.diversity_window)
    }

    /// Choose an index in `0..pool_size` that was not used recently
    ///
    /// Returns `None` only for an empty pool.
    pub fn select<R: Rng + ?Sized>(&mut self, pool_size: usize, rng: &mut R) -> Option<usize> {
        if pool_size == 0 {
            return None;
        }

        let mut available: Vec<usize> = (0..pool_size)
            .filter(|i| !self.recent.contains(i))
            .collect();
        if available.is_empty() {
            tracing::debug!("All {} prompts used recently, resetting", pool_size);
            self.recent.clear();
            available = (0..pool_size).collect();
        }

        let chosen = *available.choose(rng)?;
        self.record(chosen);
        Some(chosen)
    }

    /// Mark an index as used, forgetting the oldest beyond the window
    pub fn record(&mut self, index: usize) {
        if self.window == 0 {
            return;
        }
        self.recent.retain(|&i| i != index);
        self.recent.push_back(index);
        while self.recent.len() > self.window {
            self.recent.pop_front();
        }
    }

    pub fn recent(&self) -> impl Iterator<Item = usize> + '_ {
        self.recent.iter().copied()
    }

    pub fn is_recent(&self, index: usize) -> bool {
        self.recent.contains(&index)
    }

    pub fn reset(&mut self) {
        self.recent.clear();
    }
}

impl Default for DiversityTracker {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_pool() {
        let mut tracker = DiversityTracker::new(3);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(tracker.select(0, &mut rng), None);
    }

    #[test]
    fn test_avoids_recent_indices() {
        let mut tracker = DiversityTracker::new(3);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let recent: Vec<usize> = tracker.recent().collect();
            let chosen = tracker.select(10, &mut rng).unwrap();
            assert!(chosen < 10);
            assert!(!recent.contains(&chosen), "{} in {:?}", chosen, recent);
        }
    }

    #[test]
    fn test_resets_when_pool_exhausted() {
        let mut tracker = DiversityTracker::new(5);
        let mut rng = StdRng::seed_from_u64(1);

        let mut seen: Vec<usize> = (0..3).map(|_| tracker.select(3, &mut rng).unwrap()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);

        // Every index is recent now; the next pick clears the memory
        let next = tracker.select(3, &mut rng).unwrap();
        assert_eq!(tracker.recent().collect::<Vec<_>>(), vec![next]);
    }

    #[test]
    fn test_window_bounds_memory() {
        let mut tracker = DiversityTracker::new(2);
        tracker.record(1);
        tracker.record(2);
        tracker.record(3);
        assert!(!tracker.is_recent(1));
        assert_eq!(tracker.recent().collect::<Vec<_>>(), vec![2, 3]);

        tracker.reset();
        assert_eq!(tracker.recent().count(), 0);
    }

    #[test]
    fn test_zero_window_never_remembers() {
        let mut tracker = DiversityTracker::new(0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5 {
            assert_eq!(tracker.select(1, &mut rng), Some(0));
        }
        assert_eq!(tracker.recent().count(), 0);
    }
}
