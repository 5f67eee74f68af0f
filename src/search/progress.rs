//! Grid-search progress and remaining-time estimation

use std::time::{Duration, Instant};

/// Snapshot emitted after each configuration completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `completed / total`
    pub ratio: f64,
    pub elapsed: Duration,
    /// Linear extrapolation of the time still needed
    pub remaining: Duration,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// Counts completed configurations and extrapolates the remaining time
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    started: Instant,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            started: Instant::now(),
        }
    }

    /// Record one more finished configuration
    pub fn advance(&mut self) -> Progress {
        self.completed = (self.completed + 1).min(self.total);
        self.snapshot(self.started.elapsed())
    }

    fn snapshot(&self, elapsed: Duration) -> Progress {
        Progress {
            completed: self.completed,
            total: self.total,
            ratio: if self.total == 0 {
                1.0
            } else {
                self.completed as f64 / self.total as f64
            },
            elapsed,
            remaining: estimate_remaining(elapsed, self.completed, self.total),
        }
    }
}

/// `elapsed × (total − completed) / completed`
pub fn estimate_remaining(elapsed: Duration, completed: usize, total: usize) -> Duration {
    if completed == 0 || completed >= total {
        return Duration::ZERO;
    }
    elapsed.mul_f64((total - completed) as f64 / completed as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_remaining() {
        let elapsed = Duration::from_secs(10);
        assert_eq!(estimate_remaining(elapsed, 1, 4), Duration::from_secs(30));
        assert_eq!(estimate_remaining(elapsed, 2, 4), Duration::from_secs(10));
        assert_eq!(estimate_remaining(elapsed, 4, 4), Duration::ZERO);
        assert_eq!(estimate_remaining(elapsed, 0, 4), Duration::ZERO);
    }

    #[test]
    fn test_tracker_ratio_is_monotonic() {
        let mut tracker = ProgressTracker::new(3);
        let ratios: Vec<f64> = (0..4).map(|_| tracker.advance().ratio).collect();
        assert!(ratios.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ratios[2], 1.0);
        assert_eq!(ratios[3], 1.0);
    }

    #[test]
    fn test_snapshot_fields() {
        let tracker = ProgressTracker {
            total: 5,
            completed: 2,
            started: Instant::now(),
        };
        let progress = tracker.snapshot(Duration::from_secs(4));
        assert_eq!(progress.ratio, 0.4);
        assert_eq!(progress.remaining, Duration::from_secs(6));
        assert!(!progress.is_done());
    }
}
