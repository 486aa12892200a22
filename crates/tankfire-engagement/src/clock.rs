//! Scan cadence, decoupled from the per-frame tick.

/// Elapsed-time accumulator that says when the next scan is due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanClock {
    interval: f64,
    accumulated: f64,
}

impl ScanClock {
    /// `interval` must be positive; `EngagementConfig::validate` guarantees it.
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    /// Advance by `dt`. Returns true when the accumulator crosses the interval;
    /// the remainder carries over so the cadence does not drift. At most one
    /// scan is reported per call.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.accumulated += dt.max(0.0);
        if self.accumulated + 1e-9 >= self.interval {
            self.accumulated = (self.accumulated - self.interval).min(self.interval);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tankfire_core::constants::DT;

    #[test]
    fn test_fires_every_twelve_ticks_at_sixty_hz() {
        let mut clock = ScanClock::new(0.2);
        let due: Vec<usize> = (1..=36).filter(|_| clock.advance(DT)).collect();
        assert_eq!(due, vec![12, 24, 36]);
    }

    #[test]
    fn test_large_step_reports_one_scan() {
        let mut clock = ScanClock::new(0.2);
        assert!(clock.advance(1.0));
        // Backlog is capped at one interval.
        assert!(clock.advance(0.0));
        assert!(!clock.advance(0.0));
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut clock = ScanClock::new(0.2);
        assert!(!clock.advance(-5.0));
        assert!(clock.advance(0.2));
    }
}
