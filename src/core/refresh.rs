/// Fixed-interval refresh timer with lifecycle control
///
/// Accumulates delta time and fires once per elapsed interval while
/// running. `stop` halts firing deterministically, `start` re-arms with a
/// fresh interval. The remainder after a fire carries over, so a slow
/// tick drains at most one interval per call instead of bursting.
#[derive(Debug, Clone, Copy)]
pub struct RefreshTimer {
    interval: f32,
    accumulator: f32,
    running: bool,
}

impl RefreshTimer {
    /// Create a running timer with the given interval in seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            running: true,
        }
    }

    /// Update with delta, returns true if a refresh is due
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.running {
            return false;
        }

        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }

    /// Re-arm the timer; the next interval starts fresh
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.running = true;
    }

    /// Halt the timer; ticks no longer fire until `start`
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_full_interval() {
        let mut timer = RefreshTimer::new(1.0);

        assert!(!timer.tick(0.4));
        assert!(!timer.tick(0.4));
        assert!(timer.tick(0.4));
    }

    #[test]
    fn remainder_carries_over() {
        let mut timer = RefreshTimer::new(1.0);

        // 1.2s elapsed: fire once, keep the 0.2s remainder
        assert!(timer.tick(1.2));
        assert!(timer.tick(0.8));
        assert!(!timer.tick(0.1));
    }

    #[test]
    fn slow_tick_fires_once_per_call() {
        let mut timer = RefreshTimer::new(1.0);

        // A long stall drains one interval per subsequent tick
        assert!(timer.tick(3.0));
        assert!(timer.tick(0.0));
        assert!(timer.tick(0.0));
        assert!(!timer.tick(0.0));
    }

    #[test]
    fn stop_halts_firing() {
        let mut timer = RefreshTimer::new(1.0);

        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.tick(5.0));
        assert!(!timer.tick(5.0));
    }

    #[test]
    fn start_begins_fresh_interval() {
        let mut timer = RefreshTimer::new(1.0);

        assert!(!timer.tick(0.9));
        timer.stop();
        timer.start();

        // The partial 0.9s before the restart is discarded
        assert!(!timer.tick(0.5));
        assert!(timer.tick(0.5));
    }
}
