use std::time::Instant;

/// Minimal feed clock - tracks per-frame delta and total run time
/// Timers downstream manage their own accumulation
#[derive(Debug)]
pub struct FeedClock {
    started: Instant,
    last_tick: Instant,
}

impl FeedClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Seconds since the clock was created or restarted
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Reset the delta origin and the elapsed baseline to now
    pub fn restart(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.last_tick = now;
    }
}

impl Default for FeedClock {
    fn default() -> Self {
        Self::new()
    }
}
