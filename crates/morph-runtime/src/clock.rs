//! Pausable frame clock

/// Longest frame delta handed to the simulation, in seconds
pub const MAX_DELTA: f64 = 0.25;

/// Tracks elapsed animation time and per-frame delta.
///
/// Elapsed time only advances while running. Resuming drains the pending
/// delta so the pause gap never shows up as one large step.
pub struct Clock {
    /// Elapsed animation time in seconds
    elapsed: f64,
    /// Delta of the last tick in seconds
    delta: f64,
    /// Host time of the previous tick; `None` before the first tick or
    /// right after a resume
    last: Option<f64>,
    paused: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            last: None,
            paused: false,
        }
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to host time `now` (seconds, monotonic). Returns the new delta.
    pub fn tick_at(&mut self, now: f64) -> f64 {
        let previous = self.last.replace(now);

        if self.paused {
            self.delta = 0.0;
            return 0.0;
        }

        self.delta = match previous {
            Some(prev) => (now - prev).clamp(0.0, MAX_DELTA),
            None => 0.0,
        };
        self.elapsed += self.delta;
        self.delta
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.delta = 0.0;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last = None;
        }
    }

    /// Flip the paused flag. Returns true if the clock is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Zero elapsed time and resume if paused
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
        self.resume();
    }
}
