use std::time::{Duration, Instant};

/// Fixed-length countdown for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionClock {
    started_at: Instant,
    duration: Duration,
    ends_at: Instant,
}

impl SessionClock {
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self {
            started_at: now,
            duration,
            ends_at: now + duration,
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn ends_at(&self) -> Instant {
        self.ends_at
    }

    /// Seconds until the end; negative once the session has expired.
    pub fn remaining(&self, now: Instant) -> f64 {
        match self.ends_at.checked_duration_since(now) {
            Some(left) => left.as_secs_f64(),
            None => -now.duration_since(self.ends_at).as_secs_f64(),
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.remaining(now) > 0.0
    }

    /// `MM:SS`, floored to whole seconds and clamped at zero.
    pub fn format_remaining(&self, now: Instant) -> String {
        let secs = self.remaining(now).max(0.0).floor() as u64;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
