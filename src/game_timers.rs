// Copyright (C) 2020-2026 Andy Kurnia.

use std::time::{Duration, Instant};

// Countdown for the player to move. Stopped outside of play.
#[derive(Clone, Debug)]
pub struct TurnTimer {
    instant: Instant,
    duration_ms: i64,
    running: bool,
}

impl TurnTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            instant: Instant::now(),
            duration_ms: duration.as_millis() as i64,
            running: false,
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.instant = now;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    // Full duration while stopped, can go negative once expired.
    pub fn remaining_ms_as_at(&self, now: Instant) -> i64 {
        self.duration_ms
            - (-(self.running as i64)
                & now.saturating_duration_since(self.instant).as_millis() as i64)
    }

    pub fn is_expired_as_at(&self, now: Instant) -> bool {
        self.running && self.remaining_ms_as_at(now) <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_only_while_running() {
        let mut timer = TurnTimer::new(Duration::from_secs(30));
        let start = Instant::now();
        let later = start + Duration::from_secs(31);
        assert_eq!(timer.remaining_ms_as_at(later), 30_000);
        assert!(!timer.is_expired_as_at(later));
        timer.restart(start);
        assert_eq!(timer.remaining_ms_as_at(start + Duration::from_secs(10)), 20_000);
        assert!(timer.is_expired_as_at(later));
        timer.stop();
        assert!(!timer.is_expired_as_at(later));
    }
}
