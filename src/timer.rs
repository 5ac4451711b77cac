use std::time::{Duration, Instant};

/// Restartable countdown. Every query takes the current `Instant` so callers
/// stay deterministic under test; the frame loop passes `Instant::now()`.
#[derive(Clone, Debug)]
pub struct Countdown {
    duration: Duration,
    started: Option<Instant>,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: None,
        }
    }

    /// Re-arms with a fresh full window, mid-countdown or not.
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn has_elapsed(&self, now: Instant) -> bool {
        match self.started {
            Some(started) => now.duration_since(started) >= self.duration,
            None => false,
        }
    }

    /// Seconds remaining; zero when never started or already elapsed.
    pub fn time_left(&self, now: Instant) -> f32 {
        match self.started {
            Some(started) => {
                let elapsed = now.duration_since(started);
                self.duration.saturating_sub(elapsed).as_secs_f32()
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_started_never_elapses() {
        let countdown = Countdown::new(Duration::from_secs(5));
        assert!(!countdown.has_elapsed(Instant::now()));
        assert_eq!(countdown.time_left(Instant::now()), 0.0);
    }

    #[test]
    fn elapses_at_exactly_the_window() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(5));
        countdown.start(t0);

        assert!(!countdown.has_elapsed(t0 + Duration::from_secs(4)));
        assert!(countdown.has_elapsed(t0 + Duration::from_secs(5)));
        assert!(countdown.has_elapsed(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn restart_rearms_full_window() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(5));
        countdown.start(t0);
        countdown.start(t0 + Duration::from_secs(4));

        assert!(!countdown.has_elapsed(t0 + Duration::from_secs(8)));
        assert!(countdown.has_elapsed(t0 + Duration::from_secs(9)));
    }

    #[test]
    fn time_left_counts_down_and_floors_at_zero() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(5));
        countdown.start(t0);

        let left = countdown.time_left(t0 + Duration::from_secs(2));
        assert!((left - 3.0).abs() < 1e-6);
        assert_eq!(countdown.time_left(t0 + Duration::from_secs(7)), 0.0);
    }
}
