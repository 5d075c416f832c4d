//! Variable frame delta sampling.
//!
//! The simulation is frame-rate dependent: each frame advances by however long
//! the previous one took. [`FrameClock`] turns host timestamps into those
//! deltas and forgets the last timestamp across a pause, so time spent paused
//! never arrives as one huge step on resume.

use std::time::{Duration, Instant};

/// Samples wall-clock deltas between frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// A clock that has not seen a frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time since the previous sample. The first sample after construction
    /// or [`resume`](Self::resume) yields zero.
    pub fn sample(&mut self, now: Instant) -> Duration {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        delta
    }

    /// Restart timing from `now`, discarding whatever elapsed since the last
    /// sample.
    pub fn resume(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Forget the last sample; the next one yields zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.sample(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn samples_measure_gap() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.sample(t0);
        let t1 = t0 + Duration::from_millis(16);
        assert_eq!(clock.sample(t1), Duration::from_millis(16));
    }

    #[test]
    fn resume_discards_paused_time() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.sample(t0);
        // Paused for ten seconds.
        let resumed = t0 + Duration::from_secs(10);
        clock.resume(resumed);
        let next = resumed + Duration::from_millis(17);
        assert_eq!(clock.sample(next), Duration::from_millis(17));
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.sample(t0);
        assert_eq!(clock.sample(t0 - Duration::from_millis(5)), Duration::ZERO);
    }

    #[test]
    fn reset_forgets_last() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.sample(t0);
        clock.reset();
        assert_eq!(clock.sample(t0 + Duration::from_secs(3)), Duration::ZERO);
    }
}
