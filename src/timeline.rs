//! Eased property tracks sampled against a shared clock.
//!
//! A transition is a handful of [`Track`]s that all read the same elapsed
//! time, so parallel sub-animations stay in lockstep without owning their own
//! clocks.

use raylib::prelude::*;

/// Penner-style easing signature used by `raylib::ease`: `(t, begin, change, duration)`.
pub type Easing = fn(f32, f32, f32, f32) -> f32;

#[derive(Debug, Clone, Copy)]
pub struct Track {
    pub from: f32,
    pub to: f32,
    pub delay: f32,
    pub duration: f32,
    easing: Easing,
}

impl Track {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self { from, to, delay: 0.0, duration, easing }
    }

    pub fn delayed(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn end_time(&self) -> f32 {
        self.delay + self.duration
    }

    /// Value at `elapsed` seconds on the owning clock. Holds `from` before the
    /// delay and exactly `to` once finished.
    pub fn sample(&self, elapsed: f32) -> f32 {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            self.from
        } else if local >= self.duration || self.duration <= 0.0 {
            self.to
        } else {
            (self.easing)(local, self.from, self.to - self.from, self.duration)
        }
    }
}

/// Normalised eased progress in `0.0..=1.0`.
pub fn eased_progress(easing: Easing, elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 || elapsed >= duration {
        1.0
    } else if elapsed <= 0.0 {
        0.0
    } else {
        easing(elapsed, 0.0, 1.0, duration)
    }
}

/// A straight yoyo between `from` and `to`, forever. Used for sway.
#[derive(Debug, Clone, Copy)]
pub struct Yoyo {
    from: f32,
    to: f32,
    half_period: f32,
    easing: Easing,
}

impl Yoyo {
    pub fn new(from: f32, to: f32, half_period: f32, easing: Easing) -> Self {
        Self { from, to, half_period, easing }
    }

    pub fn sample(&self, elapsed: f32) -> f32 {
        if self.half_period <= 0.0 {
            return self.from;
        }
        let cycle = elapsed.max(0.0) / self.half_period;
        let leg = cycle.floor() as u64;
        let local = (cycle - leg as f32) * self.half_period;
        let (a, b) = if leg % 2 == 0 { (self.from, self.to) } else { (self.to, self.from) };
        (self.easing)(local, a, b - a, self.half_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_holds_before_delay_and_snaps_at_end() {
        let track = Track::new(1.0, 3.0, 0.4, ease::quad_out).delayed(0.25);
        assert_eq!(track.sample(0.0), 1.0);
        assert_eq!(track.sample(0.25), 1.0);
        assert_eq!(track.sample(0.65), 3.0);
        assert_eq!(track.sample(10.0), 3.0);
        let mid = track.sample(0.45);
        assert!(mid > 1.0 && mid < 3.0);
        assert!((track.end_time() - 0.65).abs() < 1e-6);
    }

    #[test]
    fn yoyo_returns_to_start_every_full_period() {
        let sway = Yoyo::new(0.0, 100.0, 2.0, ease::sine_in_out);
        assert!(sway.sample(0.0).abs() < 1e-3);
        assert!((sway.sample(2.0) - 100.0).abs() < 1e-3);
        assert!(sway.sample(4.0).abs() < 1e-3);
        assert!((sway.sample(1.0) - 50.0).abs() < 1.0);
    }

    #[test]
    fn eased_progress_is_clamped() {
        assert_eq!(eased_progress(ease::quad_out, -1.0, 2.0), 0.0);
        assert_eq!(eased_progress(ease::quad_out, 3.0, 2.0), 1.0);
    }
}
