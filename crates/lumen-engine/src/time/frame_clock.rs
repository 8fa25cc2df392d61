use super::clock::{Clock, SystemClock};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `last` is the reading taken at the previous tick (or at `reset`); each
/// `tick` reports `now - last` and moves the baseline forward.
///
/// Unclamped by default so `dt` is the true elapsed time. `with_clamps`
/// bounds it for callers that step simulations with it.
#[derive(Debug, Clone)]
pub struct FrameClock<C: Clock = SystemClock> {
    clock: C,
    last: f32,
    frame_index: u64,
    clamp: Option<(f32, f32)>,
}

impl<C: Clock> FrameClock<C> {
    /// Creates a frame clock reading from `clock`, baselined at its current time.
    pub fn with_clock(clock: C) -> Self {
        let last = clock.now();
        Self {
            clock,
            last,
            frame_index: 0,
            clamp: None,
        }
    }

    /// Bounds every reported `dt` to `[dt_min, dt_max]` seconds.
    pub fn with_clamps(mut self, dt_min: f32, dt_max: f32) -> Self {
        debug_assert!(dt_min <= dt_max);
        self.clamp = Some((dt_min, dt_max));
        self
    }

    /// Resets the clock baseline to the current time.
    pub fn reset(&mut self) {
        self.last = self.clock.now();
    }

    /// Number of ticks taken so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.clock.now();
        let mut dt = (now - self.last).max(0.0);

        if let Some((lo, hi)) = self.clamp {
            dt = dt.clamp(lo, hi);
        }

        self.last = now;

        let ft = FrameTime {
            dt,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    #[test]
    fn tick_reports_time_since_previous_tick() {
        let time = ManualClock::new(2.0);
        let mut clock = FrameClock::with_clock(time.clone());

        time.advance(0.5);
        let a = clock.tick();
        time.advance(0.25);
        let b = clock.tick();

        assert_eq!(a, FrameTime { dt: 0.5, frame_index: 0 });
        assert_eq!(b, FrameTime { dt: 0.25, frame_index: 1 });
    }

    #[test]
    fn reset_moves_the_baseline() {
        let time = ManualClock::new(0.0);
        let mut clock = FrameClock::with_clock(time.clone());

        time.set(10.0);
        clock.reset();
        time.advance(1.0);

        assert_eq!(clock.tick().dt, 1.0);
    }

    #[test]
    fn clamps_bound_dt() {
        let time = ManualClock::new(0.0);
        let mut clock = FrameClock::with_clock(time.clone()).with_clamps(0.001, 0.25);

        time.advance(3.0);
        assert_eq!(clock.tick().dt, 0.25);

        assert_eq!(clock.tick().dt, 0.001);
    }

    #[test]
    fn backwards_reading_never_yields_negative_dt() {
        let time = ManualClock::new(5.0);
        let mut clock = FrameClock::with_clock(time.clone());

        time.set(4.0);
        assert_eq!(clock.tick().dt, 0.0);
    }
}
