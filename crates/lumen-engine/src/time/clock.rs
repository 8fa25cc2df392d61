use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source, in seconds.
pub trait Clock {
    fn now(&self) -> f32;
}

/// Wall clock measured from the moment it was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f32 {
        self.origin.elapsed().as_secs_f32()
    }
}

/// Manually advanced clock.
///
/// Clones share the same reading, so a driver can keep one handle and hand
/// another to a `FrameClock`.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new(start: f32) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn set(&self, seconds: f32) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f32) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f32 {
        self.now.get()
    }
}
