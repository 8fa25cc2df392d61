//! Time subsystem.
//!
//! Provides testable frame timing without coupling to the runtime:
//! - a `Clock` supplies monotonic seconds
//! - a `FrameClock` turns successive readings into per-frame `dt`

mod clock;
mod frame_clock;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame_clock::{FrameClock, FrameTime};
