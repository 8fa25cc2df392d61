//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window-system events into `InputEvent`s,
//! which `InputState::apply_event` folds into frame-scoped state.

mod keyboard;
mod mouse;
mod state;
mod types;

pub mod platform;

pub use keyboard::KeyboardState;
pub use mouse::{MouseState, TRACKED_BUTTONS};
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton, MouseWheelDelta, PIXELS_PER_LINE};
