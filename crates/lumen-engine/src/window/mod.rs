//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, creates the wgpu
//! graphics for it, and drives `core::Application` once per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
