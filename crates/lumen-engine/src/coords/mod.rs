//! Coordinate types shared by the runtime and scenes.
//!
//! - window space: logical pixels, origin top-left, +Y down
//! - clip space (NDC): origin center, +Y up, [-1, 1] on both axes

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
