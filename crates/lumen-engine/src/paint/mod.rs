//! Color model shared between the application and graphics backends.

mod color;

pub use color::Color;
