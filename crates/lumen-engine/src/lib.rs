//! Lumen engine crate.
//!
//! A small rendering runtime: one window, a variable-step frame loop, a
//! single active scene, and frame-scoped input tracking.
//!
//! - `window` owns the platform loop and the GPU surface
//! - `core` defines one loop iteration and the scene lifecycle around it
//! - `scene` / `scenes` hold the scene contract and the built-in scenes
//! - `render` is the graphics API scenes draw through

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod scenes;
