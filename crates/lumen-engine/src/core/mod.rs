//! Application core.
//!
//! Owns the active scene, the input context and frame timing, and defines
//! one loop iteration (`Application::frame`). The platform runtime in
//! `window` decides when iterations happen and feeds device events in
//! between them.

mod app;
mod config;
mod phase;

pub use app::Application;
pub use config::AppConfig;
pub use phase::LoopPhase;
