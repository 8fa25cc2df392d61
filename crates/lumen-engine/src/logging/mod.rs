//! Logging setup.
//!
//! Everything in the crate logs through the `log` facade; the binary picks
//! the backend by calling `init_logging` early in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
