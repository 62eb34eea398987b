/// Shared error type and scene configuration for bpgfx.
///
/// Everything here is consumed by both the canvas library and the demo
/// binary; neither depends on the other's internals.

pub mod config;
pub mod error;

pub use config::SceneConfig;
pub use error::CoreError;
