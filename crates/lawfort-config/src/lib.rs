//! Configuration model and layered config loading for LawFort.
//!
//! This crate owns the config schema, validation, and the user/cwd/runtime
//! layering used by the terminal client.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Layered config types and loader options.
pub use loader::{
    API_BASE_ENV, ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions,
};
/// Configuration schema models.
pub use model::*;
