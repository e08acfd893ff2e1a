//! Configuration module for Runora
//!
//! - Path resolution (env override, platform config directory)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RunoraPaths;
pub use settings::{RolloverPolicy, Settings};
