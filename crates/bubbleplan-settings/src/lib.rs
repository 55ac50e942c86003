//! Bubbleplan Settings Crate
//!
//! Persisted editor configuration: project defaults, export parameters,
//! diagram style and the zone palette.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, ExportSettings};
pub use error::{SettingsError, SettingsResult};
