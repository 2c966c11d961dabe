//! ExtrudeKit Settings Crate
//!
//! Physical machine constants, the fully resolved [`Settings`] record every
//! emitter reads, typed per-call overrides, and JSON/TOML persistence.

pub mod config;
pub mod error;
pub mod overrides;
pub mod profile;

pub use config::{default_config_path, Settings};
pub use error::{SettingsError, SettingsResult};
pub use overrides::SettingsOverrides;
pub use profile::MachineProfile;
