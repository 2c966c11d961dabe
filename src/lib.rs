//! # ExtrudeKit
//!
//! Deterministic G-code generator for filament-deposition calibration
//! prints.
//!
//! ## Architecture
//!
//! ExtrudeKit is organized as a workspace with multiple crates:
//!
//! 1. **extrudekit-core** - Points, rectangles, rotation, rounding and the
//!    G-code command builder
//! 2. **extrudekit-settings** - Machine profiles, resolved settings,
//!    per-call overrides and settings files
//! 3. **extrudekit-toolpath** - Motion emitters, retraction, pattern
//!    generators, program frames and sessions
//! 4. **extrudekit** - Command-line binary that writes a program to stdout

pub use extrudekit_settings as settings;
pub use extrudekit_toolpath as toolpath;

pub use extrudekit_core::{GcodeCommand, Point2D, Rect};
pub use extrudekit_settings::{MachineProfile, Settings, SettingsError, SettingsOverrides};
pub use extrudekit_toolpath::{
    generate, generate_program, BareFrame, PatternMode, ProgramFrame, PrusaMk3sFrame, Session,
    ToolpathError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging
///
/// Sets up structured logging on stderr so generated G-code on stdout is
/// never interleaved with log lines. `RUST_LOG` takes precedence over
/// `default_level`.
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
