//! Generation sessions
//!
//! A [`Session`] resolves one settings value for a single generation call,
//! drives the selected pattern through a fresh [`GcodeWriter`] and returns
//! the finished program. Sessions share nothing, so concurrent calls never
//! observe each other's state.

use crate::error::{ToolpathError, ToolpathResult};
use crate::frame::ProgramFrame;
use crate::patterns::PatternMode;
use crate::stats::EmissionStats;
use crate::writer::GcodeWriter;
use extrudekit_settings::{Settings, SettingsOverrides};
use tracing::{debug, info};

/// Settings resolved for one generation call.
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
}

/// Output of one pattern run.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutput {
    pub body: String,
    pub stats: EmissionStats,
}

impl Session {
    /// Layer `overrides` over `base` and validate the result.
    pub fn new(base: &Settings, overrides: &SettingsOverrides) -> ToolpathResult<Self> {
        let settings = if overrides.is_empty() {
            base.clone()
        } else {
            debug!(?overrides, "Applying settings overrides");
            base.with_overrides(overrides)
        };
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generate the pattern body for `mode` and `iteration`.
    pub fn run(&self, mode: PatternMode, iteration: u32) -> ToolpathResult<SessionOutput> {
        if iteration == 0 {
            return Err(ToolpathError::InvalidIteration(iteration));
        }

        let mut writer = GcodeWriter::new(&self.settings);
        mode.generate(&mut writer, iteration)?;

        let stats = *writer.stats();
        info!(
            %mode,
            iteration,
            moves = stats.total_moves(),
            filament_mm = stats.filament_used,
            "Generated pattern"
        );
        Ok(SessionOutput {
            body: writer.into_output(),
            stats,
        })
    }

    /// Generate the body wrapped in the start and end blocks of `frame`.
    pub fn run_framed(
        &self,
        frame: &dyn ProgramFrame,
        mode: PatternMode,
        iteration: u32,
    ) -> ToolpathResult<String> {
        let output = self.run(mode, iteration)?;
        let mut program = frame.start_block(iteration, &self.settings);
        program.push_str(&output.body);
        program.push_str(&frame.end_block(iteration));
        Ok(program)
    }
}

/// Generate the pattern body named by `mode`.
///
/// `mode` accepts `line`, `plane`, `cube` or their first letter in any
/// case. An unknown mode fails before any settings are resolved.
pub fn generate(
    mode: &str,
    iteration: u32,
    base: &Settings,
    overrides: &SettingsOverrides,
) -> ToolpathResult<String> {
    let mode: PatternMode = mode.parse()?;
    let session = Session::new(base, overrides)?;
    Ok(session.run(mode, iteration)?.body)
}

/// Like [`generate`], with the start and end blocks of `frame` around the
/// body.
pub fn generate_program(
    frame: &dyn ProgramFrame,
    mode: &str,
    iteration: u32,
    base: &Settings,
    overrides: &SettingsOverrides,
) -> ToolpathResult<String> {
    let mode: PatternMode = mode.parse()?;
    Session::new(base, overrides)?.run_framed(frame, mode, iteration)
}
