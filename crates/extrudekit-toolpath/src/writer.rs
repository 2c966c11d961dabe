//! Motion emitters
//!
//! [`GcodeWriter`] owns the [`MachineState`] and the output buffer of one
//! generation session. Every emitter appends its G-code lines and advances
//! the state exactly once, so the state always describes the position after
//! the last emitted command.
//!
//! Coordinates handed to the emitters are in the unrotated pattern frame.
//! The `print_dir` rotation about the bed centre and the configured rounding
//! are applied when the X/Y words are written; the tracked state keeps full
//! precision.

use crate::state::MachineState;
use crate::stats::EmissionStats;
use extrudekit_core::{distance, rotate, round_to, GcodeCommand, Point2D};
use extrudekit_settings::Settings;
use std::fmt::Write;
use tracing::trace;

/// Travels longer than this retract first, in mm.
///
/// The retract test is strictly greater and the un-retract test is greater
/// or equal, so a travel of exactly this length leaves filament retracted
/// only if it already was.
pub const RETRACT_THRESHOLD_MM: f64 = 2.0;

/// Decimal places compared when deciding whether Z is on the first layer.
pub const LAYER_MATCH_PRECISION: u32 = 3;

/// Direction of a filament feed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDirection {
    /// Pull filament back, then hop up if Z-hop is enabled
    Retract,
    /// Drop back from the hop, then push filament forward
    Unretract,
}

/// Per-call options for [`GcodeWriter::extrude`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    /// Feed rate in mm/min; defaults to the layer speed
    pub speed: Option<f64>,
    /// Filament mm per mm of path; defaults to `ext_ratio`
    pub ext_ratio: Option<f64>,
    pub comment: &'static str,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            speed: None,
            ext_ratio: None,
            comment: "Print line",
        }
    }
}

impl ExtrudeOptions {
    pub fn commented(comment: &'static str) -> Self {
        Self {
            comment,
            ..Default::default()
        }
    }

    pub fn with_ext_ratio(mut self, ext_ratio: f64) -> Self {
        self.ext_ratio = Some(ext_ratio);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Emits G-code for one session, tracking machine state as it goes.
#[derive(Debug)]
pub struct GcodeWriter<'a> {
    settings: &'a Settings,
    state: MachineState,
    output: String,
    stats: EmissionStats,
}

impl<'a> GcodeWriter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self::with_state(settings, MachineState::default())
    }

    pub fn with_state(settings: &'a Settings, state: MachineState) -> Self {
        Self {
            settings,
            state,
            output: String::new(),
            stats: EmissionStats::default(),
        }
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn position(&self) -> Point2D {
        self.state.position()
    }

    pub fn stats(&self) -> &EmissionStats {
        &self.stats
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Append a command as one line.
    pub fn command(&mut self, command: &GcodeCommand) {
        trace!(%command, "emit");
        // Writing to a String cannot fail
        let _ = writeln!(self.output, "{}", command);
    }

    /// Append a `; text` comment line.
    pub fn comment(&mut self, text: &str) {
        let _ = writeln!(self.output, "; {}", text);
    }

    /// Move to a new layer height.
    pub fn move_z(&mut self, z: f64) {
        let cmd = GcodeCommand::new("G0")
            .z(z, self.settings.z_round)
            .feed(self.settings.z_speed)
            .comment("Move to z height");
        self.command(&cmd);
        self.state.z = z;
    }

    /// Non-extruding XY move.
    ///
    /// Travels longer than [`RETRACT_THRESHOLD_MM`] are wrapped in a
    /// retract / un-retract pair.
    pub fn move_xy(&mut self, target: Point2D, comment: &str) {
        let length = distance(self.state.position(), target);

        if length > RETRACT_THRESHOLD_MM && !self.state.retracted {
            self.feed(FeedDirection::Retract);
        }

        let out = self.rotated(target);
        let cmd = GcodeCommand::new("G0")
            .x(out.x, self.settings.xy_round)
            .y(out.y, self.settings.xy_round)
            .feed(self.settings.move_speed)
            .comment(comment);
        self.command(&cmd);
        self.state.set_position(target);
        self.stats.travel_moves += 1;
        self.stats.travel_distance += length;

        if length >= RETRACT_THRESHOLD_MM && self.state.retracted {
            self.feed(FeedDirection::Unretract);
        }
    }

    /// Extruding XY move from the current position to `target`.
    ///
    /// E is `ratio * ext_mult * length`. Without an explicit speed, moves on
    /// the first layer (Z equal to `first_layer_height` to
    /// [`LAYER_MATCH_PRECISION`] places) use `first_layer_speed` and all
    /// others use `perim_speed`.
    pub fn extrude(&mut self, target: Point2D, options: ExtrudeOptions) {
        let settings = self.settings;
        let length = distance(self.state.position(), target);
        let ratio = options.ext_ratio.unwrap_or(settings.ext_ratio);
        let e = ratio * settings.ext_mult * length;
        let speed = options.speed.unwrap_or_else(|| self.layer_speed());

        let out = self.rotated(target);
        let cmd = GcodeCommand::new("G1")
            .x(out.x, settings.xy_round)
            .y(out.y, settings.xy_round)
            .e(e)
            .feed(speed)
            .comment(options.comment);
        self.command(&cmd);
        self.state.set_position(target);
        self.stats.print_moves += 1;
        self.stats.print_distance += length;
        self.stats.filament_used += e;
    }

    /// Retract or un-retract filament, with Z-hop when enabled.
    ///
    /// Requests that match the current retraction state emit nothing. The
    /// hop moves the physical nozzle only; the tracked `z` stays at the
    /// layer height.
    pub fn feed(&mut self, direction: FeedDirection) {
        let settings = self.settings;
        match direction {
            FeedDirection::Retract => {
                if self.state.retracted {
                    return;
                }
                self.command(&Self::retract_command(settings));
                if settings.zhop_enable {
                    let cmd = GcodeCommand::new("G1")
                        .z(self.state.z + settings.zhop_height, settings.z_round)
                        .feed(settings.z_speed)
                        .comment("Z hop");
                    self.command(&cmd);
                }
                self.state.retracted = true;
                self.stats.retractions += 1;
            }
            FeedDirection::Unretract => {
                if !self.state.retracted {
                    return;
                }
                if settings.zhop_enable {
                    let cmd = GcodeCommand::new("G1")
                        .z(self.state.z, settings.z_round)
                        .feed(settings.z_speed)
                        .comment("Z hop return");
                    self.command(&cmd);
                }
                let cmd = GcodeCommand::new("G1")
                    .e(settings.retract_dist)
                    .feed(settings.unretract_speed)
                    .comment("Un-retract");
                self.command(&cmd);
                self.state.retracted = false;
                self.stats.unretractions += 1;
            }
        }
    }

    /// Retract without Z-hop, used to finish a pattern.
    pub fn force_retract(&mut self) {
        if self.state.retracted {
            return;
        }
        self.command(&Self::retract_command(self.settings));
        self.state.retracted = true;
        self.stats.retractions += 1;
    }

    fn retract_command(settings: &Settings) -> GcodeCommand {
        GcodeCommand::new("G1")
            .e(-settings.retract_dist)
            .feed(settings.retract_speed)
            .comment("Retract")
    }

    fn layer_speed(&self) -> f64 {
        let on_first_layer = round_to(self.state.z, LAYER_MATCH_PRECISION)
            == round_to(self.settings.first_layer_height, LAYER_MATCH_PRECISION);
        if on_first_layer {
            self.settings.first_layer_speed
        } else {
            self.settings.perim_speed
        }
    }

    fn rotated(&self, point: Point2D) -> Point2D {
        if self.settings.print_dir == 0.0 {
            return point;
        }
        rotate(point, self.settings.center(), self.settings.print_dir)
    }
}
