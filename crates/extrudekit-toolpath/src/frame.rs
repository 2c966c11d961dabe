//! Program frames
//!
//! A frame supplies the printer-specific start and end blocks that wrap a
//! generated pattern body. The session treats both blocks as opaque text.

use chrono::{DateTime, Utc};
use extrudekit_core::format_decimal;
use extrudekit_settings::Settings;
use std::fmt::Write;

/// Start and end blocks for a printer.
pub trait ProgramFrame {
    /// Preamble emitted before the pattern body.
    fn start_block(&self, iteration: u32, settings: &Settings) -> String;

    /// Postamble emitted after the pattern body.
    fn end_block(&self, iteration: u32) -> String;
}

/// Frame with empty start and end blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BareFrame;

impl ProgramFrame for BareFrame {
    fn start_block(&self, _iteration: u32, _settings: &Settings) -> String {
        String::new()
    }

    fn end_block(&self, _iteration: u32) -> String {
        String::new()
    }
}

/// Intro line Y for the first iteration; later ones step up by
/// [`INTRO_STEP_Y`].
const INTRO_BASE_Y: f64 = 180.0;
const INTRO_STEP_Y: f64 = 3.0;
const INTRO_LENGTH: f64 = 20.0;
/// Park position after printing.
const PARK_X: f64 = 100.0;
const PARK_Y: f64 = 200.0;

/// Start and end blocks for a Prusa i3 MK3S running Marlin.
///
/// The start block sets machine limits, heats up, homes, levels the bed on
/// the first iteration and primes the nozzle with an intro line. The intro
/// line moves up 3mm per iteration so repeated runs on one sheet do not
/// overlap.
#[derive(Debug, Clone)]
pub struct PrusaMk3sFrame {
    pub nozzle_diameter: f64,
    /// Extruder temperature in °C
    pub extruder_temp: u32,
    /// Bed temperature in °C
    pub bed_temp: u32,
    /// Timestamp written into the header; the current time when unset
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for PrusaMk3sFrame {
    fn default() -> Self {
        Self {
            nozzle_diameter: 0.4,
            extruder_temp: 215,
            bed_temp: 60,
            generated_at: None,
        }
    }
}

impl PrusaMk3sFrame {
    /// Start and end X of the intro line for `iteration`, with its Y.
    pub fn intro_line(iteration: u32) -> (f64, f64, f64) {
        let y = INTRO_BASE_Y + f64::from(iteration) * INTRO_STEP_Y;
        let x1 = if y > 200.0 { 140.0 } else { 40.0 };
        (x1, x1 + INTRO_LENGTH, y)
    }
}

impl ProgramFrame for PrusaMk3sFrame {
    fn start_block(&self, iteration: u32, settings: &Settings) -> String {
        let timestamp = self.generated_at.unwrap_or_else(Utc::now);
        let first_layer = format_decimal(settings.first_layer_height, settings.z_round);
        let (intro_x1, intro_x2, intro_y) = Self::intro_line(iteration);

        let mut gcode = String::new();
        let _ = writeln!(
            gcode,
            "; generated by ExtrudeKit {} on {} UTC",
            env!("CARGO_PKG_VERSION"),
            timestamp.format("%Y-%m-%d at %H:%M:%S")
        );
        let _ = writeln!(gcode, "; extruder: {}\n", settings.extruder_name);

        gcode.push_str("M73 P0 R0.45\nM73 Q0 S0.45\n");
        gcode.push_str("M201 X1000 Y1000 Z200 E5000 ; sets maximum accelerations, mm/sec^2\n");
        gcode.push_str("M203 X200 Y200 Z12 E120 ; sets maximum feedrates, mm / sec\n");
        gcode.push_str(
            "M204 P1250 R1250 T1250 ; sets acceleration (P, T) and retract acceleration (R), mm/sec^2\n",
        );
        gcode.push_str("M205 X8.00 Y8.00 Z0.40 E4.50 ; sets the jerk limits, mm/sec\n");
        gcode.push_str("M205 S0 T0 ; sets the minimum extruding and travel feed rate, mm/sec\n");
        gcode.push_str("M107\n");

        gcode.push_str(";TYPE:Custom\n");
        gcode.push_str("M862.3 P \"MK3S\" ; printer model check\n");
        let _ = writeln!(
            gcode,
            "M862.1 P{} ; nozzle diameter check",
            format_decimal(self.nozzle_diameter, 2)
        );
        gcode.push_str("M115 U3.11.0 ; tell printer latest fw version\n");
        gcode.push_str("G90 ; use absolute coordinates\n");
        gcode.push_str("M83 ; extruder relative mode\n");
        let _ = writeln!(gcode, "M104 S{} ; set extruder temp", self.extruder_temp);
        let _ = writeln!(gcode, "M140 S{} ; set bed temp", self.bed_temp);
        let _ = writeln!(gcode, "M109 S{} ; wait for extruder temp", self.extruder_temp);
        gcode.push_str("G28 W ; home all without mesh bed level\n");
        if iteration == 1 {
            gcode.push_str("G80 ; mesh bed leveling\n");
        }
        gcode.push('\n');

        let _ = writeln!(gcode, "G1 Z{} F720", first_layer);
        let _ = writeln!(gcode, "G1 Y{} F1000", format_decimal(intro_y, 3));
        gcode.push_str("G92 E0\n");
        let _ = writeln!(gcode, "G1 X{} E9 F1000 ; intro line", format_decimal(intro_x1, 3));
        let _ = writeln!(gcode, "G1 X{} E9 F1000 ; intro line\n", format_decimal(intro_x2, 3));

        gcode.push_str("G92 E0\nM221 S95\n\n");
        gcode.push_str("M907 E538 ; set extruder motor current\n");
        gcode.push_str("G21 ; set units to millimeters\n");
        gcode.push_str("G90 ; use absolute coordinates\n");
        gcode.push_str("M83 ; use relative distances for extrusion\n");
        gcode.push_str("M900 K0 ; Filament gcode LA 1.5\n");
        gcode.push_str("M107\n");

        let _ = writeln!(
            gcode,
            ";LAYER_CHANGE\n;Z:{0}\n;HEIGHT:{0}\n;BEFORE_LAYER_CHANGE\nG92 E0.0\n;{0}\n",
            first_layer
        );
        gcode
    }

    fn end_block(&self, _iteration: u32) -> String {
        let mut gcode = String::new();
        gcode.push_str("G1 Z9 F720 ; Move print head up\n");
        let _ = writeln!(gcode, "G1 X{} Y{} F3600 ; park", PARK_X, PARK_Y);
        gcode.push_str("G1 Z57 F720 ; Move print head further up\n");
        gcode.push_str("G4 ; wait\n");
        gcode.push_str("M221 S100 ; reset flow\n\n");
        gcode.push_str("M104 S0 ; turn off temperature\n");
        gcode.push_str("M140 S0 ; turn off heatbed\n");
        gcode.push_str("M107 ; turn off fan\n");
        gcode.push_str("M84 ; disable motors\n");
        gcode.push_str("M73 P100 R0\nM73 Q100 S0\n");
        gcode
    }
}
