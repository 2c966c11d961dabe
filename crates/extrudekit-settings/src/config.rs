//! Resolved print settings
//!
//! [`Settings`] is the fully populated, immutable record that pattern
//! generators and emitters read. It is derived once from a
//! [`MachineProfile`] and then layered with per-call
//! [`SettingsOverrides`]; the base value is never mutated.
//!
//! Field names serialize in camelCase so settings files and override maps
//! share one vocabulary.

use crate::error::{SettingsError, SettingsResult};
use crate::overrides::SettingsOverrides;
use crate::profile::MachineProfile;
use extrudekit_core::geometry::{extrusion_ratio, Point2D};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Highest rounding precision accepted for XY and Z words.
const MAX_ROUND_DIGITS: u32 = 10;

/// Settings consumed by every toolpath operation.
///
/// Speeds are mm/min; lengths mm; `print_dir` degrees clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub first_layer_speed: f64,
    pub move_speed: f64,
    pub z_speed: f64,
    pub perim_speed: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub print_dir: f64,
    pub layer_height: f64,
    pub first_layer_height: f64,
    pub line_width: f64,
    pub line_spacing: f64,
    pub ext_ratio: f64,
    pub ext_mult: f64,
    pub anchor_ext_ratio: f64,
    pub anchor_line_width: f64,
    pub anchor_line_spacing: f64,
    pub anchor_perimeters: u32,
    pub retract_dist: f64,
    pub retract_speed: f64,
    pub unretract_speed: f64,
    pub xy_round: u32,
    pub z_round: u32,
    pub zhop_enable: bool,
    pub zhop_height: f64,
    pub extruder_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_profile(&MachineProfile::default())
    }
}

/// Centre-to-centre spacing of adjacent lines with rounded (stadium) edges.
fn rounded_line_spacing(line_width: f64, layer_height: f64) -> f64 {
    line_width - layer_height * (1.0 - FRAC_PI_4)
}

impl Settings {
    /// Resolve settings from physical constants, computing derived fields.
    pub fn from_profile(profile: &MachineProfile) -> Self {
        let ext_ratio = extrusion_ratio(
            profile.line_width,
            profile.layer_height,
            profile.filament_diameter,
        );
        let line_spacing = rounded_line_spacing(profile.line_width, profile.layer_height);

        Self {
            first_layer_speed: profile.first_layer_speed,
            move_speed: profile.travel_speed,
            z_speed: profile.z_speed,
            perim_speed: profile.perimeter_speed,
            center_x: profile.bed_x / 2.0,
            center_y: profile.bed_y / 2.0,
            print_dir: profile.print_direction,
            layer_height: profile.layer_height,
            first_layer_height: profile.first_layer_height,
            line_width: profile.line_width,
            line_spacing,
            ext_ratio,
            ext_mult: profile.extrusion_multiplier,
            anchor_ext_ratio: ext_ratio,
            anchor_line_width: profile.nozzle_diameter * (profile.anchor_line_ratio / 100.0),
            anchor_line_spacing: line_spacing,
            anchor_perimeters: profile.anchor_perimeters,
            retract_dist: profile.retract_distance,
            retract_speed: profile.retract_speed,
            unretract_speed: profile.unretract_speed,
            xy_round: profile.xy_round,
            z_round: profile.z_round,
            zhop_enable: profile.zhop_enable,
            zhop_height: profile.zhop_height,
            extruder_name: profile.extruder_name.clone(),
        }
    }

    /// Bed centre used as the pivot for `print_dir`.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.center_x, self.center_y)
    }

    /// Layer `overrides` on top of these settings, returning a new value.
    ///
    /// Derived fields are taken as given; overriding `lineWidth` does not
    /// recompute `extRatio`.
    pub fn with_overrides(&self, overrides: &SettingsOverrides) -> Self {
        let mut merged = self.clone();

        macro_rules! layer {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = overrides.$field {
                        merged.$field = value;
                    }
                )*
            };
        }

        layer!(
            first_layer_speed,
            move_speed,
            z_speed,
            perim_speed,
            center_x,
            center_y,
            print_dir,
            layer_height,
            first_layer_height,
            line_width,
            line_spacing,
            ext_ratio,
            ext_mult,
            anchor_ext_ratio,
            anchor_line_width,
            anchor_line_spacing,
            anchor_perimeters,
            retract_dist,
            retract_speed,
            unretract_speed,
            xy_round,
            z_round,
            zhop_enable,
            zhop_height,
        );

        merged
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("firstLayerSpeed", self.first_layer_speed),
            ("moveSpeed", self.move_speed),
            ("zSpeed", self.z_speed),
            ("perimSpeed", self.perim_speed),
            ("retractSpeed", self.retract_speed),
            ("unretractSpeed", self.unretract_speed),
            ("layerHeight", self.layer_height),
            ("firstLayerHeight", self.first_layer_height),
            ("lineWidth", self.line_width),
            ("lineSpacing", self.line_spacing),
            ("anchorLineSpacing", self.anchor_line_spacing),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)));
            }
        }

        let non_negative = [
            ("extRatio", self.ext_ratio),
            ("extMult", self.ext_mult),
            ("anchorExtRatio", self.anchor_ext_ratio),
            ("anchorLineWidth", self.anchor_line_width),
            ("retractDist", self.retract_dist),
            ("zhopHeight", self.zhop_height),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::invalid(key, format!("must be >= 0, got {}", value)));
            }
        }

        for (key, value) in [
            ("centerX", self.center_x),
            ("centerY", self.center_y),
            ("printDir", self.print_dir),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::invalid(key, "must be finite"));
            }
        }

        for (key, digits) in [("xyRound", self.xy_round), ("zRound", self.z_round)] {
            if digits > MAX_ROUND_DIGITS {
                return Err(SettingsError::invalid(
                    key,
                    format!("at most {} digits, got {}", MAX_ROUND_DIGITS, digits),
                ));
            }
        }

        Ok(())
    }

    /// Load settings from file (JSON or TOML). Missing keys take defaults.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let settings: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::LoadError(
                "Settings file must be .json or .toml".to_string(),
            ));
        };

        settings.validate()?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(SettingsError::SaveError(
                "Settings file must be .json or .toml".to_string(),
            ));
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

/// Platform settings location, e.g. `~/.config/extrudekit/settings.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("extrudekit").join("settings.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}
