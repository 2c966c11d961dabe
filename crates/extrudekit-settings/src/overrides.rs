//! Per-call settings overrides
//!
//! An override layer names only the settings a caller wants to change.
//! It is resolved against a base [`crate::Settings`] with
//! [`crate::Settings::with_overrides`], producing a new value per call.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Optional value for every overridable setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsOverrides {
    pub first_layer_speed: Option<f64>,
    pub move_speed: Option<f64>,
    pub z_speed: Option<f64>,
    pub perim_speed: Option<f64>,
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub print_dir: Option<f64>,
    pub layer_height: Option<f64>,
    pub first_layer_height: Option<f64>,
    pub line_width: Option<f64>,
    pub line_spacing: Option<f64>,
    pub ext_ratio: Option<f64>,
    pub ext_mult: Option<f64>,
    pub anchor_ext_ratio: Option<f64>,
    pub anchor_line_width: Option<f64>,
    pub anchor_line_spacing: Option<f64>,
    pub anchor_perimeters: Option<u32>,
    pub retract_dist: Option<f64>,
    pub retract_speed: Option<f64>,
    pub unretract_speed: Option<f64>,
    pub xy_round: Option<u32>,
    pub z_round: Option<u32>,
    pub zhop_enable: Option<bool>,
    pub zhop_height: Option<f64>,
}

impl SettingsOverrides {
    /// Every key an override map may contain.
    pub const KEYS: [&'static str; 24] = [
        "firstLayerSpeed",
        "moveSpeed",
        "zSpeed",
        "perimSpeed",
        "centerX",
        "centerY",
        "printDir",
        "layerHeight",
        "firstLayerHeight",
        "lineWidth",
        "lineSpacing",
        "extRatio",
        "extMult",
        "anchorExtRatio",
        "anchorLineWidth",
        "anchorLineSpacing",
        "anchorPerimeters",
        "retractDist",
        "retractSpeed",
        "unretractSpeed",
        "xyRound",
        "zRound",
        "zhopEnable",
        "zhopHeight",
    ];

    /// True when no setting is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse a JSON object such as `{"printDir": 45, "zhopEnable": false}`.
    pub fn from_json(text: &str) -> SettingsResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Parse a TOML table such as `printDir = 45`.
    pub fn from_toml(text: &str) -> SettingsResult<Self> {
        let table: toml::Table = toml::from_str(text)?;
        Self::from_value(serde_json::to_value(table)?)
    }

    /// Parse `key=value` entries, e.g. from a command line.
    ///
    /// Values are read as JSON scalars, so `true`, `45` and `0.2146` all work.
    pub fn from_pairs<I, S>(pairs: I) -> SettingsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Map::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| SettingsError::MalformedOverride(pair.to_string()))?;
            let key = key.trim();
            let raw = raw.trim();
            if key.is_empty() || raw.is_empty() {
                return Err(SettingsError::MalformedOverride(pair.to_string()));
            }
            let value = serde_json::from_str(raw)
                .unwrap_or_else(|_| Value::String(raw.to_string()));
            map.insert(key.to_string(), value);
        }
        Self::from_value(Value::Object(map))
    }

    fn from_value(value: Value) -> SettingsResult<Self> {
        if let Value::Object(map) = &value {
            if let Some(unknown) = map.keys().find(|k| !Self::KEYS.contains(&k.as_str())) {
                return Err(SettingsError::UnknownKey(unknown.clone()));
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}
