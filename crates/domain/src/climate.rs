//! Climate modes and the traits a climate device advertises.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating mode of a climate device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateMode {
    Off,
    HeatCool,
    Cool,
    Heat,
    FanOnly,
    Dry,
    Auto,
}

impl fmt::Display for ClimateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::HeatCool => "heat_cool",
            Self::Cool => "cool",
            Self::Heat => "heat",
            Self::FanOnly => "fan_only",
            Self::Dry => "dry",
            Self::Auto => "auto",
        })
    }
}

/// Fan speed setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanMode {
    On,
    Off,
    Auto,
    Low,
    Medium,
    High,
}

/// Louver swing setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingMode {
    Off,
    Both,
    Vertical,
    Horizontal,
}

/// What a climate device exposes to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateTraits {
    pub supported_modes: BTreeSet<ClimateMode>,
    pub supports_current_temperature: bool,
    pub supports_two_point_target_temperature: bool,
    pub visual_min_temperature: f32,
    pub visual_max_temperature: f32,
    pub visual_temperature_step: f32,
    pub supported_fan_modes: BTreeSet<FanMode>,
    pub supported_swing_modes: BTreeSet<SwingMode>,
}

impl ClimateTraits {
    #[must_use]
    pub fn supports_mode(&self, mode: ClimateMode) -> bool {
        self.supported_modes.contains(&mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_snake_case_mode() {
        assert_eq!(ClimateMode::FanOnly.to_string(), "fan_only");
        assert_eq!(ClimateMode::HeatCool.to_string(), "heat_cool");
    }

    #[test]
    fn should_serialize_fan_mode_in_snake_case() {
        let json = serde_json::to_string(&FanMode::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
