//! Target platform the firmware is built for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Microcontroller family (or host simulation) the build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    #[default]
    Esp32,
    Esp8266,
    Host,
}

impl TargetPlatform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Esp32 => "esp32",
            Self::Esp8266 => "esp8266",
            Self::Host => "host",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target platform `{0}`")]
pub struct UnknownTargetPlatform(pub String);

impl FromStr for TargetPlatform {
    type Err = UnknownTargetPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "esp32" => Ok(Self::Esp32),
            "esp8266" => Ok(Self::Esp8266),
            "host" => Ok(Self::Host),
            _ => Err(UnknownTargetPlatform(s.to_string())),
        }
    }
}
