//! Declarations — one entry of the build file, before validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::{DeclaredType, REMOTE_RECEIVER, REMOTE_TRANSMITTER, SENSOR};
use crate::option_value::{OptionValue, RawRecord};
use crate::schema::CONF_PLATFORM;

/// Build file section a declaration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentDomain {
    Sensor,
    RemoteTransmitter,
    RemoteReceiver,
    Climate,
}

impl ComponentDomain {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::RemoteTransmitter => "remote_transmitter",
            Self::RemoteReceiver => "remote_receiver",
            Self::Climate => "climate",
        }
    }

    /// Type declared by entries of a domain owned by another component.
    ///
    /// Only their `id` is read; the rest of their options is opaque.
    /// Returns `None` for `climate`, whose entries go through a platform
    /// descriptor.
    #[must_use]
    pub fn external_type(self) -> Option<DeclaredType> {
        match self {
            Self::Sensor => Some(SENSOR),
            Self::RemoteTransmitter => Some(REMOTE_TRANSMITTER),
            Self::RemoteReceiver => Some(REMOTE_RECEIVER),
            Self::Climate => None,
        }
    }
}

impl fmt::Display for ComponentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Climate platforms known to the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimatePlatform {
    Whynter,
}

impl ClimatePlatform {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "whynter" => Some(Self::Whynter),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whynter => "whynter",
        }
    }
}

/// One entry of a build file section.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub domain: ComponentDomain,
    pub options: RawRecord,
}

impl Declaration {
    #[must_use]
    pub fn new(domain: ComponentDomain, options: RawRecord) -> Self {
        Self { domain, options }
    }

    /// The raw `platform` option, if any.
    #[must_use]
    pub fn platform(&self) -> Option<&OptionValue> {
        self.options.get(CONF_PLATFORM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_external_domains_to_declared_types() {
        assert_eq!(ComponentDomain::Sensor.external_type(), Some(SENSOR));
        assert_eq!(ComponentDomain::Climate.external_type(), None);
    }

    #[test]
    fn should_resolve_known_climate_platform() {
        assert_eq!(
            ClimatePlatform::from_name("whynter"),
            Some(ClimatePlatform::Whynter)
        );
        assert_eq!(ClimatePlatform::from_name("daikin"), None);
    }

    #[test]
    fn should_expose_platform_option() {
        let mut options = RawRecord::new();
        options.insert(CONF_PLATFORM.to_string(), "whynter".into());
        let decl = Declaration::new(ComponentDomain::Climate, options);
        assert_eq!(decl.platform().and_then(OptionValue::as_str), Some("whynter"));
    }
}
