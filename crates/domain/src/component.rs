//! Declared types and the capabilities they provide.
//!
//! A reference option asks for a [`Capability`] rather than a concrete type,
//! so any declared type providing it satisfies the reference.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a declared object can be used as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Component,
    Sensor,
    Climate,
    ClimateIr,
    RemoteTransmitter,
    RemoteReceiver,
}

impl Capability {
    /// Firmware-side type name of the capability.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Sensor => "sensor::Sensor",
            Self::Climate => "climate::Climate",
            Self::ClimateIr => "climate_ir::ClimateIR",
            Self::RemoteTransmitter => "remote_transmitter::RemoteTransmitterComponent",
            Self::RemoteReceiver => "remote_receiver::RemoteReceiverComponent",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Concrete type of a declared object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredType {
    pub name: &'static str,
    pub capabilities: &'static [Capability],
}

impl DeclaredType {
    #[must_use]
    pub const fn new(name: &'static str, capabilities: &'static [Capability]) -> Self {
        Self { name, capabilities }
    }

    /// Whether objects of this type satisfy a reference asking for `capability`.
    #[must_use]
    pub fn provides(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Stem of generated identifiers, e.g. `whynter_whynterclimate`.
    #[must_use]
    pub fn id_stem(&self) -> String {
        self.name.replace("::", "_").to_lowercase()
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const SENSOR: DeclaredType =
    DeclaredType::new("sensor::Sensor", &[Capability::Component, Capability::Sensor]);

pub const REMOTE_TRANSMITTER: DeclaredType = DeclaredType::new(
    "remote_transmitter::RemoteTransmitterComponent",
    &[Capability::Component, Capability::RemoteTransmitter],
);

pub const REMOTE_RECEIVER: DeclaredType = DeclaredType::new(
    "remote_receiver::RemoteReceiverComponent",
    &[Capability::Component, Capability::RemoteReceiver],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_provide_declared_capabilities() {
        assert!(SENSOR.provides(Capability::Sensor));
        assert!(SENSOR.provides(Capability::Component));
        assert!(!SENSOR.provides(Capability::Climate));
    }

    #[test]
    fn should_derive_id_stem_from_type_name() {
        assert_eq!(SENSOR.id_stem(), "sensor_sensor");
        assert_eq!(
            REMOTE_TRANSMITTER.id_stem(),
            "remote_transmitter_remotetransmittercomponent"
        );
    }

    #[test]
    fn should_display_capability_as_type_name() {
        assert_eq!(Capability::Sensor.to_string(), "sensor::Sensor");
    }
}
