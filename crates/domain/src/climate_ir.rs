//! The `ClimateIr` interface shared by climate units driven by an IR remote.
//!
//! A concrete unit (e.g. [`WhynterClimate`](crate::whynter::WhynterClimate))
//! supplies its fixed [`IrCapabilities`]; the climate_ir registration routine
//! applies the inherited [`ClimateIrOptions`]; the traits advertised to the
//! frontend are derived from both.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::climate::{ClimateMode, ClimateTraits, FanMode, SwingMode};
use crate::component::DeclaredType;
use crate::id::ComponentId;

/// Fixed characteristics of an IR-controlled unit, set by its concrete type.
#[derive(Debug, Clone, PartialEq)]
pub struct IrCapabilities {
    /// Lowest settable temperature, in °C.
    pub minimum_temperature: f32,
    /// Highest settable temperature, in °C.
    pub maximum_temperature: f32,
    pub temperature_step: f32,
    pub supports_dry: bool,
    pub supports_fan_only: bool,
    pub fan_modes: BTreeSet<FanMode>,
    pub swing_modes: BTreeSet<SwingMode>,
}

/// Options inherited from the climate_ir base schema, once applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClimateIrOptions {
    pub name: Option<String>,
    pub transmitter: Option<ComponentId>,
    pub receiver: Option<ComponentId>,
    pub supports_cool: bool,
    pub supports_heat: bool,
}

impl Default for ClimateIrOptions {
    fn default() -> Self {
        Self {
            name: None,
            transmitter: None,
            receiver: None,
            supports_cool: true,
            supports_heat: true,
        }
    }
}

/// Non-owning link to the sensor a device reads its ambient temperature from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SensorRef(ComponentId);

impl SensorRef {
    #[must_use]
    pub fn new(id: ComponentId) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(&self) -> &ComponentId {
        &self.0
    }
}

/// Serializable view of a registered device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub name: Option<String>,
    pub transmitter: Option<ComponentId>,
    pub receiver: Option<ComponentId>,
    pub sensor: Option<SensorRef>,
    pub traits: ClimateTraits,
}

/// A climate device controlled by infrared remote commands.
pub trait ClimateIr: fmt::Debug {
    fn id(&self) -> &ComponentId;

    fn declared_type(&self) -> DeclaredType;

    fn capabilities(&self) -> IrCapabilities;

    fn options(&self) -> &ClimateIrOptions;

    /// Replace the inherited options. Called by the registration routine.
    fn apply_options(&mut self, options: ClimateIrOptions);

    fn sensor(&self) -> Option<&SensorRef>;

    /// Bind the sensor providing the current temperature.
    fn set_sensor(&mut self, sensor: SensorRef);

    /// Traits advertised to the frontend.
    fn traits(&self) -> ClimateTraits {
        let caps = self.capabilities();
        let options = self.options();

        let mut modes = BTreeSet::from([ClimateMode::Off, ClimateMode::HeatCool]);
        if options.supports_cool {
            modes.insert(ClimateMode::Cool);
        }
        if options.supports_heat {
            modes.insert(ClimateMode::Heat);
        }
        if caps.supports_dry {
            modes.insert(ClimateMode::Dry);
        }
        if caps.supports_fan_only {
            modes.insert(ClimateMode::FanOnly);
        }

        ClimateTraits {
            supported_modes: modes,
            supports_current_temperature: self.sensor().is_some(),
            supports_two_point_target_temperature: false,
            visual_min_temperature: caps.minimum_temperature,
            visual_max_temperature: caps.maximum_temperature,
            visual_temperature_step: caps.temperature_step,
            supported_fan_modes: caps.fan_modes,
            supported_swing_modes: caps.swing_modes,
        }
    }

    fn snapshot(&self) -> DeviceSnapshot {
        let options = self.options();
        DeviceSnapshot {
            id: self.id().clone(),
            type_name: self.declared_type().name,
            name: options.name.clone(),
            transmitter: options.transmitter.clone(),
            receiver: options.receiver.clone(),
            sensor: self.sensor().cloned(),
            traits: self.traits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_support_cool_and_heat_by_default() {
        let options = ClimateIrOptions::default();
        assert!(options.supports_cool);
        assert!(options.supports_heat);
        assert!(options.transmitter.is_none());
    }

    #[test]
    fn should_serialize_sensor_ref_as_plain_id() {
        let sensor = SensorRef::new(ComponentId::parse("temp_sensor_1").unwrap());
        let json = serde_json::to_string(&sensor).unwrap();
        assert_eq!(json, "\"temp_sensor_1\"");
    }
}
