//! Whynter portable air conditioner, driven by its IR remote protocol.
//!
//! The unit only knows Fahrenheit set points between 62 °F and 86 °F; the
//! limits below are the same range in Celsius.

use std::collections::BTreeSet;

use crate::climate::FanMode;
use crate::climate_ir::{ClimateIr, ClimateIrOptions, IrCapabilities, SensorRef};
use crate::component::{Capability, DeclaredType};
use crate::id::ComponentId;

/// 62 °F
pub const WHYNTER_TEMP_MIN: f32 = 16.67;
/// 86 °F
pub const WHYNTER_TEMP_MAX: f32 = 30.0;
pub const WHYNTER_TEMP_STEP: f32 = 1.0;

pub const WHYNTER_CLIMATE: DeclaredType = DeclaredType::new(
    "whynter::WhynterClimate",
    &[
        Capability::Component,
        Capability::Climate,
        Capability::ClimateIr,
    ],
);

/// One Whynter unit declared in the build.
#[derive(Debug, Clone, PartialEq)]
pub struct WhynterClimate {
    id: ComponentId,
    options: ClimateIrOptions,
    sensor: Option<SensorRef>,
}

impl WhynterClimate {
    #[must_use]
    pub fn new(id: ComponentId) -> Self {
        Self {
            id,
            options: ClimateIrOptions::default(),
            sensor: None,
        }
    }
}

impl ClimateIr for WhynterClimate {
    fn id(&self) -> &ComponentId {
        &self.id
    }

    fn declared_type(&self) -> DeclaredType {
        WHYNTER_CLIMATE
    }

    fn capabilities(&self) -> IrCapabilities {
        IrCapabilities {
            minimum_temperature: WHYNTER_TEMP_MIN,
            maximum_temperature: WHYNTER_TEMP_MAX,
            temperature_step: WHYNTER_TEMP_STEP,
            supports_dry: true,
            supports_fan_only: true,
            fan_modes: BTreeSet::from([FanMode::Low, FanMode::Medium, FanMode::High]),
            swing_modes: BTreeSet::new(),
        }
    }

    fn options(&self) -> &ClimateIrOptions {
        &self.options
    }

    fn apply_options(&mut self, options: ClimateIrOptions) {
        self.options = options;
    }

    fn sensor(&self) -> Option<&SensorRef> {
        self.sensor.as_ref()
    }

    fn set_sensor(&mut self, sensor: SensorRef) {
        self.sensor = Some(sensor);
    }
}
