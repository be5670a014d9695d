//! Whynter descriptor — declares the schema of `platform = "whynter"`
//! climate entries and turns a resolved record into a registered device.

use irbuild_domain::climate_ir::SensorRef;
use irbuild_domain::component::Capability;
use irbuild_domain::error::{BuildError, ValidationError};
use irbuild_domain::platform::TargetPlatform;
use irbuild_domain::schema::{CONF_ID, CONF_SENSOR, OptionKind, OptionSpec, Schema, ValidatedRecord};
use irbuild_domain::whynter::{WHYNTER_CLIMATE, WhynterClimate};

use crate::ports::{ClimateIrRegistrar, DeviceRegistry};

/// Components loaded as soon as a Whynter device is declared.
pub const AUTO_LOAD: &[&str] = &["climate_ir"];

/// Build-time descriptor of the Whynter climate platform.
#[derive(Debug, Clone, Copy)]
pub struct WhynterDescriptor {
    platform: TargetPlatform,
}

impl WhynterDescriptor {
    #[must_use]
    pub fn new(platform: TargetPlatform) -> Self {
        Self { platform }
    }

    /// The climate_ir base schema extended with the device id and an
    /// optional temperature sensor.
    #[must_use]
    pub fn schema<C: ClimateIrRegistrar>(climate_ir: &C) -> Schema {
        climate_ir.base_schema().extend([
            OptionSpec::declare_id(WHYNTER_CLIMATE),
            OptionSpec::optional(CONF_SENSOR, OptionKind::UseId(Capability::Sensor)),
        ])
    }

    /// Instantiate the device, register it through climate_ir and bind its
    /// sensor.
    ///
    /// `record` must come out of a build pass: ids generated, references
    /// resolved.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Validation`] if the record has no id, or the
    /// registration error of the climate_ir routine.
    #[tracing::instrument(skip_all, fields(path = %record.path()))]
    pub fn to_code<R, C>(
        &self,
        registry: &mut R,
        climate_ir: &C,
        record: &ValidatedRecord,
    ) -> Result<(), BuildError>
    where
        R: DeviceRegistry,
        C: ClimateIrRegistrar,
    {
        if self.platform == TargetPlatform::Esp8266 {
            tracing::warn!(
                "this component is not reliable on the ESP8266 platform, an ESP32 is highly recommended"
            );
        }

        let id = record
            .id(CONF_ID)
            .cloned()
            .ok_or_else(|| ValidationError::MissingRequired {
                path: record.path().key(CONF_ID),
            })?;
        let var =
            climate_ir.register_climate_ir(registry, Box::new(WhynterClimate::new(id)), record)?;

        if let Some(sensor) = record.id(CONF_SENSOR) {
            var.set_sensor(SensorRef::new(sensor.clone()));
        }
        Ok(())
    }
}
