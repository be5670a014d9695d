//! Standard climate_ir registration routine.

use irbuild_domain::climate_ir::{ClimateIr, ClimateIrOptions};
use irbuild_domain::component::Capability;
use irbuild_domain::error::BuildError;
use irbuild_domain::schema::{
    CONF_NAME, CONF_RECEIVER_ID, CONF_SUPPORTS_COOL, CONF_SUPPORTS_HEAT, CONF_TRANSMITTER_ID,
    OptionKind, OptionSpec, Schema, ValidatedRecord,
};

use crate::ports::{ClimateIrRegistrar, DeviceRegistry};

/// [`ClimateIrRegistrar`] with the inherited options of an IR climate
/// device that can also listen to its own remote through a receiver.
///
/// | Option | Kind | When absent |
/// |--------|------|-------------|
/// | `name` | string | unnamed |
/// | `transmitter_id` | remote transmitter | the only declared transmitter |
/// | `receiver_id` | remote receiver | no receiver |
/// | `supports_cool` | boolean | `true` |
/// | `supports_heat` | boolean | `true` |
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardClimateIr;

impl ClimateIrRegistrar for StandardClimateIr {
    fn base_schema(&self) -> Schema {
        Schema::new(vec![
            OptionSpec::optional(CONF_NAME, OptionKind::String),
            OptionSpec::generated(
                CONF_TRANSMITTER_ID,
                OptionKind::UseId(Capability::RemoteTransmitter),
            ),
            OptionSpec::optional(
                CONF_RECEIVER_ID,
                OptionKind::UseId(Capability::RemoteReceiver),
            ),
            OptionSpec::with_default(CONF_SUPPORTS_COOL, OptionKind::Bool, true),
            OptionSpec::with_default(CONF_SUPPORTS_HEAT, OptionKind::Bool, true),
        ])
    }

    #[tracing::instrument(skip_all, fields(device = %device.id()))]
    fn register_climate_ir<'r, R>(
        &self,
        registry: &'r mut R,
        mut device: Box<dyn ClimateIr>,
        record: &ValidatedRecord,
    ) -> Result<&'r mut dyn ClimateIr, BuildError>
    where
        R: DeviceRegistry,
    {
        let defaults = ClimateIrOptions::default();
        device.apply_options(ClimateIrOptions {
            name: record.string(CONF_NAME).map(str::to_string),
            transmitter: record.id(CONF_TRANSMITTER_ID).cloned(),
            receiver: record.id(CONF_RECEIVER_ID).cloned(),
            supports_cool: record
                .bool(CONF_SUPPORTS_COOL)
                .unwrap_or(defaults.supports_cool),
            supports_heat: record
                .bool(CONF_SUPPORTS_HEAT)
                .unwrap_or(defaults.supports_heat),
        });
        if let Some(receiver) = &device.options().receiver {
            tracing::debug!(%receiver, "listening for remote commands");
        }
        registry.register(device)
    }
}

/// Log the configuration of a registered device.
pub fn dump_config(device: &dyn ClimateIr) {
    let caps = device.capabilities();
    let options = device.options();
    tracing::info!(
        device = %device.id(),
        kind = device.declared_type().name,
        name = options.name.as_deref().unwrap_or(""),
        min_temperature = caps.minimum_temperature,
        max_temperature = caps.maximum_temperature,
        supports_cool = options.supports_cool,
        supports_heat = options.supports_heat,
        sensor = device.sensor().map(|s| s.id().as_str()),
        "IR climate"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use irbuild_domain::id::ComponentId;
    use irbuild_domain::option_value::{OptionValue, RawRecord};
    use irbuild_domain::schema::ConfigPath;
    use irbuild_domain::whynter::WhynterClimate;

    use crate::registry::InMemoryDeviceRegistry;

    fn id(value: &str) -> ComponentId {
        ComponentId::parse(value).unwrap()
    }

    fn validate(entries: &[(&str, &str)]) -> ValidatedRecord {
        let raw: RawRecord = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), OptionValue::from(*v)))
            .collect();
        StandardClimateIr
            .base_schema()
            .validate(&ConfigPath::root("climate").index(0), &raw)
            .unwrap()
    }

    #[test]
    fn should_generate_transmitter_and_default_supports_flags() {
        let schema = StandardClimateIr.base_schema();
        let record = schema
            .validate(&ConfigPath::root("climate").index(0), &RawRecord::new())
            .unwrap();
        assert!(record.is_pending(CONF_TRANSMITTER_ID));
        assert_eq!(record.bool(CONF_SUPPORTS_COOL), Some(true));
        assert_eq!(record.bool(CONF_SUPPORTS_HEAT), Some(true));
    }

    #[test]
    fn should_apply_inherited_options_and_register() {
        let mut registry = InMemoryDeviceRegistry::default();
        let record = validate(&[
            (CONF_NAME, "Bedroom AC"),
            (CONF_TRANSMITTER_ID, "ir_tx"),
            (CONF_RECEIVER_ID, "ir_rx"),
        ]);

        let device = StandardClimateIr
            .register_climate_ir(&mut registry, Box::new(WhynterClimate::new(id("ac1"))), &record)
            .unwrap();
        assert_eq!(device.options().name.as_deref(), Some("Bedroom AC"));
        assert_eq!(device.options().transmitter, Some(id("ir_tx")));
        assert_eq!(device.options().receiver, Some(id("ir_rx")));
        assert!(device.options().supports_cool);

        assert!(registry.get(&id("ac1")).is_some());
    }

    #[test]
    fn should_propagate_registry_rejection() {
        let mut registry = InMemoryDeviceRegistry::default();
        let record = validate(&[]);
        StandardClimateIr
            .register_climate_ir(&mut registry, Box::new(WhynterClimate::new(id("ac1"))), &record)
            .unwrap();

        let result = StandardClimateIr.register_climate_ir(
            &mut registry,
            Box::new(WhynterClimate::new(id("ac1"))),
            &record,
        );
        assert!(matches!(result, Err(BuildError::Registry(_))));
    }
}
