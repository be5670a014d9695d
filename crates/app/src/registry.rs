//! In-memory device registry.

use irbuild_domain::climate_ir::ClimateIr;
use irbuild_domain::error::{BuildError, RegistryError};
use irbuild_domain::id::ComponentId;

use crate::ports::DeviceRegistry;

/// [`DeviceRegistry`] keeping devices in a vector, in registration order.
#[derive(Debug, Default)]
pub struct InMemoryDeviceRegistry {
    devices: Vec<Box<dyn ClimateIr>>,
}

impl DeviceRegistry for InMemoryDeviceRegistry {
    fn register(&mut self, device: Box<dyn ClimateIr>) -> Result<&mut dyn ClimateIr, BuildError> {
        if self.get(device.id()).is_some() {
            return Err(RegistryError::AlreadyRegistered {
                id: device.id().clone(),
            }
            .into());
        }
        tracing::debug!(device = %device.id(), kind = device.declared_type().name, "registered device");
        let index = self.devices.len();
        self.devices.push(device);
        Ok(&mut *self.devices[index])
    }

    fn get(&self, id: &ComponentId) -> Option<&dyn ClimateIr> {
        self.devices
            .iter()
            .find(|device| device.id() == id)
            .map(|device| &**device)
    }

    fn devices(&self) -> Vec<&dyn ClimateIr> {
        self.devices.iter().map(|device| &**device).collect()
    }
}
