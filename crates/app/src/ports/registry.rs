//! Registry port — where generated device instances end up.

use irbuild_domain::climate_ir::ClimateIr;
use irbuild_domain::error::BuildError;
use irbuild_domain::id::ComponentId;

/// Append-only registry of device instances, owned by the generated program.
pub trait DeviceRegistry {
    /// Take ownership of `device` and hand back a handle for further wiring.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Registry`] when a device with the same id is
    /// already registered.
    fn register(&mut self, device: Box<dyn ClimateIr>) -> Result<&mut dyn ClimateIr, BuildError>;

    fn get(&self, id: &ComponentId) -> Option<&dyn ClimateIr>;

    /// Every registered device, in registration order.
    fn devices(&self) -> Vec<&dyn ClimateIr>;
}
