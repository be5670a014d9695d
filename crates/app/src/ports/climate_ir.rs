//! climate_ir port — the base capability every IR climate platform extends.

use irbuild_domain::climate_ir::ClimateIr;
use irbuild_domain::error::BuildError;
use irbuild_domain::schema::{Schema, ValidatedRecord};

use crate::ports::DeviceRegistry;

/// Inherited schema and registration routine of the climate_ir capability.
///
/// Platform descriptors treat both as an opaque contract: they extend the
/// schema with their own options and hand every record back unchanged.
pub trait ClimateIrRegistrar {
    /// Options every IR climate platform inherits.
    fn base_schema(&self) -> Schema;

    /// Apply the inherited options of `record` to `device` and register it.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry refuses the device.
    fn register_climate_ir<'r, R>(
        &self,
        registry: &'r mut R,
        device: Box<dyn ClimateIr>,
        record: &ValidatedRecord,
    ) -> Result<&'r mut dyn ClimateIr, BuildError>
    where
        R: DeviceRegistry;
}
