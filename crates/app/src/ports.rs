//! Port definitions — traits the build pass is written against.
//!
//! The climate_ir base capability and the device registry belong to the
//! surrounding framework. Expressing them as traits keeps the descriptor
//! testable with in-process implementations.

pub mod climate_ir;
pub mod registry;

pub use climate_ir::ClimateIrRegistrar;
pub use registry::DeviceRegistry;
