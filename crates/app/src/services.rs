//! Application services — build use-case implementations.
//!
//! Services accept port implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from the
//! surrounding framework.

pub mod build_service;
pub mod climate_ir;
pub mod whynter;
