//! # irbuild-app
//!
//! Application layer — build use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** the build talks to:
//!   - `DeviceRegistry` — append-only registry of generated devices
//!   - `ClimateIrRegistrar` — inherited schema and registration routine of
//!     the climate_ir base capability
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (symbol table, in-memory registry)
//! - Implement the **Whynter descriptor** and the **build pass** that
//!   validates every declaration, resolves references, then instantiates
//!
//! ## Dependency rule
//! Depends on `irbuild-domain` only (plus `tracing`).
//! Never imports the binary crate.

pub mod ports;
pub mod registry;
pub mod services;
pub mod symbol_table;
