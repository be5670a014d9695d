//! # irbuild-domain
//!
//! Pure domain model for the irbuild device-declaration pipeline.
//!
//! ## Responsibilities
//! - Foundational types: component identifiers, error conventions, timestamps
//! - Describe **configuration schemas** as tables of option specs, and
//!   validate raw records against them
//! - Describe **declared types** and the capabilities references require
//! - Define the **`ClimateIr` interface** shared by IR-controlled climate units
//!   and the climate traits derived from it
//! - Define **`WhynterClimate`**, the Whynter portable air conditioner
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or IO crates.
//! Registries and the climate_ir registration routine are expressed as
//! traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod climate;
pub mod climate_ir;
pub mod component;
pub mod declaration;
pub mod option_value;
pub mod platform;
pub mod schema;
pub mod whynter;
