//! Provider-facing configuration (data) and strategies (behavior).
//!
//! `config` exposes the validated [`ProviderConfig`] (base URL plus client credentials).
//! `strategy` defines [`ProviderStrategy`], the capability set the generic client composes,
//! and `doccheck` implements it for the DocCheck login service.

pub mod config;
pub mod doccheck;
pub mod strategy;

pub use config::*;
pub use doccheck::*;
pub use strategy::*;
