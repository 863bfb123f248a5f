//! Auth-domain token models issued by the provider's token endpoint.

pub mod token;

pub use token::{secret::*, *};
