//! Boundary with the external planning REST API.

pub mod envelope;
pub mod errors;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod session;
