//! Domain records exchanged with the planning API.

pub mod auth;
pub mod evaluation;
pub mod intervenant;
pub mod log_entry;
pub mod module;
pub mod notification;
pub mod periode;
pub mod programme;
pub mod salle;
pub mod types;
pub mod user;
