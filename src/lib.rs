//! List, filter and mutation coordination for the academic planning
//! dashboard.
//!
//! The `data` feature carries the runtime-free layer: domain types, forms,
//! pagination, the list state machine and reporting. The default `client`
//! feature adds the HTTP API client, resource gateways, the debounced list
//! controller and the page services built on them.

pub mod api;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod list;
pub mod pagination;
pub mod reporting;

#[cfg(feature = "client")]
pub mod gateway;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod services;

/// Read access to the planning pages.
pub const SERVICE_ACCESS_ROLE: &str = "planning";
/// Write access to the planning pages.
pub const SERVICE_ADMIN_ROLE: &str = "planning_admin";

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;
