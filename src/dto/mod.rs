//! DTO modules that bridge page services with the list controller and views.

pub mod listing;
pub mod programmes;
pub mod quality;
