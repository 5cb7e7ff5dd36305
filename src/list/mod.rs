//! List-view coordination shared by every management page.
//!
//! A page owns one [`state::ListState`] (or, with the `client` feature, one
//! [`controller::ListController`] driving it). Raw input lands in the
//! [`filter::FilterState`], is turned into a [`query::ListQuery`] by the pure
//! composer, and fetch results are reconciled against the sequence number of
//! the request that produced them.

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub mod filter;
pub mod mutation;
pub mod query;
pub mod state;

#[cfg(feature = "client")]
pub mod controller;
#[cfg(feature = "client")]
pub mod debounce;

/// Filter key carrying the debounced search term.
pub const SEARCH_FILTER: &str = "search";

/// Record with a stable identity used by optimistic patches.
pub trait ListItem {
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}
