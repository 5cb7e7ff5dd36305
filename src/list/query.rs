//! Pure translation of filter state and page number into request parameters.

use std::collections::BTreeMap;

use crate::list::filter::FilterState;

/// Parameters of one list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub filters: BTreeMap<String, String>,
}

/// Composes the request parameters for `page` of size `limit`.
///
/// `page` and `limit` are always present; unset filters are left out instead
/// of being sent as empty parameters.
pub fn compose(filters: &FilterState, page: usize, limit: usize) -> ListQuery {
    let filters = filters
        .active()
        .filter(|(name, _)| !matches!(*name, "page" | "limit"))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    ListQuery {
        page: page.max(1),
        limit: limit.max(1),
        filters,
    }
}

impl ListQuery {
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "page" | "limit" => None,
            _ => self.filters.get(name).map(String::as_str),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        matches!(name, "page" | "limit") || self.filters.contains_key(name)
    }

    /// Ordered parameter pairs, pagination first.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        pairs.extend(
            self.filters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        pairs
    }

    /// URL-encoded form, used for logging and page links.
    pub fn to_query_string(&self) -> String {
        serde_html_form::to_string(self.pairs()).unwrap_or_default()
    }
}
