//! Raw filter input owned by a list page.

use std::collections::BTreeMap;

use thiserror::Error;

/// Dropdown value meaning "no restriction".
pub const ALL_SENTINEL: &str = "all";

/// Whether a filter value means "unset" and must not reach the query.
pub fn is_unset(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == ALL_SENTINEL
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid query string: {0}")]
pub struct InvalidQueryString(String);

/// Flat `name -> value` map of the filters shown above a table.
///
/// Raw values are kept as typed so the inputs can be re-rendered; the
/// *effective* value is the trimmed one, with `""` and `"all"` meaning unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used when seeding pages.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Raw value as entered, empty when never set.
    pub fn raw(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Effective value, `None` when the filter is unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !is_unset(value))
    }

    /// Stores a raw value and reports whether the effective value changed.
    ///
    /// Switching between two unset spellings (`""` and `"all"`) or adding
    /// surrounding whitespace is not a change and must not trigger a fetch.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let before = self.get(&name).map(str::to_owned);
        self.values.insert(name.clone(), value.into());
        before.as_deref() != self.get(&name)
    }

    pub fn clear(&mut self, name: &str) -> bool {
        match self.values.remove(name) {
            Some(value) => !is_unset(&value),
            None => false,
        }
    }

    /// Drops every filter, reporting whether any of them was active.
    pub fn reset(&mut self) -> bool {
        let had_active = self.active().next().is_some();
        self.values.clear();
        had_active
    }

    /// Effective `(name, value)` pairs in name order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.trim()))
            .filter(|(_, value)| !is_unset(value))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Filters and page number read from the URL a page was opened with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitialQuery {
    pub filters: FilterState,
    pub page: usize,
}

impl InitialQuery {
    /// Parses `search=abc&status=EN_COURS&page=3`; `page`/`limit` are not filters.
    pub fn parse(query_string: &str) -> Result<Self, InvalidQueryString> {
        let pairs: Vec<(String, String)> = serde_html_form::from_str(query_string)
            .map_err(|err| InvalidQueryString(err.to_string()))?;

        let mut initial = InitialQuery {
            filters: FilterState::new(),
            page: 1,
        };
        for (name, value) in pairs {
            match name.as_str() {
                "page" => {
                    initial.page = value.trim().parse::<usize>().unwrap_or(1).max(1);
                }
                "limit" => {}
                _ => {
                    initial.filters.set(name, value);
                }
            }
        }
        Ok(initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_all_are_unset() {
        let filters = FilterState::new()
            .with("status", "all")
            .with("search", "   ")
            .with("salle", "B12");

        assert_eq!(filters.get("status"), None);
        assert_eq!(filters.get("search"), None);
        assert_eq!(filters.get("salle"), Some("B12"));
        assert_eq!(filters.active().collect::<Vec<_>>(), vec![("salle", "B12")]);
    }

    #[test]
    fn set_reports_effective_changes_only() {
        let mut filters = FilterState::new();

        assert!(!filters.set("status", ""));
        assert!(!filters.set("status", "all"));
        assert!(filters.set("status", "EN_COURS"));
        assert!(!filters.set("status", " EN_COURS "));
        assert!(filters.set("status", "all"));
        assert_eq!(filters.raw("status"), "all");
    }

    #[test]
    fn reset_reports_whether_anything_was_active() {
        let mut filters = FilterState::new().with("status", "all");
        assert!(!filters.reset());

        let mut filters = FilterState::new().with("search", "data");
        assert!(filters.reset());
        assert!(filters.is_empty());
    }

    #[test]
    fn initial_query_separates_page_from_filters() {
        let initial = InitialQuery::parse("search=data&status=all&page=3&limit=50").unwrap();

        assert_eq!(initial.page, 3);
        assert_eq!(initial.filters.get("search"), Some("data"));
        assert_eq!(initial.filters.get("status"), None);
        assert_eq!(initial.filters.get("limit"), None);
    }

    #[test]
    fn initial_query_defaults_bad_page_to_first() {
        let initial = InitialQuery::parse("page=zero").unwrap();
        assert_eq!(initial.page, 1);
        assert!(InitialQuery::parse("").unwrap().filters.is_empty());
    }
}
