//! Pagination envelope returned by list endpoints and the page-link window
//! rendered under every table.

use serde::{Deserialize, Serialize};

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page links for the pagination control; `None` marks an ellipsis.
pub fn page_links(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let current_page = current_page.max(1);
    get_pages(total_pages, current_page, 2, 2, 4, 2)
}

/// Canonical `{page, limit, total, pages}` metadata of a paged result.
///
/// Endpoints disagree on `pages` versus `totalPages`; both are accepted on the
/// way in and `pages` is recomputed from `total` and `limit` so that
/// `pages == ceil(total / limit)` always holds once normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEnvelope")]
pub struct PaginationEnvelope {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    page: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    total: usize,
    #[serde(default)]
    pages: Option<usize>,
    #[serde(default, rename = "totalPages")]
    total_pages: Option<usize>,
}

impl From<RawEnvelope> for PaginationEnvelope {
    fn from(raw: RawEnvelope) -> Self {
        let page = raw.page.unwrap_or(1);
        match raw.limit.filter(|limit| *limit > 0) {
            Some(limit) => Self::new(page, limit, raw.total),
            None => {
                let pages = raw.pages.or(raw.total_pages).unwrap_or(0);
                Self {
                    page: page.max(1),
                    limit: 0,
                    total: raw.total,
                    pages: if raw.total == 0 { 0 } else { pages.max(1) },
                }
            }
        }
    }
}

impl PaginationEnvelope {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        Self {
            page: page.max(1),
            limit,
            total,
            pages: total_pages(total, limit),
        }
    }

    /// Envelope for an unpaginated response holding `len` items.
    pub fn single_page(len: usize) -> Self {
        Self {
            page: 1,
            limit: len,
            total: len,
            pages: usize::from(len > 0),
        }
    }

    /// Same page with a different total, pages recomputed.
    pub fn with_total(self, total: usize) -> Self {
        if self.limit == 0 {
            return Self {
                total,
                pages: usize::from(total > 0),
                ..self
            };
        }
        Self::new(self.page, self.limit, total)
    }

    /// Number of items the current page must hold for this envelope.
    pub fn expected_len(&self) -> usize {
        if self.page == 0 || self.page > self.pages {
            return 0;
        }
        if self.limit == 0 {
            return self.total;
        }
        if self.page < self.pages {
            self.limit
        } else {
            self.total - (self.pages - 1) * self.limit
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn links(&self) -> Vec<Option<usize>> {
        page_links(self.pages, self.page)
    }
}

/// `ceil(total / limit)`; an empty result has zero pages.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if total == 0 {
        0
    } else if limit == 0 {
        1
    } else {
        total.div_ceil(limit)
    }
}

/// One page of items together with the envelope describing it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: PaginationEnvelope,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, pagination: PaginationEnvelope) -> Self {
        Self { items, pagination }
    }

    pub fn empty(page: usize, limit: usize) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationEnvelope::new(page, limit, 0),
        }
    }

    /// Whether the item count agrees with what the envelope announces.
    pub fn is_consistent(&self) -> bool {
        self.items.len() == self.pagination.expected_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_collapses_middle_pages() {
        assert_eq!(
            page_links(20, 10),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
        assert_eq!(page_links(3, 1), vec![Some(1), Some(2), Some(3)]);
        assert!(page_links(0, 1).is_empty());
    }

    #[test]
    fn accepts_total_pages_alias() {
        let envelope: PaginationEnvelope =
            serde_json::from_str(r#"{"page":2,"limit":10,"total":35,"totalPages":4}"#).unwrap();
        assert_eq!(envelope, PaginationEnvelope::new(2, 10, 35));
        assert_eq!(envelope.pages, 4);
    }

    #[test]
    fn recomputes_pages_from_total_and_limit() {
        let envelope: PaginationEnvelope =
            serde_json::from_str(r#"{"page":1,"limit":10,"total":21,"pages":7}"#).unwrap();
        assert_eq!(envelope.pages, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let envelope: PaginationEnvelope =
            serde_json::from_str(r#"{"page":1,"limit":10,"total":0,"pages":1}"#).unwrap();
        assert_eq!(envelope.pages, 0);
        assert_eq!(envelope.expected_len(), 0);
    }

    #[test]
    fn expected_len_matches_last_page_remainder() {
        assert_eq!(PaginationEnvelope::new(1, 10, 25).expected_len(), 10);
        assert_eq!(PaginationEnvelope::new(2, 10, 25).expected_len(), 10);
        assert_eq!(PaginationEnvelope::new(3, 10, 25).expected_len(), 5);
        assert_eq!(PaginationEnvelope::new(4, 10, 25).expected_len(), 0);
        assert_eq!(PaginationEnvelope::new(2, 10, 20).expected_len(), 10);
    }

    #[test]
    fn with_total_keeps_page_and_limit() {
        let envelope = PaginationEnvelope::new(2, 10, 20).with_total(21);
        assert_eq!(envelope, PaginationEnvelope::new(2, 10, 21));
        assert_eq!(envelope.pages, 3);
    }
}
