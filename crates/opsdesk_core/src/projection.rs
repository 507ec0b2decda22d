//! Filtered and paginated list views over a record store.
//!
//! # Responsibility
//! - Case-insensitive substring search over module-chosen fields.
//! - Fixed-size, 1-based page slicing and page counting.
//!
//! # Invariants
//! - An empty query matches every record.
//! - Projections keep the store order; nothing is re-sorted.
//! - Concatenating pages `1..=page_count` reproduces the input exactly.

use crate::model::module::RecordModule;

/// Search text and 1-based page number for one list render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
        }
    }
}

impl ListQuery {
    pub fn new(search: impl Into<String>, page: usize) -> Self {
        Self {
            search: search.into(),
            page,
        }
    }
}

/// One rendered page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<'a, R> {
    pub items: Vec<&'a R>,
    /// Effective page number after normalization.
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Number of records that matched the search before slicing.
    pub total_matches: usize,
}

/// Returns the records where any search field contains `query`, ignoring case.
pub fn filter_records<'a, M: RecordModule>(
    records: &'a [M::Record],
    query: &str,
) -> Vec<&'a M::Record> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            M::search_fields(record)
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()))
        })
        .collect()
}

/// Number of pages needed for `len` items. Zero items means zero pages.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slices `items` to the given 1-based page.
///
/// Page `0` is read as page 1 and a page size of `0` as 1. Pages past the
/// end yield an empty slice.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Filters with `query.search`, then slices with `M::PAGE_SIZE`.
pub fn project<'a, M: RecordModule>(
    records: &'a [M::Record],
    query: &ListQuery,
) -> ListPage<'a, M::Record> {
    let matches = filter_records::<M>(records, &query.search);
    let page = query.page.max(1);
    let items = paginate(&matches, M::PAGE_SIZE, page).to_vec();

    ListPage {
        items,
        page,
        page_size: M::PAGE_SIZE.max(1),
        page_count: page_count(matches.len(), M::PAGE_SIZE),
        total_matches: matches.len(),
    }
}
