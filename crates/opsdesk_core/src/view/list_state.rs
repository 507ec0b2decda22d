//! Search + pagination + surface state for one mounted list.

use crate::projection::ListQuery;
use crate::view::surface::Surface;

/// View state of a mounted module list. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewState<R> {
    search: String,
    page: usize,
    pub surface: Surface<R>,
}

impl<R> Default for ListViewState<R> {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            surface: Surface::Closed,
        }
    }
}

impl<R> ListViewState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Updates the search text and jumps back to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advances one page unless already on the last one.
    pub fn next_page(&mut self, page_count: usize) {
        if self.page < page_count {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Pulls the page back in range after the list shrank (e.g. a delete).
    pub fn clamp_page(&mut self, page_count: usize) {
        self.page = self.page.min(page_count.max(1));
    }

    pub fn query(&self) -> ListQuery {
        ListQuery::new(self.search.clone(), self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::ListViewState;

    #[test]
    fn search_change_resets_page() {
        let mut state = ListViewState::<()>::new();
        state.set_page(3);
        state.set_search("sharma");
        assert_eq!(state.page(), 1);
        assert_eq!(state.query().search, "sharma");
    }

    #[test]
    fn paging_stays_in_range() {
        let mut state = ListViewState::<()>::new();
        state.prev_page();
        assert_eq!(state.page(), 1);

        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.page(), 2);

        state.clamp_page(1);
        assert_eq!(state.page(), 1);

        state.set_page(0);
        assert_eq!(state.page(), 1);
    }
}
