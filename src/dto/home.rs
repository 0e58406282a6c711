//! Payloads backing the public reader view.

use crate::domain::category::CategoryNode;
use crate::domain::news::NewsArticleSummary;
use crate::domain::types::CategoryId;
use crate::pagination::PageResult;

/// Data required to render the public homepage.
#[derive(Debug, Clone, Default)]
pub struct HomePageData {
    /// Category tree for the navigation bar; empty when it failed to load.
    pub categories: Vec<CategoryNode>,
    pub news: PageResult<NewsArticleSummary>,
    pub selected_category: Option<CategoryId>,
    /// Name of the selected category, resolved from the tree.
    pub selected_category_name: Option<String>,
    /// Whether the "logged out" notice must be shown on this load.
    pub show_logout_notice: bool,
}

/// What the reader asked for on the homepage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeQuery {
    pub category_id: Option<CategoryId>,
    pub page: usize,
    pub search: Option<String>,
}

impl Default for HomeQuery {
    fn default() -> Self {
        Self {
            category_id: None,
            page: 1,
            search: None,
        }
    }
}

impl HomeQuery {
    /// Switches category and goes back to the first page.
    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the search term and goes back to the first page.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self.page = 1;
        self
    }
}
