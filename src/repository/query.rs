//! Typed request parameters for the list and lookup endpoints.
//!
//! Every optional constraint is an `Option`; [`ListQuery::to_params`] emits
//! only the values that are set, so an absent filter always means "no
//! constraint" and never an empty string or zero.

use chrono::NaiveDate;

use crate::domain::types::{CategoryId, NewsStatus, Role};
use crate::pagination::{Pagination, Sort};

/// Query string pairs sent to the API.
pub type Params = Vec<(&'static str, String)>;

/// Default page size of the public reader listing.
pub const READER_PAGE_SIZE: usize = 6;
/// Sort field used by news listings.
pub const SORT_BY_CREATED_DATE: &str = "CreatedDate";

/// Request struct of a paginated, filterable list endpoint.
pub trait ListQuery: Clone + std::fmt::Debug {
    /// One named filter together with its new value.
    type Filter;

    /// Applies a filter change, returning whether the value actually changed.
    fn apply(&mut self, filter: Self::Filter) -> bool;

    /// Sets the free-text search; blank terms clear it.
    fn set_search(&mut self, term: Option<String>);

    fn set_pagination(&mut self, pagination: Pagination);

    fn set_sort(&mut self, sort: Option<Sort>);

    fn to_params(&self) -> Params;
}

fn normalize_term(term: Option<String>) -> Option<String> {
    term.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn push_paging(params: &mut Params, pagination: Option<Pagination>, sort: &Option<Sort>) {
    if let Some(pagination) = pagination {
        params.push(("PageNumber", pagination.page.to_string()));
        params.push(("PageSize", pagination.per_page.to_string()));
    }
    if let Some(sort) = sort {
        params.push(("SortBy", sort.field.clone()));
        params.push(("SortOrder", sort.direction.as_param().to_string()));
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Filters of `GET /Accounts`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountListQuery {
    /// Matched against the account email.
    pub search: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub pagination: Option<Pagination>,
    pub sort: Option<Sort>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccountFilter {
    Name(Option<String>),
    Role(Option<Role>),
}

impl AccountListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search(Some(term.into()));
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

impl ListQuery for AccountListQuery {
    type Filter = AccountFilter;

    fn apply(&mut self, filter: AccountFilter) -> bool {
        match filter {
            AccountFilter::Name(name) => replace(&mut self.name, normalize_term(name)),
            AccountFilter::Role(role) => replace(&mut self.role, role),
        }
    }

    fn set_search(&mut self, term: Option<String>) {
        self.search = normalize_term(term);
    }

    fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = Some(pagination);
    }

    fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        if let Some(search) = &self.search {
            params.push(("AccountEmail", search.clone()));
        }
        if let Some(name) = &self.name {
            params.push(("AccountName", name.clone()));
        }
        if let Some(role) = self.role {
            params.push(("AccountRole", role.code().to_string()));
        }
        push_paging(&mut params, self.pagination, &self.sort);
        params
    }
}

/// Filters of `GET /Categories`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryListQuery {
    /// Matched against the category name.
    pub search: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub is_active: Option<bool>,
    pub pagination: Option<Pagination>,
    pub sort: Option<Sort>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryFilter {
    IsActive(Option<bool>),
    Parent(Option<CategoryId>),
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search(Some(term.into()));
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

impl ListQuery for CategoryListQuery {
    type Filter = CategoryFilter;

    fn apply(&mut self, filter: CategoryFilter) -> bool {
        match filter {
            CategoryFilter::IsActive(value) => replace(&mut self.is_active, value),
            CategoryFilter::Parent(value) => replace(&mut self.parent_id, value),
        }
    }

    fn set_search(&mut self, term: Option<String>) {
        self.search = normalize_term(term);
    }

    fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = Some(pagination);
    }

    fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        if let Some(search) = &self.search {
            params.push(("CategoryName", search.clone()));
        }
        if let Some(parent_id) = self.parent_id {
            params.push(("ParentCategoryId", parent_id.to_string()));
        }
        if let Some(is_active) = self.is_active {
            params.push(("IsActive", is_active.to_string()));
        }
        push_paging(&mut params, self.pagination, &self.sort);
        params
    }
}

/// Which news listing a [`NewsListQuery`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsScope {
    /// `GET /NewsArticles`, the public reader listing.
    #[default]
    Public,
    /// `GET /NewsArticles/my-news`, articles authored by the caller.
    Mine,
}

/// Filters of the news listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsListQuery {
    pub scope: NewsScope,
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<NewsStatus>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
    pub sort: Option<Sort>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewsFilter {
    Category(Option<CategoryId>),
    Status(Option<NewsStatus>),
    CreatedFrom(Option<NaiveDate>),
    CreatedTo(Option<NaiveDate>),
}

impl NewsListQuery {
    /// Public listing defaults: published articles, newest first, six per page.
    pub fn public() -> Self {
        Self {
            scope: NewsScope::Public,
            status: Some(NewsStatus::Active),
            pagination: Some(Pagination::new(1, READER_PAGE_SIZE)),
            sort: Some(Sort::new(
                SORT_BY_CREATED_DATE,
                crate::pagination::SortDirection::Desc,
            )),
            ..Self::default()
        }
    }

    /// Articles authored by the signed-in account.
    pub fn mine() -> Self {
        Self {
            scope: NewsScope::Mine,
            sort: Some(Sort::new(
                SORT_BY_CREATED_DATE,
                crate::pagination::SortDirection::Desc,
            )),
            ..Self::default()
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search(Some(term.into()));
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn status(mut self, status: NewsStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

impl ListQuery for NewsListQuery {
    type Filter = NewsFilter;

    fn apply(&mut self, filter: NewsFilter) -> bool {
        match filter {
            NewsFilter::Category(value) => replace(&mut self.category_id, value),
            NewsFilter::Status(value) => replace(&mut self.status, value),
            NewsFilter::CreatedFrom(value) => replace(&mut self.created_from, value),
            NewsFilter::CreatedTo(value) => replace(&mut self.created_to, value),
        }
    }

    fn set_search(&mut self, term: Option<String>) {
        self.search = normalize_term(term);
    }

    fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = Some(pagination);
    }

    fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        if let Some(search) = &self.search {
            let key = match self.scope {
                NewsScope::Public => "SearchTerm",
                NewsScope::Mine => "NewsTitle",
            };
            params.push((key, search.clone()));
        }
        if let Some(category_id) = self.category_id {
            params.push(("CategoryId", category_id.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("NewsStatus", status.as_param().to_string()));
        }
        if let Some(from) = self.created_from {
            params.push(("CreatedDateFrom", start_of_day(from)));
        }
        if let Some(to) = self.created_to {
            params.push(("CreatedDateTo", end_of_day(to)));
        }
        push_paging(&mut params, self.pagination, &self.sort);
        params
    }
}

/// Parameters of `GET /Categories/dropdown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTreeQuery {
    pub include_inactive: bool,
    pub include_parent_categories_only: bool,
}

impl CategoryTreeQuery {
    pub fn to_params(&self) -> Params {
        vec![
            ("IncludeInactive", self.include_inactive.to_string()),
            (
                "IncludeParentCategoriesOnly",
                self.include_parent_categories_only.to_string(),
            ),
        ]
    }
}

/// Parameters of `GET /Tags/lookup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLookupQuery {
    pub tag_name: String,
}

impl TagLookupQuery {
    pub fn to_params(&self) -> Params {
        vec![("TagName", self.tag_name.clone())]
    }
}

/// Parameters of `GET /NewsArticles/report`, inclusive of both days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportQuery {
    pub fn to_params(&self) -> Params {
        vec![
            ("StartDate", start_of_day(self.start)),
            ("EndDate", end_of_day(self.end)),
        ]
    }
}

fn start_of_day(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

fn end_of_day(date: NaiveDate) -> String {
    format!("{}T23:59:59", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(params: &Params) -> Vec<&'static str> {
        params.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn unset_filters_are_omitted() {
        let query = CategoryListQuery::new().paginate(1, 10);
        assert_eq!(keys(&query.to_params()), vec!["PageNumber", "PageSize"]);
    }

    #[test]
    fn is_active_filter_is_sent_when_set() {
        let query = CategoryListQuery::new().is_active(true).paginate(2, 20);
        let params = query.to_params();
        assert!(params.contains(&("IsActive", "true".to_string())));
        assert!(params.contains(&("PageNumber", "2".to_string())));
    }

    #[test]
    fn blank_search_is_not_sent() {
        let query = AccountListQuery::new().search("   ");
        assert!(query.to_params().is_empty());

        let query = AccountListQuery::new().search(" staff@news.io ").role(Role::Staff);
        assert_eq!(
            query.to_params(),
            vec![
                ("AccountEmail", "staff@news.io".to_string()),
                ("AccountRole", "1".to_string())
            ]
        );
    }

    #[test]
    fn news_search_key_depends_on_scope() {
        let public = NewsListQuery::public().search("election");
        let mine = NewsListQuery::mine().search("election");
        assert!(public.to_params().contains(&("SearchTerm", "election".to_string())));
        assert!(mine.to_params().contains(&("NewsTitle", "election".to_string())));
    }

    #[test]
    fn news_date_range_covers_whole_days() {
        let mut query = NewsListQuery::mine();
        query.apply(NewsFilter::CreatedFrom(NaiveDate::from_ymd_opt(2025, 11, 1)));
        query.apply(NewsFilter::CreatedTo(NaiveDate::from_ymd_opt(2025, 11, 30)));
        let params = query.to_params();
        assert!(params.contains(&("CreatedDateFrom", "2025-11-01T00:00:00".to_string())));
        assert!(params.contains(&("CreatedDateTo", "2025-11-30T23:59:59".to_string())));
    }

    #[test]
    fn apply_reports_whether_the_value_changed() {
        let mut query = CategoryListQuery::new();
        assert!(query.apply(CategoryFilter::IsActive(Some(false))));
        assert!(!query.apply(CategoryFilter::IsActive(Some(false))));
        assert!(query.apply(CategoryFilter::IsActive(None)));
    }
}
