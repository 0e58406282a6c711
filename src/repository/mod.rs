//! Gateway traits over the remote news platform API.
//!
//! The remote API plays the role a database plays for a server: every
//! reader/writer pair below is implemented over HTTP by
//! [`http::HttpRepository`] and by in-memory fakes in tests.

use crate::domain::account::{
    Account, ChangePassword, Credentials, NewAccount, UpdateAccount, UpdateProfile,
};
use crate::domain::category::{Category, CategoryNode, CategoryPayload};
use crate::domain::news::{NewsArticle, NewsArticleSummary, NewsPayload};
use crate::domain::report::Report;
use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::{AccountId, CategoryId, NewsArticleId, TagId};
use crate::dto::api::ApiResponse;
use crate::pagination::PageResult;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "client")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod query;

pub use query::{
    AccountFilter, AccountListQuery, CategoryFilter, CategoryListQuery, CategoryTreeQuery,
    ListQuery, NewsFilter, NewsListQuery, NewsScope, Params, ReportQuery, TagLookupQuery,
};

pub trait AuthGateway {
    /// Exchanges credentials for a bearer token carried in `data`.
    fn login(&self, credentials: &Credentials) -> RepositoryResult<ApiResponse<String>>;
}

pub trait AccountReader {
    fn list_accounts(&self, query: &AccountListQuery) -> RepositoryResult<PageResult<Account>>;
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
    fn get_profile(&self) -> RepositoryResult<Account>;
}

/// Mutations return the message reported by the server.
pub trait AccountWriter {
    fn create_account(&self, account: &NewAccount) -> RepositoryResult<String>;
    fn update_account(&self, id: AccountId, updates: &UpdateAccount) -> RepositoryResult<String>;
    fn delete_account(&self, id: AccountId) -> RepositoryResult<String>;
    fn update_profile(&self, updates: &UpdateProfile) -> RepositoryResult<Account>;
    fn change_password(&self, change: &ChangePassword) -> RepositoryResult<String>;
}

pub trait CategoryReader {
    fn list_categories(&self, query: &CategoryListQuery)
    -> RepositoryResult<PageResult<Category>>;
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    fn category_tree(&self, query: CategoryTreeQuery) -> RepositoryResult<Vec<CategoryNode>>;
}

pub trait CategoryWriter {
    fn create_category(&self, category: &CategoryPayload) -> RepositoryResult<String>;
    fn update_category(&self, id: CategoryId, category: &CategoryPayload)
    -> RepositoryResult<String>;
    /// Deletes the category, or deactivates it when articles still use it.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<String>;
    fn unlock_category(&self, id: CategoryId) -> RepositoryResult<String>;
}

pub trait NewsReader {
    /// Lists the public feed or the caller's own articles depending on
    /// [`NewsListQuery::scope`].
    fn list_news(&self, query: &NewsListQuery) -> RepositoryResult<PageResult<NewsArticleSummary>>;
    fn get_news_by_id(&self, id: NewsArticleId) -> RepositoryResult<Option<NewsArticle>>;
}

pub trait NewsWriter {
    fn create_news(&self, article: &NewsPayload) -> RepositoryResult<String>;
    fn update_news(&self, id: NewsArticleId, article: &NewsPayload) -> RepositoryResult<String>;
    fn delete_news(&self, id: NewsArticleId) -> RepositoryResult<String>;
}

pub trait TagReader {
    fn lookup_tags(&self, query: &TagLookupQuery) -> RepositoryResult<Vec<Tag>>;
}

pub trait TagWriter {
    fn create_tag(&self, tag: &NewTag) -> RepositoryResult<TagId>;
}

pub trait ReportReader {
    fn news_report(&self, query: &ReportQuery) -> RepositoryResult<Report>;
}
