//! Mock gateway implementations for isolating services in tests.

use mockall::mock;

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
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, AuthGateway, CategoryListQuery,
    CategoryReader, CategoryTreeQuery, CategoryWriter, NewsListQuery, NewsReader, NewsWriter,
    ReportQuery, ReportReader, TagLookupQuery, TagReader, TagWriter,
};

mock! {
    pub Repository {}

    impl AuthGateway for Repository {
        fn login(&self, credentials: &Credentials) -> RepositoryResult<ApiResponse<String>>;
    }

    impl AccountReader for Repository {
        fn list_accounts(&self, query: &AccountListQuery) -> RepositoryResult<PageResult<Account>>;
        fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
        fn get_profile(&self) -> RepositoryResult<Account>;
    }

    impl AccountWriter for Repository {
        fn create_account(&self, account: &NewAccount) -> RepositoryResult<String>;
        fn update_account(&self, id: AccountId, updates: &UpdateAccount) -> RepositoryResult<String>;
        fn delete_account(&self, id: AccountId) -> RepositoryResult<String>;
        fn update_profile(&self, updates: &UpdateProfile) -> RepositoryResult<Account>;
        fn change_password(&self, change: &ChangePassword) -> RepositoryResult<String>;
    }

    impl CategoryReader for Repository {
        fn list_categories(
            &self,
            query: &CategoryListQuery,
        ) -> RepositoryResult<PageResult<Category>>;
        fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
        fn category_tree(&self, query: CategoryTreeQuery) -> RepositoryResult<Vec<CategoryNode>>;
    }

    impl CategoryWriter for Repository {
        fn create_category(&self, category: &CategoryPayload) -> RepositoryResult<String>;
        fn update_category(
            &self,
            id: CategoryId,
            category: &CategoryPayload,
        ) -> RepositoryResult<String>;
        fn delete_category(&self, id: CategoryId) -> RepositoryResult<String>;
        fn unlock_category(&self, id: CategoryId) -> RepositoryResult<String>;
    }

    impl NewsReader for Repository {
        fn list_news(
            &self,
            query: &NewsListQuery,
        ) -> RepositoryResult<PageResult<NewsArticleSummary>>;
        fn get_news_by_id(&self, id: NewsArticleId) -> RepositoryResult<Option<NewsArticle>>;
    }

    impl NewsWriter for Repository {
        fn create_news(&self, article: &NewsPayload) -> RepositoryResult<String>;
        fn update_news(&self, id: NewsArticleId, article: &NewsPayload) -> RepositoryResult<String>;
        fn delete_news(&self, id: NewsArticleId) -> RepositoryResult<String>;
    }

    impl TagReader for Repository {
        fn lookup_tags(&self, query: &TagLookupQuery) -> RepositoryResult<Vec<Tag>>;
    }

    impl TagWriter for Repository {
        fn create_tag(&self, tag: &NewTag) -> RepositoryResult<TagId>;
    }

    impl ReportReader for Repository {
        fn news_report(&self, query: &ReportQuery) -> RepositoryResult<Report>;
    }
}
