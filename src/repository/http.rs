//! Gateway implementation over the REST API.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::account::{
    Account, ChangePassword, Credentials, NewAccount, UpdateAccount, UpdateProfile,
};
use crate::domain::category::{Category, CategoryNode, CategoryPayload};
use crate::domain::news::{NewsArticle, NewsArticleSummary, NewsPayload};
use crate::domain::report::Report;
use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::{AccountId, CategoryId, NewsArticleId, TagId};
use crate::dto::api::ApiResponse;
use crate::http::HttpClient;
use crate::pagination::PageResult;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, AuthGateway, CategoryListQuery,
    CategoryReader, CategoryTreeQuery, CategoryWriter, ListQuery, NewsListQuery, NewsReader,
    NewsScope, NewsWriter, Params, ReportQuery, ReportReader, TagLookupQuery, TagReader,
    TagWriter,
};

/// Every gateway trait backed by one shared [`HttpClient`].
#[derive(Clone)]
pub struct HttpRepository {
    client: Arc<HttpClient>,
}

impl HttpRepository {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    fn fetch<T: DeserializeOwned>(&self, path: &str, params: &Params) -> RepositoryResult<T> {
        require_data(self.client.get(path, params)?, path)
    }

    /// Like [`HttpRepository::fetch`] but maps a 404 to `None`.
    fn fetch_optional<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<Option<T>> {
        match self.client.get::<T>(path, &Params::new()) {
            Ok(response) => Ok(response.data),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn require_data<T>(response: ApiResponse<T>, path: &str) -> RepositoryResult<T> {
    response
        .data
        .ok_or_else(|| RepositoryError::Decode(format!("response of {path} carried no data")))
}

fn message_of<T>(response: ApiResponse<T>) -> String {
    response.message
}

impl AuthGateway for HttpRepository {
    fn login(&self, credentials: &Credentials) -> RepositoryResult<ApiResponse<String>> {
        self.client.post("/Accounts/login", credentials)
    }
}

impl AccountReader for HttpRepository {
    fn list_accounts(&self, query: &AccountListQuery) -> RepositoryResult<PageResult<Account>> {
        self.fetch("/Accounts", &query.to_params())
    }

    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
        self.fetch_optional(&format!("/Accounts/{id}"))
    }

    fn get_profile(&self) -> RepositoryResult<Account> {
        self.fetch("/Accounts/profile", &Params::new())
    }
}

impl AccountWriter for HttpRepository {
    fn create_account(&self, account: &NewAccount) -> RepositoryResult<String> {
        self.client
            .post::<_, serde_json::Value>("/Accounts", account)
            .map(message_of)
    }

    fn update_account(&self, id: AccountId, updates: &UpdateAccount) -> RepositoryResult<String> {
        self.client
            .put::<_, serde_json::Value>(&format!("/Accounts/{id}"), updates)
            .map(message_of)
    }

    fn delete_account(&self, id: AccountId) -> RepositoryResult<String> {
        self.client
            .delete::<serde_json::Value>(&format!("/Accounts/{id}"))
            .map(message_of)
    }

    fn update_profile(&self, updates: &UpdateProfile) -> RepositoryResult<Account> {
        let response = self.client.put::<_, Account>("/Accounts/profile", updates)?;
        match response.data {
            Some(account) => Ok(account),
            None => self.get_profile(),
        }
    }

    fn change_password(&self, change: &ChangePassword) -> RepositoryResult<String> {
        self.client
            .put::<_, serde_json::Value>("/Accounts/profile", change)
            .map(message_of)
    }
}

impl CategoryReader for HttpRepository {
    fn list_categories(&self, query: &CategoryListQuery) -> RepositoryResult<PageResult<Category>> {
        self.fetch("/Categories", &query.to_params())
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        self.fetch_optional(&format!("/Categories/{id}"))
    }

    fn category_tree(&self, query: CategoryTreeQuery) -> RepositoryResult<Vec<CategoryNode>> {
        let response = self
            .client
            .get::<Vec<CategoryNode>>("/Categories/dropdown", &query.to_params())?;
        Ok(response.data.unwrap_or_default())
    }
}

impl CategoryWriter for HttpRepository {
    fn create_category(&self, category: &CategoryPayload) -> RepositoryResult<String> {
        self.client
            .post::<_, serde_json::Value>("/Categories", category)
            .map(message_of)
    }

    fn update_category(&self, id: CategoryId, category: &CategoryPayload) -> RepositoryResult<String> {
        self.client
            .put::<_, serde_json::Value>(&format!("/Categories/{id}"), category)
            .map(message_of)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<String> {
        self.client
            .delete::<serde_json::Value>(&format!("/Categories/{id}"))
            .map(message_of)
    }

    fn unlock_category(&self, id: CategoryId) -> RepositoryResult<String> {
        self.client
            .put::<_, serde_json::Value>(
                &format!("/Categories/{id}/unlock"),
                &serde_json::json!({}),
            )
            .map(message_of)
    }
}

impl NewsReader for HttpRepository {
    fn list_news(&self, query: &NewsListQuery) -> RepositoryResult<PageResult<NewsArticleSummary>> {
        let path = match query.scope {
            NewsScope::Public => "/NewsArticles",
            NewsScope::Mine => "/NewsArticles/my-news",
        };
        self.fetch(path, &query.to_params())
    }

    fn get_news_by_id(&self, id: NewsArticleId) -> RepositoryResult<Option<NewsArticle>> {
        self.fetch_optional(&format!("/NewsArticles/{id}"))
    }
}

impl NewsWriter for HttpRepository {
    fn create_news(&self, article: &NewsPayload) -> RepositoryResult<String> {
        self.client
            .post::<_, serde_json::Value>("/NewsArticles", article)
            .map(message_of)
    }

    fn update_news(&self, id: NewsArticleId, article: &NewsPayload) -> RepositoryResult<String> {
        self.client
            .put::<_, serde_json::Value>(&format!("/NewsArticles/{id}"), article)
            .map(message_of)
    }

    fn delete_news(&self, id: NewsArticleId) -> RepositoryResult<String> {
        self.client
            .delete::<serde_json::Value>(&format!("/NewsArticles/{id}"))
            .map(message_of)
    }
}

impl TagReader for HttpRepository {
    fn lookup_tags(&self, query: &TagLookupQuery) -> RepositoryResult<Vec<Tag>> {
        let response = self.client.get::<Vec<Tag>>("/Tags/lookup", &query.to_params())?;
        Ok(response.data.unwrap_or_default())
    }
}

impl TagWriter for HttpRepository {
    fn create_tag(&self, tag: &NewTag) -> RepositoryResult<TagId> {
        let response = self.client.post::<_, serde_json::Value>("/Tags", tag)?;
        parse_tag_id(&require_data(response, "/Tags")?)
    }
}

impl ReportReader for HttpRepository {
    fn news_report(&self, query: &ReportQuery) -> RepositoryResult<Report> {
        self.fetch("/NewsArticles/report", &query.to_params())
    }
}

/// The new tag id arrives as a string, older servers send a number.
fn parse_tag_id(data: &serde_json::Value) -> RepositoryResult<TagId> {
    let raw = match data {
        serde_json::Value::String(text) => text.trim().parse::<i32>().ok(),
        serde_json::Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    }
    .ok_or_else(|| RepositoryError::Decode(format!("unexpected tag id {data}")))?;

    Ok(TagId::new(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tag_id_accepts_string_or_number() {
        assert_eq!(parse_tag_id(&json!("12")).unwrap().get(), 12);
        assert_eq!(parse_tag_id(&json!(5)).unwrap().get(), 5);
        assert!(matches!(
            parse_tag_id(&json!("abc")),
            Err(RepositoryError::Decode(_))
        ));
        assert!(parse_tag_id(&json!("0")).is_err());
    }

    #[test]
    fn missing_data_is_a_decode_error() {
        let response: ApiResponse<Account> = ApiResponse::default();
        assert!(matches!(
            require_data(response, "/Accounts/profile"),
            Err(RepositoryError::Decode(_))
        ));
    }
}
