use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;
use crate::domain::types::{AccountId, CategoryId, NewsArticleId, NewsStatus, NonEmptyString, TagId};

/// Row of a news listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewsArticleSummary {
    #[serde(rename = "newsArticleId")]
    pub id: NewsArticleId,
    #[serde(rename = "newsTitle")]
    pub title: String,
    pub headline: String,
    #[serde(rename = "createdDate")]
    pub created_date: NaiveDateTime,
    #[serde(rename = "categoryName", default)]
    pub category_name: Option<String>,
    #[serde(rename = "newsStatus")]
    pub status: NewsStatus,
    #[serde(rename = "createdByAccountName", default)]
    pub created_by: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryRef {
    #[serde(rename = "categoryId")]
    pub id: CategoryId,
    #[serde(rename = "categoryName")]
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthorRef {
    #[serde(rename = "systemAccountId")]
    pub id: AccountId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

/// Full article returned by `GET /NewsArticles/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewsArticle {
    #[serde(flatten)]
    pub summary: NewsArticleSummary,
    #[serde(rename = "newsContent", default)]
    pub content: Option<String>,
    #[serde(rename = "newsSource", default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(rename = "lastModifiedBy", default)]
    pub last_modified_by: Option<AuthorRef>,
    #[serde(rename = "modifiedDate", default)]
    pub modified_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl NewsArticle {
    /// Builds a detail view from a listing row when the detail call fails.
    ///
    /// The headline stands in for the missing body.
    pub fn from_summary(summary: NewsArticleSummary) -> Self {
        let content = Some(summary.headline.clone());
        Self {
            summary,
            content,
            source: None,
            category: None,
            author: None,
            last_modified_by: None,
            modified_date: None,
            tags: Vec::new(),
        }
    }
}

/// Payload for creating or updating a news article.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsPayload {
    pub news_title: NonEmptyString,
    pub headline: NonEmptyString,
    pub news_content: NonEmptyString,
    pub news_source: NonEmptyString,
    pub category_id: CategoryId,
    pub news_status: NewsStatus,
    pub tag_ids: Vec<TagId>,
}
