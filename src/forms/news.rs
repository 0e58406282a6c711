//! Create/edit news article form.

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::news::NewsPayload;
use crate::domain::types::{CategoryId, NewsStatus, NonEmptyString, TagId};
use crate::forms::FormError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsForm {
    pub title: String,
    pub headline: String,
    pub content: String,
    pub source: String,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub status: NewsStatus,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

impl TryFrom<NewsForm> for NewsPayload {
    type Error = FormError;

    fn try_from(form: NewsForm) -> Result<Self, Self::Error> {
        let news_title =
            NonEmptyString::new(&form.title).map_err(|_| FormError::Required("News title"))?;
        let headline =
            NonEmptyString::new(&form.headline).map_err(|_| FormError::Required("Headline"))?;
        let news_content =
            NonEmptyString::new(&form.content).map_err(|_| FormError::Required("News content"))?;
        let news_source =
            NonEmptyString::new(&form.source).map_err(|_| FormError::Required("News source"))?;
        let category_id = form
            .category_id
            .and_then(|id| CategoryId::new(id).ok())
            .ok_or(FormError::CategoryNotSelected)?;

        let mut seen = HashSet::new();
        let tag_ids = form
            .tag_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        Ok(NewsPayload {
            news_title,
            headline,
            news_content,
            news_source,
            category_id,
            news_status: form.status,
            tag_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewsForm {
        NewsForm {
            title: " Budget passes ".into(),
            headline: "Parliament votes".into(),
            content: "Full story".into(),
            source: "Newsroom".into(),
            category_id: Some(3),
            status: NewsStatus::Inactive,
            tag_ids: vec![TagId::new(1).unwrap()],
        }
    }

    #[test]
    fn fields_are_checked_in_order() {
        let mut missing = form();
        missing.headline = " ".into();
        missing.source = String::new();
        assert_eq!(
            NewsPayload::try_from(missing).unwrap_err(),
            FormError::Required("Headline")
        );
    }

    #[test]
    fn category_must_be_selected() {
        let mut missing = form();
        missing.category_id = None;
        assert_eq!(
            NewsPayload::try_from(missing).unwrap_err().to_string(),
            "Please select a category"
        );
    }

    #[test]
    fn payload_serializes_status_as_text() {
        let payload = NewsPayload::try_from(form()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["newsTitle"], "Budget passes");
        assert_eq!(json["newsStatus"], "Inactive");
        assert_eq!(json["tagIds"], serde_json::json!([1]));
    }
}
