use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Article counts for a single day of the reporting window.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyBreakdown {
    pub date: String,
    pub total_articles: u32,
    pub active_articles: u32,
    pub inactive_articles: u32,
}

/// Share of articles attributed to one category or author.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownItem {
    pub item_id: i32,
    pub item_name: String,
    pub total_articles: u32,
    pub percentage: f64,
}

/// Aggregated statistics returned by `GET /NewsArticles/report`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_articles_created: u32,
    pub total_categories: u32,
    pub inactive_categories_count: u32,
    pub inactive_articles_count: u32,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyBreakdown>,
    #[serde(default)]
    pub category_breakdown: Vec<BreakdownItem>,
    #[serde(default)]
    pub author_breakdown: Vec<BreakdownItem>,
}

impl Report {
    /// Active articles over the whole window.
    pub fn active_articles_count(&self) -> u32 {
        self.total_articles_created
            .saturating_sub(self.inactive_articles_count)
    }
}
