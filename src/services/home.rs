//! The public reader homepage. No sign-in required.

use crate::domain::category::CategoryNode;
use crate::domain::news::{NewsArticle, NewsArticleSummary};
use crate::domain::types::CategoryId;
use crate::dto::home::{HomePageData, HomeQuery};
use crate::notice::{Notice, Notifier};
use crate::repository::query::READER_PAGE_SIZE;
use crate::repository::{CategoryReader, CategoryTreeQuery, NewsListQuery, NewsReader};
use crate::session::Session;

pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out successfully";

/// Loads everything the homepage renders.
///
/// Never fails: a category tree or news page that cannot be fetched is
/// logged and shown empty.
pub fn load_home<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    query: &HomeQuery,
) -> HomePageData
where
    R: CategoryReader + NewsReader + ?Sized,
{
    let categories = repo
        .category_tree(CategoryTreeQuery::default())
        .unwrap_or_else(|err| {
            log::error!("Failed to load categories: {err}");
            Vec::new()
        });

    let mut news_query = NewsListQuery::public().paginate(query.page.max(1), READER_PAGE_SIZE);
    if let Some(category_id) = query.category_id {
        news_query = news_query.category(category_id);
    }
    if let Some(term) = &query.search {
        news_query = news_query.search(term.clone());
    }

    let news = repo.list_news(&news_query).unwrap_or_else(|err| {
        log::error!("Failed to load news: {err}");
        Default::default()
    });

    let selected_category_name = query
        .category_id
        .and_then(|id| find_category_name(&categories, id))
        .map(str::to_string);

    let show_logout_notice = session.take_logout_notice();
    if show_logout_notice {
        notifier.notify(Notice::success(LOGGED_OUT_MESSAGE));
    }

    HomePageData {
        categories,
        news,
        selected_category: query.category_id,
        selected_category_name,
        show_logout_notice,
    }
}

/// Full article behind a listing row, or the row itself with the headline
/// as body when the detail cannot be fetched.
pub fn article_detail<R>(repo: &R, summary: &NewsArticleSummary) -> NewsArticle
where
    R: NewsReader + ?Sized,
{
    match repo.get_news_by_id(summary.id) {
        Ok(Some(article)) => article,
        Ok(None) => {
            log::warn!("News article {} disappeared", summary.id);
            NewsArticle::from_summary(summary.clone())
        }
        Err(err) => {
            log::error!("Failed to load news article {}: {err}", summary.id);
            NewsArticle::from_summary(summary.clone())
        }
    }
}

/// Depth-first search of the tree for the name of `id`.
pub fn find_category_name(tree: &[CategoryNode], id: CategoryId) -> Option<&str> {
    tree.iter().find_map(|node| {
        if node.id == id {
            Some(node.name.as_str())
        } else {
            find_category_name(&node.children, id)
        }
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{NewsArticleId, NewsStatus};
    use crate::notice::NoticeQueue;
    use crate::pagination::PageResult;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::CategoryListQuery;

    #[derive(Default)]
    struct MockRepo {
        tree_fails: bool,
        news_fails: bool,
        news_queries: RefCell<Vec<NewsListQuery>>,
    }

    fn id(value: i32) -> CategoryId {
        CategoryId::new(value).unwrap()
    }

    fn tree() -> Vec<CategoryNode> {
        vec![
            CategoryNode::leaf(id(1), "World").with_children(vec![
                CategoryNode::leaf(id(3), "Europe")
                    .with_children(vec![CategoryNode::leaf(id(5), "Baltics")]),
            ]),
            CategoryNode::leaf(id(2), "Sport"),
        ]
    }

    fn summary() -> NewsArticleSummary {
        NewsArticleSummary {
            id: NewsArticleId::new(11).unwrap(),
            title: "Election".into(),
            headline: "Turnout at record high".into(),
            created_date: NaiveDate::from_ymd_opt(2025, 11, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            category_name: Some("Europe".into()),
            status: NewsStatus::Active,
            created_by: None,
        }
    }

    impl CategoryReader for MockRepo {
        fn list_categories(&self, _query: &CategoryListQuery) -> RepositoryResult<PageResult<Category>> {
            Ok(PageResult::default())
        }

        fn get_category_by_id(&self, _id: CategoryId) -> RepositoryResult<Option<Category>> {
            Ok(None)
        }

        fn category_tree(&self, _query: CategoryTreeQuery) -> RepositoryResult<Vec<CategoryNode>> {
            if self.tree_fails {
                Err(RepositoryError::Network("offline".into()))
            } else {
                Ok(tree())
            }
        }
    }

    impl NewsReader for MockRepo {
        fn list_news(&self, query: &NewsListQuery) -> RepositoryResult<PageResult<NewsArticleSummary>> {
            self.news_queries.borrow_mut().push(query.clone());
            if self.news_fails {
                Err(RepositoryError::from_status(500, None))
            } else {
                Ok(PageResult::new(vec![summary()], 1, READER_PAGE_SIZE, 1))
            }
        }

        fn get_news_by_id(&self, _id: NewsArticleId) -> RepositoryResult<Option<NewsArticle>> {
            Err(RepositoryError::Network("offline".into()))
        }
    }

    #[test]
    fn selected_category_is_named_from_the_tree() {
        let repo = MockRepo::default();
        let notices = NoticeQueue::new();

        let data = load_home(
            &repo,
            &Session::in_memory(),
            &notices,
            &HomeQuery::default().with_page(3).with_category(Some(id(5))),
        );

        assert_eq!(data.selected_category_name.as_deref(), Some("Baltics"));
        let sent = &repo.news_queries.borrow()[0];
        assert_eq!(sent.category_id, Some(id(5)));
        assert_eq!(sent.pagination.unwrap().page, 1);
        assert_eq!(sent.pagination.unwrap().per_page, 6);
        assert!(notices.is_empty());
    }

    #[test]
    fn failures_leave_the_page_empty() {
        let repo = MockRepo {
            tree_fails: true,
            news_fails: true,
            ..Default::default()
        };
        let notices = NoticeQueue::new();

        let data = load_home(
            &repo,
            &Session::in_memory(),
            &notices,
            &HomeQuery::default().with_category(Some(id(2))),
        );

        assert!(data.categories.is_empty());
        assert!(data.news.is_empty());
        assert_eq!(data.selected_category_name, None);
    }

    #[test]
    fn logout_notice_shows_once() {
        let repo = MockRepo::default();
        let notices = NoticeQueue::new();
        let session = Session::in_memory();
        session.logout();

        assert!(load_home(&repo, &session, &notices, &HomeQuery::default()).show_logout_notice);
        assert!(!load_home(&repo, &session, &notices, &HomeQuery::default()).show_logout_notice);
        assert_eq!(notices.drain(), vec![Notice::success(LOGGED_OUT_MESSAGE)]);
    }

    #[test]
    fn detail_falls_back_to_headline() {
        let repo = MockRepo::default();
        let article = article_detail(&repo, &summary());

        assert_eq!(article.summary.title, "Election");
        assert_eq!(article.content.as_deref(), Some("Turnout at record high"));
    }

    #[test]
    fn unknown_category_has_no_name() {
        assert_eq!(find_category_name(&tree(), id(99)), None);
        assert_eq!(find_category_name(&tree(), id(2)), Some("Sport"));
    }
}
