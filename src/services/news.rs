//! The staff "My news" workspace.

use crate::domain::news::{NewsArticle, NewsArticleSummary, NewsPayload};
use crate::domain::types::{NewsArticleId, Role};
use crate::forms::news::NewsForm;
use crate::notice::Notifier;
use crate::pagination::PageResult;
use crate::repository::{NewsListQuery, NewsReader, NewsScope, NewsWriter};
use crate::services::{ServiceError, ServiceResult, announce, ensure_role, report_failure};
use crate::session::Session;

const STAFF: &[Role] = &[Role::Staff];

/// Lists articles written by the signed-in staff member. The query is
/// always sent to the scoped listing, whatever scope it carries.
pub fn list_my_news<R>(
    repo: &R,
    session: &Session,
    query: &NewsListQuery,
) -> ServiceResult<PageResult<NewsArticleSummary>>
where
    R: NewsReader + ?Sized,
{
    ensure_role(session, STAFF)?;

    let mut query = query.clone();
    query.scope = NewsScope::Mine;

    Ok(repo.list_news(&query)?)
}

pub fn load_news<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    news_id: i32,
) -> ServiceResult<NewsArticle>
where
    R: NewsReader + ?Sized,
{
    let result = try_load_news(repo, session, news_id);

    report_failure(notifier, "load news data", result)
}

fn try_load_news<R>(
    repo: &R,
    session: &Session,
    news_id: i32,
) -> ServiceResult<NewsArticle>
where
    R: NewsReader + ?Sized,
{
    ensure_role(session, STAFF)?;
    repo.get_news_by_id(NewsArticleId::new(news_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_news<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    form: NewsForm,
) -> ServiceResult<()>
where
    R: NewsWriter + ?Sized,
{
    let result = try_create_news(repo, session, form);

    announce(
        notifier,
        "create news article",
        "News article created successfully!",
        result,
    )
}

fn try_create_news<R>(
    repo: &R,
    session: &Session,
    form: NewsForm,
) -> ServiceResult<()>
where
    R: NewsWriter + ?Sized,
{
    ensure_role(session, STAFF)?;
    let payload = NewsPayload::try_from(form)?;
    repo.create_news(&payload)?;
    Ok(())
}

pub fn update_news<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    news_id: i32,
    form: NewsForm,
) -> ServiceResult<()>
where
    R: NewsWriter + ?Sized,
{
    let result = try_update_news(repo, session, news_id, form);

    announce(
        notifier,
        "update news article",
        "News article updated successfully!",
        result,
    )
}

fn try_update_news<R>(
    repo: &R,
    session: &Session,
    news_id: i32,
    form: NewsForm,
) -> ServiceResult<()>
where
    R: NewsWriter + ?Sized,
{
    ensure_role(session, STAFF)?;
    let id = NewsArticleId::new(news_id)?;
    let payload = NewsPayload::try_from(form)?;
    repo.update_news(id, &payload)?;
    Ok(())
}

pub fn delete_news<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    news_id: i32,
) -> ServiceResult<()>
where
    R: NewsWriter + ?Sized,
{
    let result = try_delete_news(repo, session, news_id);

    announce(
        notifier,
        "delete news article",
        "News article deleted successfully!",
        result,
    )
}

fn try_delete_news<R>(
    repo: &R,
    session: &Session,
    news_id: i32,
) -> ServiceResult<()>
where
    R: NewsWriter + ?Sized,
{
    ensure_role(session, STAFF)?;
    repo.delete_news(NewsArticleId::new(news_id)?)?;
    Ok(())
}
