//! Tag lookup and inline creation from the news editor.

use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::Role;
use crate::forms::tags::{TAG_PREFIX, TagForm};
use crate::notice::{Notice, Notifier};
use crate::repository::{TagLookupQuery, TagReader, TagWriter};
use crate::services::{ServiceResult, ensure_role, report_failure};
use crate::session::Session;

const EDITORS: &[Role] = &[Role::Admin, Role::Staff];

/// Tags whose name starts with `term`. A blank term (after the `#`) does
/// not hit the server.
pub fn lookup_tags<R>(repo: &R, session: &Session, term: &str) -> ServiceResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    ensure_role(session, EDITORS)?;

    let name = term.trim().trim_start_matches(TAG_PREFIX).trim();
    if name.is_empty() {
        return Ok(Vec::new());
    }

    Ok(repo.lookup_tags(&TagLookupQuery {
        tag_name: name.to_string(),
    })?)
}

/// Creates a tag and returns it ready to be attached to the article.
pub fn create_tag<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    form: TagForm,
) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    let result = try_create_tag(repo, session, form);

    let tag = report_failure(notifier, "create tag", result)?;
    notifier.notify(Notice::success(format!(
        "Tag \"{}\" created successfully",
        tag.name
    )));
    Ok(tag)
}

fn try_create_tag<R>(
    repo: &R,
    session: &Session,
    form: TagForm,
) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    ensure_role(session, EDITORS)?;
    let new_tag = NewTag::try_from(form)?;
    let id = repo.create_tag(&new_tag)?;
    Ok(Tag {
        id,
        name: new_tag.tag_name.into_inner(),
    })
}
