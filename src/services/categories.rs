//! Category management, shared by the admin and staff dashboards.

use crate::domain::category::{Category, CategoryNode, CategoryPayload};
use crate::domain::types::{CategoryId, Role};
use crate::forms::categories::CategoryForm;
use crate::notice::{Notice, Notifier};
use crate::pagination::PageResult;
use crate::repository::{CategoryListQuery, CategoryReader, CategoryTreeQuery, CategoryWriter};
use crate::services::{ServiceError, ServiceResult, announce, ensure_role, report_failure};
use crate::session::Session;

const EDITORS: &[Role] = &[Role::Admin, Role::Staff];

/// Message the server answers a delete with when it deactivated the
/// category instead because articles still reference it.
pub const DEACTIVATED_MESSAGE: &str = "Category deactivated because it has related data";

/// What a delete request actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Soft-deleted, carrying the server's explanation.
    Deactivated(String),
}

impl DeleteOutcome {
    pub fn from_message(message: &str) -> Self {
        if message.trim() == DEACTIVATED_MESSAGE {
            DeleteOutcome::Deactivated(message.trim().to_string())
        } else {
            DeleteOutcome::Deleted
        }
    }
}

pub fn list_categories<R>(
    repo: &R,
    session: &Session,
    query: &CategoryListQuery,
) -> ServiceResult<PageResult<Category>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(session, EDITORS)?;

    Ok(repo.list_categories(query)?)
}

/// Loads the category tree backing the parent and category pickers.
pub fn category_tree<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    query: CategoryTreeQuery,
) -> ServiceResult<Vec<CategoryNode>>
where
    R: CategoryReader + ?Sized,
{
    let result = try_category_tree(repo, session, query);

    report_failure(notifier, "load categories", result)
}

fn try_category_tree<R>(
    repo: &R,
    session: &Session,
    query: CategoryTreeQuery,
) -> ServiceResult<Vec<CategoryNode>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(session, EDITORS)?;
    Ok(repo.category_tree(query)?)
}

pub fn load_category<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    category_id: i32,
) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    let result = try_load_category(repo, session, category_id);

    report_failure(notifier, "load category details", result)
}

fn try_load_category<R>(
    repo: &R,
    session: &Session,
    category_id: i32,
) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(session, EDITORS)?;
    repo.get_category_by_id(CategoryId::new(category_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_category<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    form: CategoryForm,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    let result = try_create_category(repo, session, form);

    announce(notifier, "create category", "Category created successfully", result)
}

fn try_create_category<R>(
    repo: &R,
    session: &Session,
    form: CategoryForm,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(session, EDITORS)?;
    let payload = CategoryPayload::try_from(form)?;
    repo.create_category(&payload)?;
    Ok(())
}

pub fn update_category<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    category_id: i32,
    form: CategoryForm,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    let result = try_update_category(repo, session, category_id, form);

    announce(notifier, "update category", "Category updated successfully", result)
}

fn try_update_category<R>(
    repo: &R,
    session: &Session,
    category_id: i32,
    form: CategoryForm,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(session, EDITORS)?;
    let id = CategoryId::new(category_id)?;
    let payload = CategoryPayload::try_from(form)?;
    repo.update_category(id, &payload)?;
    Ok(())
}

/// Deletes a category, telling a real delete apart from the server falling
/// back to deactivation. The latter is announced as a warning.
pub fn delete_category<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    category_id: i32,
) -> ServiceResult<DeleteOutcome>
where
    R: CategoryWriter + ?Sized,
{
    let result = try_delete_category(repo, session, category_id);

    let outcome = report_failure(notifier, "delete category", result)?;
    match &outcome {
        DeleteOutcome::Deleted => notifier.notify(Notice::success("Category deleted successfully")),
        DeleteOutcome::Deactivated(message) => {
            log::warn!("Category {category_id} deactivated instead of deleted");
            notifier.notify(Notice::warning(message.clone()))
        }
    }
    Ok(outcome)
}

fn try_delete_category<R>(
    repo: &R,
    session: &Session,
    category_id: i32,
) -> ServiceResult<DeleteOutcome>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(session, EDITORS)?;
    let message = repo.delete_category(CategoryId::new(category_id)?)?;
    Ok(DeleteOutcome::from_message(&message))
}

/// Reactivates a deactivated category.
pub fn unlock_category<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    category_id: i32,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    let result = try_unlock_category(repo, session, category_id);

    announce(notifier, "unlock category", "Category activated successfully", result)
}

fn try_unlock_category<R>(
    repo: &R,
    session: &Session,
    category_id: i32,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(session, EDITORS)?;
    repo.unlock_category(CategoryId::new(category_id)?)?;
    Ok(())
}
