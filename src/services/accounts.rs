//! Account administration on the admin dashboard.

use crate::domain::account::{Account, NewAccount, UpdateAccount};
use crate::domain::types::{AccountId, Role};
use crate::forms::accounts::{CreateAccountForm, EditAccountForm};
use crate::notice::Notifier;
use crate::pagination::PageResult;
use crate::repository::{AccountListQuery, AccountReader, AccountWriter};
use crate::services::{ServiceError, ServiceResult, announce, ensure_role, report_failure};
use crate::session::Session;

const ADMIN: &[Role] = &[Role::Admin];

/// Loads one page of accounts.
pub fn list_accounts<R>(
    repo: &R,
    session: &Session,
    query: &AccountListQuery,
) -> ServiceResult<PageResult<Account>>
where
    R: AccountReader + ?Sized,
{
    ensure_role(session, ADMIN)?;

    Ok(repo.list_accounts(query)?)
}

/// Loads an account for the edit modal.
pub fn load_account<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    account_id: i32,
) -> ServiceResult<Account>
where
    R: AccountReader + ?Sized,
{
    let result = try_load_account(repo, session, account_id);

    report_failure(notifier, "load account details", result)
}

fn try_load_account<R>(
    repo: &R,
    session: &Session,
    account_id: i32,
) -> ServiceResult<Account>
where
    R: AccountReader + ?Sized,
{
    ensure_role(session, ADMIN)?;
    repo.get_account_by_id(AccountId::new(account_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_account<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    form: CreateAccountForm,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    let result = try_create_account(repo, session, form);

    announce(notifier, "create account", "Account created successfully!", result)
}

fn try_create_account<R>(
    repo: &R,
    session: &Session,
    form: CreateAccountForm,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    ensure_role(session, ADMIN)?;
    let account = NewAccount::try_from(form)?;
    repo.create_account(&account)?;
    Ok(())
}

pub fn update_account<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    account_id: i32,
    form: EditAccountForm,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    let result = try_update_account(repo, session, account_id, form);

    announce(notifier, "update account", "Account updated successfully", result)
}

fn try_update_account<R>(
    repo: &R,
    session: &Session,
    account_id: i32,
    form: EditAccountForm,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    ensure_role(session, ADMIN)?;
    let id = AccountId::new(account_id)?;
    let updates = UpdateAccount::try_from(form)?;
    repo.update_account(id, &updates)?;
    Ok(())
}

/// Deletes an account. The server refuses accounts that authored articles
/// and explains why in its message.
pub fn delete_account<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    account_id: i32,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    let result = try_delete_account(repo, session, account_id);

    announce(notifier, "delete account", "Account deleted successfully!", result)
}

fn try_delete_account<R>(
    repo: &R,
    session: &Session,
    account_id: i32,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    ensure_role(session, ADMIN)?;
    repo.delete_account(AccountId::new(account_id)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::account::{ChangePassword, UpdateProfile};
    use crate::notice::{Level, Notice, NoticeQueue};
    use crate::repository::ListQuery;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::session::test_support::{admin_token, staff_token};

    #[derive(Default)]
    struct MockRepo {
        accounts: RefCell<Vec<Account>>,
        next_id: RefCell<i32>,
        queries: RefCell<Vec<AccountListQuery>>,
    }

    impl MockRepo {
        fn seeded() -> Self {
            let repo = MockRepo::default();
            repo.accounts.borrow_mut().push(Account {
                id: AccountId::new(1).unwrap(),
                name: "Author".into(),
                email: "author@news.io".into(),
                role: Role::Staff,
            });
            *repo.next_id.borrow_mut() = 2;
            repo
        }
    }

    impl AccountReader for MockRepo {
        fn list_accounts(&self, query: &AccountListQuery) -> RepositoryResult<PageResult<Account>> {
            self.queries.borrow_mut().push(query.clone());
            let items = self.accounts.borrow().clone();
            let total = items.len();
            Ok(PageResult::new(items, 1, 10, total))
        }

        fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
            Ok(self.accounts.borrow().iter().find(|a| a.id == id).cloned())
        }

        fn get_profile(&self) -> RepositoryResult<Account> {
            Err(RepositoryError::Unexpected("not used".into()))
        }
    }

    impl AccountWriter for MockRepo {
        fn create_account(&self, account: &NewAccount) -> RepositoryResult<String> {
            let mut next = self.next_id.borrow_mut();
            self.accounts.borrow_mut().push(Account {
                id: AccountId::new(*next).unwrap(),
                name: account.account_name.to_string(),
                email: account.account_email.to_string(),
                role: account.account_role,
            });
            *next += 1;
            Ok("Created".into())
        }

        fn update_account(&self, id: AccountId, updates: &UpdateAccount) -> RepositoryResult<String> {
            let mut accounts = self.accounts.borrow_mut();
            let account = accounts
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(RepositoryError::NotFound(None))?;
            account.name = updates.account_name.to_string();
            account.role = updates.account_role;
            Ok("Updated".into())
        }

        fn delete_account(&self, id: AccountId) -> RepositoryResult<String> {
            if id.get() == 1 {
                return Err(RepositoryError::from_status(
                    400,
                    Some("Cannot delete account with news articles".into()),
                ));
            }
            self.accounts.borrow_mut().retain(|a| a.id != id);
            Ok("Deleted".into())
        }

        fn update_profile(&self, _updates: &UpdateProfile) -> RepositoryResult<Account> {
            Err(RepositoryError::Unexpected("not used".into()))
        }

        fn change_password(&self, _change: &ChangePassword) -> RepositoryResult<String> {
            Err(RepositoryError::Unexpected("not used".into()))
        }
    }

    fn admin_session() -> Session {
        let session = Session::in_memory();
        session.login(&admin_token()).unwrap();
        session
    }

    fn create_form() -> CreateAccountForm {
        CreateAccountForm {
            name: "Reporter".into(),
            email: "reporter@news.io".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            role: "Lecturer".into(),
        }
    }

    #[test]
    fn listing_requires_admin() {
        let repo = MockRepo::seeded();
        let session = Session::in_memory();
        session.login(&staff_token()).unwrap();

        let result = list_accounts(&repo, &session, &AccountListQuery::new());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
        assert!(repo.queries.borrow().is_empty());
    }

    #[test]
    fn listing_forwards_query() {
        let repo = MockRepo::seeded();
        let session = admin_session();
        let query = AccountListQuery::new().search("author").paginate(1, 10);

        let page = list_accounts(&repo, &session, &query).unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(
            repo.queries.borrow()[0].to_params()[0],
            ("AccountEmail", "author".to_string())
        );
    }

    #[test]
    fn create_account_notifies_success() {
        let repo = MockRepo::seeded();
        let session = admin_session();
        let notices = NoticeQueue::new();

        create_account(&repo, &session, &notices, create_form()).unwrap();

        assert_eq!(repo.accounts.borrow().len(), 2);
        assert_eq!(notices.drain(), vec![Notice::success("Account created successfully!")]);
    }

    #[test]
    fn invalid_form_is_not_sent() {
        let repo = MockRepo::seeded();
        let session = admin_session();
        let notices = NoticeQueue::new();
        let mut form = create_form();
        form.confirm_password = "other".into();

        let err = create_account(&repo, &session, &notices, form).unwrap_err();

        assert_eq!(err.to_string(), "Passwords do not match");
        assert_eq!(repo.accounts.borrow().len(), 1);
        assert_eq!(notices.drain()[0].level, Level::Error);
    }

    #[test]
    fn delete_refusal_shows_server_message() {
        let repo = MockRepo::seeded();
        let session = admin_session();
        let notices = NoticeQueue::new();

        assert!(delete_account(&repo, &session, &notices, 1).is_err());
        assert_eq!(
            notices.drain(),
            vec![Notice::error("Cannot delete account with news articles")]
        );
    }

    #[test]
    fn update_and_load_round_trip() {
        let repo = MockRepo::seeded();
        let session = admin_session();
        let notices = NoticeQueue::new();

        update_account(
            &repo,
            &session,
            &notices,
            1,
            EditAccountForm {
                name: "Senior Author".into(),
                email: "author@news.io".into(),
                role: "admin".into(),
            },
        )
        .unwrap();

        let account = load_account(&repo, &session, &notices, 1).unwrap();
        assert_eq!(account.name, "Senior Author");
        assert_eq!(account.role, Role::Admin);
    }

    #[test]
    fn missing_account_is_not_found() {
        let repo = MockRepo::seeded();
        let session = admin_session();
        let notices = NoticeQueue::new();

        let result = load_account(&repo, &session, &notices, 99);

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert_eq!(
            notices.drain(),
            vec![Notice::error("Failed to load account details")]
        );
    }
}
