//! Account settings of the signed-in user.

use crate::domain::account::{Account, ChangePassword, UpdateProfile};
use crate::forms::accounts::{ChangePasswordForm, ProfileForm};
use crate::notice::Notifier;
use crate::repository::{AccountReader, AccountWriter};
use crate::services::{ServiceResult, announce, ensure_role, report_failure};
use crate::session::Session;

pub fn load_profile<R>(repo: &R, session: &Session, notifier: &dyn Notifier) -> ServiceResult<Account>
where
    R: AccountReader + ?Sized,
{
    let result = try_load_profile(repo, session);

    report_failure(notifier, "load profile", result)
}

fn try_load_profile<R>(repo: &R, session: &Session) -> ServiceResult<Account>
where
    R: AccountReader + ?Sized,
{
    ensure_role(session, &[])?;
    Ok(repo.get_profile()?)
}

/// Saves name and email, returning the profile as stored by the server.
pub fn update_profile<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    form: ProfileForm,
) -> ServiceResult<Account>
where
    R: AccountWriter + ?Sized,
{
    let result = try_update_profile(repo, session, form);

    announce(notifier, "update profile", "Profile updated successfully", result)
}

fn try_update_profile<R>(
    repo: &R,
    session: &Session,
    form: ProfileForm,
) -> ServiceResult<Account>
where
    R: AccountWriter + ?Sized,
{
    ensure_role(session, &[])?;
    let updates = UpdateProfile::try_from(form)?;
    Ok(repo.update_profile(&updates)?)
}

pub fn change_password<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    form: ChangePasswordForm,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    let result = try_change_password(repo, session, form);

    announce(
        notifier,
        "change password",
        "Password changed successfully!",
        result,
    )
}

fn try_change_password<R>(
    repo: &R,
    session: &Session,
    form: ChangePasswordForm,
) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    ensure_role(session, &[])?;
    let change = ChangePassword::try_from(form)?;
    repo.change_password(&change)?;
    Ok(())
}
