//! Forms for account administration and the account settings page.

use serde::Deserialize;
use validator::Validate;

use crate::domain::account::{ChangePassword, NewAccount, UpdateAccount, UpdateProfile};
use crate::domain::types::{Email, NonEmptyString, Role};
use crate::forms::{FormError, first_failure, required};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for creating an account from the admin dashboard.
pub struct CreateAccountForm {
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
    /// One of "Admin", "Staff" or "Lecturer".
    pub role: String,
}

impl TryFrom<CreateAccountForm> for NewAccount {
    type Error = FormError;

    fn try_from(form: CreateAccountForm) -> Result<Self, Self::Error> {
        required(&form.name, "Account name")?;
        required(&form.email, "Email")?;
        if form.password.is_empty() {
            return Err(FormError::Required("Password"));
        }

        if let Err(errors) = form.validate() {
            return Err(first_failure(
                errors,
                &[
                    ("email", FormError::InvalidEmail),
                    ("password", FormError::PasswordTooShort),
                    ("confirm_password", FormError::PasswordMismatch),
                ],
            ));
        }

        Ok(NewAccount {
            account_name: NonEmptyString::new(&form.name).map_err(|_| FormError::Required("Account name"))?,
            account_email: Email::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            password: form.password,
            account_role: form.role.parse::<Role>().map_err(|_| FormError::InvalidRole)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for editing another account.
pub struct EditAccountForm {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: String,
}

impl TryFrom<EditAccountForm> for UpdateAccount {
    type Error = FormError;

    fn try_from(form: EditAccountForm) -> Result<Self, Self::Error> {
        required(&form.name, "Account name")?;
        required(&form.email, "Account email")?;

        if let Err(errors) = form.validate() {
            return Err(first_failure(errors, &[("email", FormError::InvalidEmail)]));
        }

        Ok(UpdateAccount {
            account_name: NonEmptyString::new(&form.name).map_err(|_| FormError::Required("Account name"))?,
            account_email: Email::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            account_role: form.role.parse::<Role>().map_err(|_| FormError::InvalidRole)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for the profile tab of the settings page.
pub struct ProfileForm {
    pub name: String,
    #[validate(email)]
    pub email: String,
}

impl TryFrom<ProfileForm> for UpdateProfile {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        if form.name.trim().is_empty() || form.email.trim().is_empty() {
            return Err(FormError::MissingProfileFields);
        }

        if let Err(errors) = form.validate() {
            return Err(first_failure(errors, &[("email", FormError::InvalidEmail)]));
        }

        Ok(UpdateProfile {
            account_name: NonEmptyString::new(&form.name).map_err(|_| FormError::MissingProfileFields)?,
            account_email: Email::new(form.email).map_err(|_| FormError::InvalidEmail)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for the password tab of the settings page.
pub struct ChangePasswordForm {
    #[validate(length(min = 6))]
    pub new_password: String,
    #[validate(must_match(other = "new_password"))]
    pub confirm_password: String,
}

impl TryFrom<ChangePasswordForm> for ChangePassword {
    type Error = FormError;

    fn try_from(form: ChangePasswordForm) -> Result<Self, Self::Error> {
        if form.new_password.is_empty() || form.confirm_password.is_empty() {
            return Err(FormError::MissingPasswordFields);
        }

        if let Err(errors) = form.validate() {
            return Err(first_failure(
                errors,
                &[
                    ("new_password", FormError::PasswordTooShort),
                    ("confirm_password", FormError::PasswordMismatch),
                ],
            ));
        }

        Ok(ChangePassword {
            password: form.new_password,
        })
    }
}
