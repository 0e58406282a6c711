//! Sign-in form.

use serde::Deserialize;

use crate::domain::account::Credentials;
use crate::forms::{FormError, required};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        let email = required(&form.email, "Email")?;
        if form.password.is_empty() {
            return Err(FormError::Required("Password"));
        }

        Ok(Credentials {
            email,
            password: form.password,
        })
    }
}
